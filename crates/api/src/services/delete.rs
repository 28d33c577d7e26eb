//! Guest cascade deletion service.
//!
//! Thin orchestration over the storage seam: run the transactional cascade,
//! decide how a zero-match outcome is reported, and assemble the
//! per-relation response counts.

use async_trait::async_trait;
use domain::models::CascadeDeleteResponse;
use persistence::repositories::{CascadeDeleteCounts, GuestRepository};
use std::collections::HashMap;
use uuid::Uuid;

use crate::error::ApiError;

/// Storage seam for cascade deletion.
#[async_trait]
pub trait DeleteStore: Send + Sync {
    /// Atomically delete the guests matching `ids` under `event_id`, with
    /// their dependent rows, returning per-relation counts.
    async fn delete_cascade(
        &self,
        event_id: Uuid,
        ids: &[Uuid],
    ) -> Result<CascadeDeleteCounts, sqlx::Error>;
}

#[async_trait]
impl DeleteStore for GuestRepository {
    async fn delete_cascade(
        &self,
        event_id: Uuid,
        ids: &[Uuid],
    ) -> Result<CascadeDeleteCounts, sqlx::Error> {
        GuestRepository::delete_cascade(self, event_id, ids).await
    }
}

/// Delete the given guests and their dependent rows under one event.
///
/// Ids outside the event are ignored. When none of the ids matched, nothing
/// was deleted and the call fails with `NotFound`.
pub async fn delete_guests<S: DeleteStore>(
    store: &S,
    event_id: Uuid,
    ids: &[Uuid],
) -> Result<CascadeDeleteResponse, ApiError> {
    let counts = store.delete_cascade(event_id, ids).await?;
    if counts.guests == 0 {
        return Err(ApiError::NotFound(
            "No matching guests found for this event".into(),
        ));
    }

    let mut deleted_relations = HashMap::new();
    deleted_relations.insert("tags".to_string(), counts.tags);
    deleted_relations.insert("groups".to_string(), counts.group_members);
    deleted_relations.insert("gifts".to_string(), counts.gifts);

    Ok(CascadeDeleteResponse {
        deleted_guests: counts.guests,
        deleted_relations,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    /// Per-guest dependent row counts in the in-memory store.
    #[derive(Clone, Copy)]
    struct StoredGuest {
        event_id: Uuid,
        tags: u64,
        groups: u64,
        gifts: u64,
    }

    struct MemoryStore {
        guests: Mutex<HashMap<Uuid, StoredGuest>>,
    }

    impl MemoryStore {
        fn new() -> Self {
            Self {
                guests: Mutex::new(HashMap::new()),
            }
        }

        fn with_guest(self, id: Uuid, guest: StoredGuest) -> Self {
            self.guests.lock().unwrap().insert(id, guest);
            self
        }

        fn len(&self) -> usize {
            self.guests.lock().unwrap().len()
        }
    }

    #[async_trait]
    impl DeleteStore for MemoryStore {
        async fn delete_cascade(
            &self,
            event_id: Uuid,
            ids: &[Uuid],
        ) -> Result<CascadeDeleteCounts, sqlx::Error> {
            let mut guests = self.guests.lock().unwrap();
            let mut counts = CascadeDeleteCounts::default();
            for id in ids {
                let matches = guests
                    .get(id)
                    .map(|g| g.event_id == event_id)
                    .unwrap_or(false);
                if matches {
                    let guest = guests.remove(id).unwrap();
                    counts.guests += 1;
                    counts.tags += guest.tags;
                    counts.group_members += guest.groups;
                    counts.gifts += guest.gifts;
                }
            }
            Ok(counts)
        }
    }

    fn plain_guest(event_id: Uuid) -> StoredGuest {
        StoredGuest {
            event_id,
            tags: 0,
            groups: 0,
            gifts: 0,
        }
    }

    #[tokio::test]
    async fn test_partial_id_match_deletes_only_matching() {
        let event_id = Uuid::new_v4();
        let known = Uuid::new_v4();
        let kept = Uuid::new_v4();
        let store = MemoryStore::new()
            .with_guest(known, plain_guest(event_id))
            .with_guest(kept, plain_guest(event_id));

        let response = delete_guests(&store, event_id, &[known, Uuid::new_v4()])
            .await
            .unwrap();

        assert_eq!(response.deleted_guests, 1);
        assert_eq!(store.len(), 1);
        assert!(store.guests.lock().unwrap().contains_key(&kept));
    }

    #[tokio::test]
    async fn test_no_match_is_not_found_and_store_untouched() {
        let event_id = Uuid::new_v4();
        let store = MemoryStore::new().with_guest(Uuid::new_v4(), plain_guest(event_id));

        let err = delete_guests(&store, event_id, &[Uuid::new_v4(), Uuid::new_v4()])
            .await
            .unwrap_err();

        assert!(matches!(err, ApiError::NotFound(_)));
        assert_eq!(store.len(), 1);
    }

    #[tokio::test]
    async fn test_other_events_guests_are_never_deleted() {
        let event_id = Uuid::new_v4();
        let foreign = Uuid::new_v4();
        let store = MemoryStore::new().with_guest(foreign, plain_guest(Uuid::new_v4()));

        let err = delete_guests(&store, event_id, &[foreign]).await.unwrap_err();

        assert!(matches!(err, ApiError::NotFound(_)));
        assert_eq!(store.len(), 1);
    }

    #[tokio::test]
    async fn test_relation_counts_are_reported_per_table() {
        let event_id = Uuid::new_v4();
        let with_relations = Uuid::new_v4();
        let plain = Uuid::new_v4();
        let store = MemoryStore::new()
            .with_guest(
                with_relations,
                StoredGuest {
                    event_id,
                    tags: 2,
                    groups: 1,
                    gifts: 3,
                },
            )
            .with_guest(plain, plain_guest(event_id));

        let response = delete_guests(&store, event_id, &[with_relations, plain])
            .await
            .unwrap();

        assert_eq!(response.deleted_guests, 2);
        assert_eq!(response.deleted_relations["tags"], 2);
        assert_eq!(response.deleted_relations["groups"], 1);
        assert_eq!(response.deleted_relations["gifts"], 3);
    }
}
