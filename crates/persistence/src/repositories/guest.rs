//! Guest repository for database operations.

use domain::models::NewGuest;
use sqlx::PgPool;
use uuid::Uuid;

use crate::entities::{GuestEntity, GuestExportRowEntity, GuestStatusDb};
use crate::metrics::QueryTimer;

/// Outcome of a quota-checked guest insert.
#[derive(Debug, Clone)]
pub enum GuestInsertOutcome {
    /// Guest was persisted.
    Created(GuestEntity),
    /// The event's guest quota was already full; nothing was inserted.
    LimitReached,
}

/// Per-relation row counts from a cascade delete.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CascadeDeleteCounts {
    pub tags: u64,
    pub group_members: u64,
    pub gifts: u64,
    pub guests: u64,
}

/// Repository for guest-related database operations.
#[derive(Clone)]
pub struct GuestRepository {
    pool: PgPool,
}

impl GuestRepository {
    /// Creates a new GuestRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Count guests belonging to an event.
    pub async fn count_by_event(&self, event_id: Uuid) -> Result<i64, sqlx::Error> {
        let timer = QueryTimer::new("count_guests_by_event");
        let result = sqlx::query_scalar::<_, i64>(
            r#"
            SELECT COUNT(*) FROM guests WHERE event_id = $1
            "#,
        )
        .bind(event_id)
        .fetch_one(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Check whether a guest already exists under its identity key:
    /// `(event, name, phone)`, or `(event, name, email)` when an email is
    /// present. Scoped to the event; other events are never consulted.
    pub async fn exists_duplicate(
        &self,
        event_id: Uuid,
        name: &str,
        phone: Option<&str>,
        email: Option<&str>,
    ) -> Result<bool, sqlx::Error> {
        let timer = QueryTimer::new("guest_exists_duplicate");
        let result = sqlx::query_scalar::<_, bool>(
            r#"
            SELECT EXISTS(
                SELECT 1 FROM guests
                WHERE event_id = $1
                  AND name = $2
                  AND (
                      phone IS NOT DISTINCT FROM $3
                      OR ($4::text IS NOT NULL AND email = $4)
                  )
            )
            "#,
        )
        .bind(event_id)
        .bind(name)
        .bind(phone)
        .bind(email)
        .fetch_one(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Insert a guest, re-validating the event's guest quota inside the same
    /// transaction as the insert.
    ///
    /// A per-event advisory lock serializes concurrent inserts for the same
    /// event, so two requests cannot both observe `count < limit` and push
    /// the event over quota. `limit_guests <= 0` means unlimited.
    pub async fn create_guest(
        &self,
        event_id: Uuid,
        limit_guests: i32,
        guest: &NewGuest,
    ) -> Result<GuestInsertOutcome, sqlx::Error> {
        let timer = QueryTimer::new("create_guest");
        let mut tx = self.pool.begin().await?;

        if limit_guests > 0 {
            sqlx::query("SELECT pg_advisory_xact_lock($1)")
                .bind(event_lock_key(event_id))
                .execute(&mut *tx)
                .await?;

            let count = sqlx::query_scalar::<_, i64>(
                r#"
                SELECT COUNT(*) FROM guests WHERE event_id = $1
                "#,
            )
            .bind(event_id)
            .fetch_one(&mut *tx)
            .await?;

            if count >= limit_guests as i64 {
                // Rolls back on drop; the advisory lock releases with it.
                timer.record();
                return Ok(GuestInsertOutcome::LimitReached);
            }
        }

        let status: GuestStatusDb = guest.status.into();
        let entity = sqlx::query_as::<_, GuestEntity>(
            r#"
            INSERT INTO guests (event_id, name, phone, email, address, note,
                                status, wishing_note, party_size, is_invited)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            RETURNING id, event_id, name, phone, email, address, note, status,
                      wishing_note, party_size, is_invited, created_at, updated_at
            "#,
        )
        .bind(event_id)
        .bind(&guest.name)
        .bind(guest.phone.as_deref())
        .bind(guest.email.as_deref())
        .bind(guest.address.as_deref())
        .bind(guest.note.as_deref())
        .bind(status)
        .bind(guest.wishing_note.as_deref())
        .bind(guest.party_size)
        .bind(guest.is_invited)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;
        timer.record();
        Ok(GuestInsertOutcome::Created(entity))
    }

    /// Atomically delete guests and their dependent rows.
    ///
    /// One transaction deletes tag associations, group associations, gifts,
    /// then the guest rows themselves, all filtered to the given event.
    /// Either all four deletions commit or none do. The caller decides how
    /// to report a zero primary count.
    pub async fn delete_cascade(
        &self,
        event_id: Uuid,
        ids: &[Uuid],
    ) -> Result<CascadeDeleteCounts, sqlx::Error> {
        let timer = QueryTimer::new("delete_guests_cascade");
        let mut tx = self.pool.begin().await?;

        let tags = sqlx::query(
            r#"
            DELETE FROM guest_tags
            WHERE guest_id IN (SELECT id FROM guests WHERE id = ANY($1) AND event_id = $2)
            "#,
        )
        .bind(ids)
        .bind(event_id)
        .execute(&mut *tx)
        .await?
        .rows_affected();

        let group_members = sqlx::query(
            r#"
            DELETE FROM guest_group_members
            WHERE guest_id IN (SELECT id FROM guests WHERE id = ANY($1) AND event_id = $2)
            "#,
        )
        .bind(ids)
        .bind(event_id)
        .execute(&mut *tx)
        .await?
        .rows_affected();

        let gifts = sqlx::query(
            r#"
            DELETE FROM gifts
            WHERE guest_id IN (SELECT id FROM guests WHERE id = ANY($1) AND event_id = $2)
            "#,
        )
        .bind(ids)
        .bind(event_id)
        .execute(&mut *tx)
        .await?
        .rows_affected();

        let guests = sqlx::query(
            r#"
            DELETE FROM guests WHERE id = ANY($1) AND event_id = $2
            "#,
        )
        .bind(ids)
        .bind(event_id)
        .execute(&mut *tx)
        .await?
        .rows_affected();

        tx.commit().await?;
        timer.record();
        Ok(CascadeDeleteCounts {
            tags,
            group_members,
            gifts,
            guests,
        })
    }

    /// Fetch guest rows with aggregated tag/group names for export, in
    /// creation order.
    pub async fn export_rows(
        &self,
        event_id: Uuid,
    ) -> Result<Vec<GuestExportRowEntity>, sqlx::Error> {
        let timer = QueryTimer::new("export_guest_rows");
        let result = sqlx::query_as::<_, GuestExportRowEntity>(
            r#"
            SELECT
                g.id, g.name, g.email, g.phone, g.address, g.note, g.status,
                g.wishing_note, g.party_size, g.is_invited,
                (SELECT string_agg(t.name, ', ' ORDER BY t.name)
                   FROM tags t
                   JOIN guest_tags gt ON gt.tag_id = t.id
                  WHERE gt.guest_id = g.id) AS tags,
                (SELECT string_agg(gr.name, ', ' ORDER BY gr.name)
                   FROM guest_groups gr
                   JOIN guest_group_members ggm ON ggm.group_id = gr.id
                  WHERE ggm.guest_id = g.id) AS groups,
                g.created_at, g.updated_at
            FROM guests g
            WHERE g.event_id = $1
            ORDER BY g.created_at ASC, g.name ASC
            "#,
        )
        .bind(event_id)
        .fetch_all(&self.pool)
        .await;
        timer.record();
        result
    }
}

/// Derive a stable bigint advisory-lock key from an event id.
pub(crate) fn event_lock_key(event_id: Uuid) -> i64 {
    let bytes = event_id.as_bytes();
    i64::from_le_bytes([
        bytes[0], bytes[1], bytes[2], bytes[3], bytes[4], bytes[5], bytes[6], bytes[7],
    ])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_lock_key_is_stable() {
        let id = Uuid::parse_str("550e8400-e29b-41d4-a716-446655440000").unwrap();
        assert_eq!(event_lock_key(id), event_lock_key(id));
    }

    #[test]
    fn test_event_lock_key_differs_per_event() {
        assert_ne!(
            event_lock_key(Uuid::new_v4()),
            event_lock_key(Uuid::new_v4())
        );
    }
}
