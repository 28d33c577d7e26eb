//! Guest domain models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::str::FromStr;
use uuid::Uuid;
use validator::Validate;

/// Maximum ids accepted by a single cascade delete request.
pub const MAX_DELETE_IDS: usize = 500;

/// RSVP status of a guest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GuestStatus {
    Pending,
    Confirmed,
    Rejected,
}

impl GuestStatus {
    /// Convert to database string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Confirmed => "confirmed",
            Self::Rejected => "rejected",
        }
    }
}

impl FromStr for GuestStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "pending" => Ok(GuestStatus::Pending),
            "confirmed" => Ok(GuestStatus::Confirmed),
            "rejected" => Ok(GuestStatus::Rejected),
            _ => Err(format!("Unknown guest status: {}", s)),
        }
    }
}

impl std::fmt::Display for GuestStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Guest domain model, scoped to one event.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Guest {
    pub id: Uuid,
    pub event_id: Uuid,
    pub name: String,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub address: Option<String>,
    pub note: Option<String>,
    pub status: GuestStatus,
    pub wishing_note: Option<String>,
    pub party_size: i32,
    pub is_invited: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Input for creating a guest (single-record endpoint or import row).
#[derive(Debug, Clone, Validate)]
pub struct NewGuest {
    #[validate(length(min = 1, max = 255, message = "name must be 1-255 characters"))]
    pub name: String,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub address: Option<String>,
    pub note: Option<String>,
    pub status: GuestStatus,
    pub wishing_note: Option<String>,
    pub party_size: i32,
    pub is_invited: bool,
}

impl Default for NewGuest {
    fn default() -> Self {
        Self {
            name: String::new(),
            phone: None,
            email: None,
            address: None,
            note: None,
            status: GuestStatus::Pending,
            wishing_note: None,
            party_size: 1,
            is_invited: false,
        }
    }
}

/// Request body for cascade-deleting guests.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct DeleteGuestsRequest {
    #[validate(length(min = 1, max = 500, message = "ids must contain 1-500 items"))]
    pub ids: Vec<Uuid>,
}

/// Result of an atomic cascade delete.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CascadeDeleteResponse {
    /// Number of guest rows deleted.
    pub deleted_guests: u64,
    /// Deleted dependent rows, keyed by relation name.
    pub deleted_relations: HashMap<String, u64>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_guest_status_parse() {
        assert_eq!("pending".parse::<GuestStatus>().unwrap(), GuestStatus::Pending);
        assert_eq!(
            " Confirmed ".parse::<GuestStatus>().unwrap(),
            GuestStatus::Confirmed
        );
        assert!("maybe".parse::<GuestStatus>().is_err());
    }

    #[test]
    fn test_new_guest_defaults() {
        let guest = NewGuest::default();
        assert_eq!(guest.status, GuestStatus::Pending);
        assert_eq!(guest.party_size, 1);
        assert!(!guest.is_invited);
    }

    #[test]
    fn test_delete_request_rejects_empty_ids() {
        let request: DeleteGuestsRequest = serde_json::from_value(json!({ "ids": [] })).unwrap();
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_cascade_delete_response_serialize() {
        let mut relations = HashMap::new();
        relations.insert("gifts".to_string(), 3u64);
        let response = CascadeDeleteResponse {
            deleted_guests: 2,
            deleted_relations: relations,
        };
        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["deletedGuests"], 2);
        assert_eq!(json["deletedRelations"]["gifts"], 3);
    }
}
