//! Guest entity (database row mapping).

use chrono::{DateTime, Utc};
use domain::models::guest::GuestStatus;
use sqlx::FromRow;
use uuid::Uuid;

/// Database enum for guest_status that maps to the PostgreSQL enum type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, sqlx::Type)]
#[sqlx(type_name = "guest_status", rename_all = "lowercase")]
pub enum GuestStatusDb {
    Pending,
    Confirmed,
    Rejected,
}

impl From<GuestStatusDb> for GuestStatus {
    fn from(db_status: GuestStatusDb) -> Self {
        match db_status {
            GuestStatusDb::Pending => GuestStatus::Pending,
            GuestStatusDb::Confirmed => GuestStatus::Confirmed,
            GuestStatusDb::Rejected => GuestStatus::Rejected,
        }
    }
}

impl From<GuestStatus> for GuestStatusDb {
    fn from(status: GuestStatus) -> Self {
        match status {
            GuestStatus::Pending => GuestStatusDb::Pending,
            GuestStatus::Confirmed => GuestStatusDb::Confirmed,
            GuestStatus::Rejected => GuestStatusDb::Rejected,
        }
    }
}

/// Database row mapping for the guests table.
#[derive(Debug, Clone, FromRow)]
pub struct GuestEntity {
    pub id: Uuid,
    pub event_id: Uuid,
    pub name: String,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub address: Option<String>,
    pub note: Option<String>,
    pub status: GuestStatusDb,
    pub wishing_note: Option<String>,
    pub party_size: i32,
    pub is_invited: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<GuestEntity> for domain::models::Guest {
    fn from(entity: GuestEntity) -> Self {
        Self {
            id: entity.id,
            event_id: entity.event_id,
            name: entity.name,
            phone: entity.phone,
            email: entity.email,
            address: entity.address,
            note: entity.note,
            status: entity.status.into(),
            wishing_note: entity.wishing_note,
            party_size: entity.party_size,
            is_invited: entity.is_invited,
            created_at: entity.created_at,
            updated_at: entity.updated_at,
        }
    }
}

/// Guest row extended with aggregated tag and group names, for export.
#[derive(Debug, Clone, FromRow)]
pub struct GuestExportRowEntity {
    pub id: Uuid,
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub note: Option<String>,
    pub status: GuestStatusDb,
    pub wishing_note: Option<String>,
    pub party_size: i32,
    pub is_invited: bool,
    /// Comma-joined tag names, NULL when untagged.
    pub tags: Option<String>,
    /// Comma-joined group names, NULL when ungrouped.
    pub groups: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
