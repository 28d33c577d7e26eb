//! Gift entity (database row mapping).

use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

/// Gift row joined with its guest's name and phone, for export.
#[derive(Debug, Clone, FromRow)]
pub struct GiftExportRowEntity {
    pub id: Uuid,
    pub event_id: Uuid,
    pub guest_name: String,
    pub guest_phone: Option<String>,
    pub payment_type: String,
    pub currency_type: String,
    pub amount_usd: f64,
    pub amount_khr: f64,
    pub note: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
