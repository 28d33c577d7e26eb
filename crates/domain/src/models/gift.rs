//! Monetary gift domain models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A monetary gift received from a guest, scoped to one event.
///
/// Gifts are created through the single-record endpoints (out of this core's
/// scope); this core exports them and removes them when their guest is
/// cascade-deleted.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Gift {
    pub id: Uuid,
    pub event_id: Uuid,
    pub guest_id: Uuid,
    /// How the gift was handed over, e.g. "cash" or "bank".
    pub payment_type: String,
    /// Currency the gift was given in, e.g. "usd" or "khr".
    pub currency_type: String,
    pub amount_usd: f64,
    pub amount_khr: f64,
    pub note: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
