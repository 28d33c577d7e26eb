//! Expense entities (database row mappings).

use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

/// Database row mapping for the expenses table.
#[derive(Debug, Clone, FromRow)]
pub struct ExpenseEntity {
    pub id: Uuid,
    pub event_id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub budget_amount: f64,
    pub actual_amount: f64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<ExpenseEntity> for domain::models::Expense {
    fn from(entity: ExpenseEntity) -> Self {
        Self {
            id: entity.id,
            event_id: entity.event_id,
            name: entity.name,
            description: entity.description,
            budget_amount: entity.budget_amount,
            actual_amount: entity.actual_amount,
            created_at: entity.created_at,
            updated_at: entity.updated_at,
        }
    }
}

/// Expense LEFT JOIN payment row for export fan-out: one row per payment,
/// payment columns NULL when the expense has none.
#[derive(Debug, Clone, FromRow)]
pub struct ExpenseExportRowEntity {
    pub expense_id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub budget_amount: f64,
    pub actual_amount: f64,
    pub payment_name: Option<String>,
    pub payment_amount: Option<f64>,
    pub paid_at: Option<DateTime<Utc>>,
    pub payment_note: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
