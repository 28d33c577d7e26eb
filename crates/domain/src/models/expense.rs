//! Budget item (expense) domain models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// Budget line item, scoped to one event.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Expense {
    pub id: Uuid,
    pub event_id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub budget_amount: f64,
    pub actual_amount: f64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A payment recorded against an expense.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Payment {
    pub id: Uuid,
    pub expense_id: Uuid,
    pub name: Option<String>,
    pub amount: f64,
    pub paid_at: Option<DateTime<Utc>>,
    pub note: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Input for creating an expense (single-record endpoint or import row).
#[derive(Debug, Clone, Validate)]
pub struct NewExpense {
    #[validate(length(min = 1, max = 255, message = "name must be 1-255 characters"))]
    pub name: String,
    pub description: Option<String>,
    #[validate(custom(function = "shared::validation::validate_amount"))]
    pub budget_amount: f64,
    #[validate(custom(function = "shared::validation::validate_amount"))]
    pub actual_amount: f64,
}

impl Default for NewExpense {
    fn default() -> Self {
        Self {
            name: String::new(),
            description: None,
            budget_amount: 0.0,
            actual_amount: 0.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_expense_rejects_negative_budget() {
        let expense = NewExpense {
            name: "Catering".to_string(),
            budget_amount: -10.0,
            ..NewExpense::default()
        };
        assert!(expense.validate().is_err());
    }

    #[test]
    fn test_new_expense_defaults() {
        let expense = NewExpense::default();
        assert_eq!(expense.budget_amount, 0.0);
        assert_eq!(expense.actual_amount, 0.0);
    }
}
