//! Event domain models.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use uuid::Uuid;

/// Subscription plans available for event organizers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlanType {
    Free,
    Premium,
    Business,
}

impl PlanType {
    /// Get the default resource limits for this plan type.
    ///
    /// Returns `(limit_guests, limit_expenses)`; `0` means unlimited.
    pub fn default_limits(&self) -> (i32, i32) {
        match self {
            PlanType::Free => (200, 100),
            PlanType::Premium => (1000, 500),
            PlanType::Business => (0, 0),
        }
    }
}

impl FromStr for PlanType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "free" => Ok(PlanType::Free),
            "premium" => Ok(PlanType::Premium),
            "business" => Ok(PlanType::Business),
            _ => Err(format!("Unknown plan type: {}", s)),
        }
    }
}

impl std::fmt::Display for PlanType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PlanType::Free => write!(f, "free"),
            PlanType::Premium => write!(f, "premium"),
            PlanType::Business => write!(f, "business"),
        }
    }
}

/// Event domain model. The tenant scope for all guest, gift and expense data.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Event {
    pub id: Uuid,
    pub name: String,
    pub event_type: String,
    pub plan_type: PlanType,
    /// Maximum number of guests for this event; `0` means unlimited.
    pub limit_guests: i32,
    /// Maximum number of budget items for this event; `0` means unlimited.
    pub limit_expenses: i32,
    pub event_date: Option<NaiveDate>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plan_type_parse() {
        assert_eq!("free".parse::<PlanType>().unwrap(), PlanType::Free);
        assert_eq!("Premium".parse::<PlanType>().unwrap(), PlanType::Premium);
        assert!("gold".parse::<PlanType>().is_err());
    }

    #[test]
    fn test_plan_type_display_roundtrip() {
        for plan in [PlanType::Free, PlanType::Premium, PlanType::Business] {
            assert_eq!(plan.to_string().parse::<PlanType>().unwrap(), plan);
        }
    }

    #[test]
    fn test_business_plan_is_unlimited() {
        assert_eq!(PlanType::Business.default_limits(), (0, 0));
    }
}
