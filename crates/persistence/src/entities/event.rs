//! Event entity (database row mapping).

use chrono::{DateTime, NaiveDate, Utc};
use domain::models::event::PlanType;
use sqlx::FromRow;
use uuid::Uuid;

/// Database enum for plan_type that maps to the PostgreSQL enum type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, sqlx::Type)]
#[sqlx(type_name = "plan_type", rename_all = "lowercase")]
pub enum PlanTypeDb {
    Free,
    Premium,
    Business,
}

impl From<PlanTypeDb> for PlanType {
    fn from(db_plan: PlanTypeDb) -> Self {
        match db_plan {
            PlanTypeDb::Free => PlanType::Free,
            PlanTypeDb::Premium => PlanType::Premium,
            PlanTypeDb::Business => PlanType::Business,
        }
    }
}

impl From<PlanType> for PlanTypeDb {
    fn from(plan: PlanType) -> Self {
        match plan {
            PlanType::Free => PlanTypeDb::Free,
            PlanType::Premium => PlanTypeDb::Premium,
            PlanType::Business => PlanTypeDb::Business,
        }
    }
}

/// Database row mapping for the events table.
#[derive(Debug, Clone, FromRow)]
pub struct EventEntity {
    pub id: Uuid,
    pub name: String,
    pub event_type: String,
    pub plan_type: PlanTypeDb,
    pub limit_guests: i32,
    pub limit_expenses: i32,
    pub event_date: Option<NaiveDate>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<EventEntity> for domain::models::Event {
    fn from(entity: EventEntity) -> Self {
        Self {
            id: entity.id,
            name: entity.name,
            event_type: entity.event_type,
            plan_type: entity.plan_type.into(),
            limit_guests: entity.limit_guests,
            limit_expenses: entity.limit_expenses,
            event_date: entity.event_date,
            is_active: entity.is_active,
            created_at: entity.created_at,
            updated_at: entity.updated_at,
        }
    }
}
