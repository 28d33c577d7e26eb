//! Entity definitions (database row mappings).

pub mod event;
pub mod expense;
pub mod gift;
pub mod guest;

pub use event::{EventEntity, PlanTypeDb};
pub use expense::{ExpenseEntity, ExpenseExportRowEntity};
pub use gift::GiftExportRowEntity;
pub use guest::{GuestEntity, GuestExportRowEntity, GuestStatusDb};
