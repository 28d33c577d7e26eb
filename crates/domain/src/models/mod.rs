//! Domain models for the Event Planner backend.

pub mod event;
pub mod expense;
pub mod gift;
pub mod guest;
pub mod import;

pub use event::{Event, PlanType};
pub use expense::{Expense, NewExpense, Payment};
pub use gift::Gift;
pub use guest::{CascadeDeleteResponse, DeleteGuestsRequest, Guest, GuestStatus, NewGuest};
pub use import::{ExportKind, ImportKind, ImportResult, RowError, IMPORT_BATCH_SIZE};
