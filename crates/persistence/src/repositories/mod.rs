//! Repository implementations.

pub mod event;
pub mod expense;
pub mod gift;
pub mod guest;

pub use event::EventRepository;
pub use expense::{ExpenseInsertOutcome, ExpenseRepository};
pub use gift::GiftRepository;
pub use guest::{CascadeDeleteCounts, GuestInsertOutcome, GuestRepository};
