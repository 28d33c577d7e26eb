//! Domain layer for the Event Planner backend.
//!
//! This crate contains:
//! - Domain models (Event, Guest, Expense, Gift, import ledger types)
//! - Business logic services (spreadsheet row mapping)

pub mod models;
pub mod services;
