//! Shared utilities for the Event Planner backend.
//!
//! This crate provides common functionality used across all other crates:
//! - Spreadsheet (xlsx) reading and writing
//! - Field validation helpers

pub mod spreadsheet;
pub mod validation;
