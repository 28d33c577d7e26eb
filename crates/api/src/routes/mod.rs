//! HTTP route handlers.

pub mod exports;
pub mod guests;
pub mod health;
pub mod imports;
