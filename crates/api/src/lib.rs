//! Event Planner API crate.
//!
//! HTTP surface for spreadsheet import/export and guest management,
//! layered over the domain and persistence crates.

pub mod app;
pub mod config;
pub mod error;
pub mod middleware;
pub mod routes;
pub mod services;
