//! Application services sitting between routes and repositories.

pub mod delete;
pub mod export;
pub mod import;
pub mod quota;
