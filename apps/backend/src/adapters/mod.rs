//! Adapters for external dependencies.

pub mod tasks_sea;
pub mod users_sea;
