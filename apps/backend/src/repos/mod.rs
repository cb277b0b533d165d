//! Repository functions for domain layer.

pub mod tasks;
pub mod users;
