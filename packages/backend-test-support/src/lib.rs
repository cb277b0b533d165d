//! Backend test support utilities
//!
//! Shared by unit and integration tests: one-time logging initialization,
//! error envelope assertions and unique test data.

pub mod error_envelope;
pub mod logging;
pub mod unique_helpers;
