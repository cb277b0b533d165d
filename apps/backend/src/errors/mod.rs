//! Error handling for the todo backend.

pub mod domain;
pub mod error_code;
pub mod responder;


pub use domain::DomainError;
pub use error_code::ErrorCode;
pub use responder::{ErrorDetail, ErrorEnvelope, ErrorParts};
