//! Table-driven mapping from internal failure kinds to the stable wire error shape.
//!
//! Nothing here depends on the HTTP framework: a failure kind becomes a plain
//! `(status, code, message, details)` tuple, which `AppError::error_response`
//! then serialises as
//!
//! ```json
//! {"detail": {"code": "...", "message": "...", "details": {}}}
//! ```

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::ErrorCode;

/// Structured detail map carried alongside an error.
pub type Details = Map<String, Value>;

/// Closed set of failure kinds the responder knows how to render.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    MissingCredential,
    InvalidCredential,
    IdentityMismatch,
    Unauthorized,
    Validation,
    BadRequest,
    NotFound,
    Conflict,
    Db,
    DbUnavailable,
    Internal,
    Config,
    Unknown,
}

/// (kind, status, default code, default message)
const FAILURE_TABLE: &[(FailureKind, u16, ErrorCode, &str)] = &[
    (
        FailureKind::MissingCredential,
        403,
        ErrorCode::Forbidden,
        "Not authenticated",
    ),
    (
        FailureKind::InvalidCredential,
        401,
        ErrorCode::Unauthorized,
        "Could not validate credentials",
    ),
    (
        FailureKind::IdentityMismatch,
        403,
        ErrorCode::ForbiddenUserMismatch,
        "Access denied: user ID mismatch",
    ),
    (
        FailureKind::Unauthorized,
        401,
        ErrorCode::Unauthorized,
        "Authentication required",
    ),
    (
        FailureKind::Validation,
        422,
        ErrorCode::ValidationError,
        "Validation failed",
    ),
    (
        FailureKind::BadRequest,
        400,
        ErrorCode::BadRequest,
        "Bad request",
    ),
    (FailureKind::NotFound, 404, ErrorCode::NotFound, "Not found"),
    (FailureKind::Conflict, 409, ErrorCode::Conflict, "Conflict"),
    (FailureKind::Db, 500, ErrorCode::DbError, "Database error"),
    (
        FailureKind::DbUnavailable,
        503,
        ErrorCode::DbUnavailable,
        "Database unavailable",
    ),
    (
        FailureKind::Internal,
        500,
        ErrorCode::InternalServerError,
        "Internal server error",
    ),
    (
        FailureKind::Config,
        500,
        ErrorCode::ConfigError,
        "Configuration error",
    ),
];

const FALLBACK: (u16, ErrorCode, &str) = (500, ErrorCode::UnknownError, "An error occurred");

/// Rendered error, independent of any HTTP library.
#[derive(Debug, Clone, PartialEq)]
pub struct ErrorParts {
    pub status: u16,
    pub code: ErrorCode,
    pub message: String,
    pub details: Details,
}

impl ErrorParts {
    /// Look the kind up in the table; kinds without a row render as `UNKNOWN_ERROR`/500.
    pub fn for_kind(kind: FailureKind) -> Self {
        let (status, code, message) = FAILURE_TABLE
            .iter()
            .find(|(k, ..)| *k == kind)
            .map(|(_, status, code, message)| (*status, *code, *message))
            .unwrap_or(FALLBACK);

        Self {
            status,
            code,
            message: message.to_string(),
            details: Details::new(),
        }
    }

    /// Render a bare status coming from outside the closed error taxonomy.
    pub fn for_status(status: u16, message: impl Into<String>) -> Self {
        Self {
            status,
            code: ErrorCode::for_status(status),
            message: message.into(),
            details: Details::new(),
        }
    }

    pub fn with_code(mut self, code: ErrorCode) -> Self {
        self.code = code;
        self
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    /// Attach details from the originating layer. Keys already present win.
    pub fn with_details(mut self, details: Details) -> Self {
        for (key, value) in details {
            self.details.entry(key).or_insert(value);
        }
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
    #[serde(default)]
    pub details: Details,
}

/// Wire envelope: `{"detail": {...}}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorEnvelope {
    pub detail: ErrorDetail,
}

impl From<ErrorParts> for ErrorEnvelope {
    fn from(parts: ErrorParts) -> Self {
        Self {
            detail: ErrorDetail {
                code: parts.code.as_str().to_string(),
                message: parts.message,
                details: parts.details,
            },
        }
    }
}
