//! Error codes for the todo backend API.
//!
//! Add new codes here; never pass ad-hoc strings as error codes.
//! All codes are SCREAMING_SNAKE_CASE and map 1:1 to the `detail.code`
//! strings that appear in HTTP responses.

use core::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // Authentication (401)
    /// Authentication required
    Unauthorized,
    /// No bearer token on a request that needs one
    UnauthorizedMissingBearer,
    /// Token is malformed or its signature does not verify
    UnauthorizedInvalidJwt,
    /// Token has expired
    UnauthorizedExpiredJwt,

    // Authorization (403)
    /// Identity-scoped path requested without a bearer credential
    Forbidden,
    /// Token subject does not own the requested path
    ForbiddenUserMismatch,

    // Request validation
    ValidationError,
    BadRequest,
    InvalidTaskId,

    // Resource not found
    NotFound,
    TaskNotFound,
    UserNotFound,

    // Conflicts
    Conflict,
    EmailTaken,

    // System errors
    DbError,
    DbUnavailable,
    InternalServerError,
    ConfigError,

    /// Fallback for failure kinds without a table entry
    UnknownError,
}

impl ErrorCode {
    /// Returns the canonical SCREAMING_SNAKE_CASE string for this error code.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Unauthorized => "UNAUTHORIZED",
            Self::UnauthorizedMissingBearer => "UNAUTHORIZED_MISSING_BEARER",
            Self::UnauthorizedInvalidJwt => "UNAUTHORIZED_INVALID_JWT",
            Self::UnauthorizedExpiredJwt => "UNAUTHORIZED_EXPIRED_JWT",

            Self::Forbidden => "FORBIDDEN",
            Self::ForbiddenUserMismatch => "FORBIDDEN_USER_MISMATCH",

            Self::ValidationError => "VALIDATION_ERROR",
            Self::BadRequest => "BAD_REQUEST",
            Self::InvalidTaskId => "INVALID_TASK_ID",

            Self::NotFound => "NOT_FOUND",
            Self::TaskNotFound => "TASK_NOT_FOUND",
            Self::UserNotFound => "USER_NOT_FOUND",

            Self::Conflict => "CONFLICT",
            Self::EmailTaken => "EMAIL_TAKEN",

            Self::DbError => "DB_ERROR",
            Self::DbUnavailable => "DB_UNAVAILABLE",
            Self::InternalServerError => "INTERNAL_SERVER_ERROR",
            Self::ConfigError => "CONFIG_ERROR",

            Self::UnknownError => "UNKNOWN_ERROR",
        }
    }

    /// Generic code for a bare HTTP status, used when a framework-level
    /// failure carries nothing but a status.
    pub const fn for_status(status: u16) -> Self {
        match status {
            400 => Self::BadRequest,
            401 => Self::Unauthorized,
            403 => Self::Forbidden,
            404 => Self::NotFound,
            409 => Self::Conflict,
            422 => Self::ValidationError,
            500 => Self::InternalServerError,
            _ => Self::UnknownError,
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
