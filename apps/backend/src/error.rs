use actix_web::error::{JsonPayloadError, PathError, QueryPayloadError, ResponseError};
use actix_web::http::header::{HeaderValue, WWW_AUTHENTICATE};
use actix_web::http::StatusCode;
use actix_web::{HttpRequest, HttpResponse};
use serde_json::json;
use thiserror::Error;
use tracing::{debug, error};

use crate::auth::authenticator::AuthError;
use crate::errors::domain::{ConflictKind, DomainError, InfraErrorKind, NotFoundKind};
use crate::errors::responder::{Details, FailureKind};
use crate::errors::{ErrorCode, ErrorEnvelope, ErrorParts};
use crate::infra::db_errors::map_db_err;
use crate::logging::pii::Redacted;
use crate::trace_ctx;
use crate::validation::ValidationErrorKind;

#[derive(Error, Debug)]
pub enum AppError {
    /// Identity-scoped request arrived without a bearer credential.
    #[error("missing credential")]
    MissingCredential,
    #[error("invalid credential: {reason}")]
    InvalidCredential { reason: AuthError },
    #[error("identity mismatch")]
    IdentityMismatch,
    #[error("Unauthorized: {detail}")]
    Unauthorized { code: ErrorCode, detail: String },
    #[error("Validation error: {detail}")]
    Validation {
        code: ErrorCode,
        detail: String,
        details: Details,
    },
    #[error("Bad request: {detail}")]
    BadRequest { code: ErrorCode, detail: String },
    #[error("Not found: {detail}")]
    NotFound { code: ErrorCode, detail: String },
    #[error("Conflict: {detail}")]
    Conflict { code: ErrorCode, detail: String },
    #[error("Database error: {detail}")]
    Db { detail: String },
    #[error("Database unavailable: {detail}")]
    DbUnavailable { detail: String },
    #[error("Internal error: {detail}")]
    Internal { detail: String },
    #[error("Configuration error: {detail}")]
    Config { detail: String },
    /// Framework-level failure that only carries a status.
    #[error("HTTP {status}: {detail}")]
    Http { status: u16, detail: String },
    #[error("Unknown error: {detail}")]
    Unknown { detail: String },
}

impl AppError {
    pub fn kind(&self) -> FailureKind {
        match self {
            AppError::MissingCredential => FailureKind::MissingCredential,
            AppError::InvalidCredential { .. } => FailureKind::InvalidCredential,
            AppError::IdentityMismatch => FailureKind::IdentityMismatch,
            AppError::Unauthorized { .. } => FailureKind::Unauthorized,
            AppError::Validation { .. } => FailureKind::Validation,
            AppError::BadRequest { .. } => FailureKind::BadRequest,
            AppError::NotFound { .. } => FailureKind::NotFound,
            AppError::Conflict { .. } => FailureKind::Conflict,
            AppError::Db { .. } => FailureKind::Db,
            AppError::DbUnavailable { .. } => FailureKind::DbUnavailable,
            AppError::Internal { .. } => FailureKind::Internal,
            AppError::Config { .. } => FailureKind::Config,
            AppError::Http { .. } | AppError::Unknown { .. } => FailureKind::Unknown,
        }
    }

    /// Render into `(status, code, message, details)`.
    ///
    /// 5xx variants keep their table message; their detail is only logged.
    pub fn parts(&self) -> ErrorParts {
        let base = ErrorParts::for_kind(self.kind());
        match self {
            AppError::InvalidCredential { reason } => base.with_code(match reason {
                AuthError::Expired => ErrorCode::UnauthorizedExpiredJwt,
                AuthError::MissingCredential => ErrorCode::UnauthorizedMissingBearer,
                AuthError::MalformedToken | AuthError::BadSignature => {
                    ErrorCode::UnauthorizedInvalidJwt
                }
            }),
            AppError::Unauthorized { code, detail }
            | AppError::BadRequest { code, detail }
            | AppError::NotFound { code, detail }
            | AppError::Conflict { code, detail } => {
                base.with_code(*code).with_message(detail.clone())
            }
            AppError::Validation {
                code,
                detail,
                details,
            } => base
                .with_code(*code)
                .with_message(detail.clone())
                .with_details(details.clone()),
            AppError::Http { status, detail } => ErrorParts::for_status(*status, detail.clone()),
            _ => base,
        }
    }

    pub fn invalid_credential(reason: AuthError) -> Self {
        Self::InvalidCredential { reason }
    }

    pub fn unauthorized(code: ErrorCode, detail: impl Into<String>) -> Self {
        Self::Unauthorized {
            code,
            detail: detail.into(),
        }
    }

    pub fn invalid(code: ErrorCode, detail: impl Into<String>) -> Self {
        Self::Validation {
            code,
            detail: detail.into(),
            details: Details::new(),
        }
    }

    pub fn bad_request(code: ErrorCode, detail: impl Into<String>) -> Self {
        Self::BadRequest {
            code,
            detail: detail.into(),
        }
    }

    pub fn not_found(code: ErrorCode, detail: impl Into<String>) -> Self {
        Self::NotFound {
            code,
            detail: detail.into(),
        }
    }

    pub fn conflict(code: ErrorCode, detail: impl Into<String>) -> Self {
        Self::Conflict {
            code,
            detail: detail.into(),
        }
    }

    pub fn db(detail: impl Into<String>) -> Self {
        Self::Db {
            detail: detail.into(),
        }
    }

    pub fn db_unavailable(detail: impl Into<String>) -> Self {
        Self::DbUnavailable {
            detail: detail.into(),
        }
    }

    pub fn internal(detail: impl Into<String>) -> Self {
        Self::Internal {
            detail: detail.into(),
        }
    }

    pub fn config(detail: impl Into<String>) -> Self {
        Self::Config {
            detail: detail.into(),
        }
    }

    pub fn http(status: u16, detail: impl Into<String>) -> Self {
        Self::Http {
            status,
            detail: detail.into(),
        }
    }
}

impl From<ValidationErrorKind> for AppError {
    fn from(kind: ValidationErrorKind) -> Self {
        let mut details = Details::new();
        details.insert("field".into(), json!(kind.field()));
        AppError::Validation {
            code: ErrorCode::ValidationError,
            detail: kind.to_string(),
            details,
        }
    }
}

impl From<DomainError> for AppError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::Validation(kind) => kind.into(),
            DomainError::Conflict(ConflictKind::UniqueEmail, detail) => {
                AppError::conflict(ErrorCode::EmailTaken, detail)
            }
            DomainError::Conflict(_, detail) => AppError::conflict(ErrorCode::Conflict, detail),
            DomainError::NotFound(NotFoundKind::User, detail) => {
                AppError::not_found(ErrorCode::UserNotFound, detail)
            }
            DomainError::NotFound(NotFoundKind::Task, detail) => {
                AppError::not_found(ErrorCode::TaskNotFound, detail)
            }
            DomainError::NotFound(_, detail) => AppError::not_found(ErrorCode::NotFound, detail),
            DomainError::Infra(InfraErrorKind::DbUnavailable | InfraErrorKind::Timeout, detail) => {
                AppError::db_unavailable(detail)
            }
            DomainError::Infra(_, detail) => AppError::db(detail),
        }
    }
}

impl From<sea_orm::DbErr> for AppError {
    fn from(e: sea_orm::DbErr) -> Self {
        map_db_err(e).into()
    }
}

impl From<std::env::VarError> for AppError {
    fn from(e: std::env::VarError) -> Self {
        AppError::config(format!("env var error: {e}"))
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        StatusCode::from_u16(self.parts().status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }

    fn error_response(&self) -> HttpResponse {
        let parts = self.parts();
        let status = self.status_code();
        let trace_id = trace_ctx::trace_id();

        if status.is_server_error() {
            error!(
                trace_id = %trace_id,
                code = %parts.code,
                error = %Redacted(&self.to_string()),
                "Request failed"
            );
        }

        let mut builder = HttpResponse::build(status);
        builder
            .content_type("application/json")
            .insert_header(("x-trace-id", trace_id));
        if status == StatusCode::UNAUTHORIZED {
            builder.insert_header((WWW_AUTHENTICATE, HeaderValue::from_static("Bearer")));
        }
        builder.json(ErrorEnvelope::from(parts))
    }
}

/// `JsonConfig` error handler: type mismatches are 422, everything else 400.
pub fn json_error_handler(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    debug!(error = %Redacted(&err.to_string()), "JSON payload rejected");
    let app_err = match &err {
        JsonPayloadError::Deserialize(e) if e.is_data() => AppError::invalid(
            ErrorCode::ValidationError,
            "Invalid JSON: wrong types for one or more fields",
        ),
        JsonPayloadError::Deserialize(_) => {
            AppError::bad_request(ErrorCode::BadRequest, "Invalid JSON body")
        }
        JsonPayloadError::ContentType => AppError::bad_request(
            ErrorCode::BadRequest,
            "Content-Type must be application/json",
        ),
        _ => AppError::bad_request(ErrorCode::BadRequest, "Failed to read request body"),
    };
    app_err.into()
}

pub fn query_error_handler(err: QueryPayloadError, _req: &HttpRequest) -> actix_web::Error {
    debug!(error = %err, "query string rejected");
    AppError::invalid(ErrorCode::ValidationError, "Invalid query parameters").into()
}

pub fn path_error_handler(err: PathError, _req: &HttpRequest) -> actix_web::Error {
    debug!(error = %err, "path parameters rejected");
    AppError::bad_request(ErrorCode::BadRequest, "Invalid path parameters").into()
}
