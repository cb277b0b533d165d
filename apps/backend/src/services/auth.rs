//! Account sign-up and sign-in.

use std::time::SystemTime;

use actix_web::web;
use sea_orm::ConnectionTrait;
use time::OffsetDateTime;
use tracing::info;

use crate::auth::jwt::mint_access_token;
use crate::auth::password::{hash_password, verify_password};
use crate::error::AppError;
use crate::errors::domain::{ConflictKind, DomainError};
use crate::errors::ErrorCode;
use crate::logging::pii::Redacted;
use crate::logging::security;
use crate::repos::users::{self, User};
use crate::state::security_config::SecurityConfig;
use crate::validation::{normalize_email, validate_password, ValidationErrorKind};

const INVALID_LOGIN: &str = "Invalid email or password";

/// A user together with a freshly minted access token.
#[derive(Debug, Clone)]
pub struct AuthSession {
    pub user: User,
    pub token: String,
    /// Token lifetime in seconds.
    pub expires_in: u64,
}

fn open_session(user: User, security: &SecurityConfig) -> Result<AuthSession, AppError> {
    let token = mint_access_token(&user.id, &user.email, SystemTime::now(), security)?;
    Ok(AuthSession {
        user,
        token,
        expires_in: security.token_ttl.as_secs(),
    })
}

async fn hash_blocking(password: String) -> Result<String, AppError> {
    web::block(move || hash_password(&password))
        .await
        .map_err(|e| AppError::internal(format!("password hashing task failed: {e}")))?
}

/// Register a new account and sign it in.
pub async fn sign_up<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    security: &SecurityConfig,
    email: &str,
    password: &str,
    confirm_password: &str,
) -> Result<AuthSession, AppError> {
    let email = normalize_email(email)?;
    validate_password(password)?;
    if password != confirm_password {
        return Err(ValidationErrorKind::PasswordMismatch.into());
    }

    if users::find_user_by_email(conn, &email).await?.is_some() {
        return Err(DomainError::conflict(
            ConflictKind::UniqueEmail,
            "A user with this email already exists",
        )
        .into());
    }

    let hashed = hash_blocking(password.to_string()).await?;
    let user = users::create_user(conn, &email, &hashed).await?;

    info!(user_id = %user.id, email = %Redacted(&user.email), "New user registered");
    open_session(user, security)
}

/// Verify credentials, stamp `last_login_at` and mint a token.
///
/// Unknown email and wrong password produce the same error.
pub async fn sign_in<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    security: &SecurityConfig,
    email: &str,
    password: &str,
) -> Result<AuthSession, AppError> {
    let email = email.trim().to_lowercase();

    let Some(user) = users::find_user_by_email(conn, &email).await? else {
        security::login_failed("unknown_email", &email);
        return Err(AppError::unauthorized(ErrorCode::Unauthorized, INVALID_LOGIN));
    };

    let stored = user.hashed_password.clone();
    let candidate = password.to_string();
    let verified = web::block(move || verify_password(&candidate, &stored))
        .await
        .map_err(|e| AppError::internal(format!("password verification task failed: {e}")))?;
    if !verified {
        security::login_failed("wrong_password", &email);
        return Err(AppError::unauthorized(ErrorCode::Unauthorized, INVALID_LOGIN));
    }

    let user = users::record_login(conn, &user.id, OffsetDateTime::now_utc()).await?;

    info!(user_id = %user.id, "User signed in");
    open_session(user, security)
}
