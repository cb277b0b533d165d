use std::time::{Duration, SystemTime, UNIX_EPOCH};

use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use thiserror::Error;

use crate::auth::claims::Claims;
use crate::state::security_config::SecurityConfig;
use crate::AppError;

/// Why a token failed to decode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TokenError {
    #[error("token is structurally invalid")]
    Malformed,
    #[error("token signature does not verify")]
    BadSignature,
    #[error("token has expired")]
    Expired,
}

/// Sign claims with the configured secret and algorithm.
pub fn encode_token(claims: &Claims, security: &SecurityConfig) -> Result<String, AppError> {
    encode(
        &Header::new(security.algorithm),
        claims,
        &EncodingKey::from_secret(&security.jwt_secret),
    )
    .map_err(|e| AppError::internal(format!("Failed to encode JWT: {e}")))
}

/// Decode and verify a token against the current wall clock.
pub fn decode_token(token: &str, security: &SecurityConfig) -> Result<Claims, TokenError> {
    decode_token_at(token, security, unix_now())
}

/// Decode and verify a token as of `now` (seconds since epoch).
///
/// The signature is checked before the payload is parsed, so a tampered
/// payload surfaces as `BadSignature`. A token is expired once `exp <= now`.
pub fn decode_token_at(
    token: &str,
    security: &SecurityConfig,
    now: i64,
) -> Result<Claims, TokenError> {
    // Expiry is checked below with no leeway; the library check is disabled.
    let mut validation = Validation::new(security.algorithm);
    validation.validate_exp = false;
    validation.leeway = 0;
    validation.set_required_spec_claims(&["sub", "exp"]);

    let claims = decode::<Claims>(
        token,
        &DecodingKey::from_secret(&security.jwt_secret),
        &validation,
    )
    .map(|data| data.claims)
    .map_err(|e| match e.kind() {
        ErrorKind::InvalidSignature | ErrorKind::InvalidAlgorithm => TokenError::BadSignature,
        _ => TokenError::Malformed,
    })?;

    if claims.exp <= now {
        return Err(TokenError::Expired);
    }
    Ok(claims)
}

/// Build claims with `iat = now` and `exp = now + lifetime`, then sign them.
pub fn mint_token(
    sub: &str,
    email: &str,
    now: SystemTime,
    lifetime: Duration,
    security: &SecurityConfig,
) -> Result<String, AppError> {
    let iat = now
        .duration_since(UNIX_EPOCH)
        .map_err(|_| AppError::internal("Failed to get current time"))?
        .as_secs() as i64;
    let lifetime = lifetime.as_secs() as i64;
    if lifetime <= 0 {
        return Err(AppError::config("token lifetime must be at least one second"));
    }

    let claims = Claims {
        sub: sub.to_string(),
        email: email.to_string(),
        iat,
        exp: iat + lifetime,
    };
    encode_token(&claims, security)
}

/// Mint an access token using the configured lifetime.
pub fn mint_access_token(
    sub: &str,
    email: &str,
    now: SystemTime,
    security: &SecurityConfig,
) -> Result<String, AppError> {
    mint_token(sub, email, now, security.token_ttl, security)
}

fn unix_now() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs() as i64)
        .unwrap_or(0)
}
