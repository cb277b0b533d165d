//! Turns a raw bearer token into a verified identity.

use thiserror::Error;
use tracing::debug;

use crate::auth::jwt::{decode_token, TokenError};
use crate::state::security_config::SecurityConfig;
use crate::trace_ctx;

/// Identity proven by a valid token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub subject: String,
    pub email: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum AuthError {
    #[error("no credential supplied")]
    MissingCredential,
    #[error("malformed token")]
    MalformedToken,
    #[error("bad signature")]
    BadSignature,
    #[error("token expired")]
    Expired,
}

impl AuthError {
    /// Machine code used in logs.
    pub const fn reason_code(&self) -> &'static str {
        match self {
            AuthError::MissingCredential => "missing_credential",
            AuthError::MalformedToken => "malformed_token",
            AuthError::BadSignature => "bad_signature",
            AuthError::Expired => "token_expired",
        }
    }
}

impl From<TokenError> for AuthError {
    fn from(e: TokenError) -> Self {
        match e {
            TokenError::Malformed => AuthError::MalformedToken,
            TokenError::BadSignature => AuthError::BadSignature,
            TokenError::Expired => AuthError::Expired,
        }
    }
}

pub trait Authenticate {
    fn authenticate(&self, token: &str) -> Result<Identity, AuthError>;
}

/// Token-backed authenticator over the process-wide security config.
#[derive(Debug, Clone, Copy)]
pub struct Authenticator<'a> {
    security: &'a SecurityConfig,
}

impl<'a> Authenticator<'a> {
    pub fn new(security: &'a SecurityConfig) -> Self {
        Self { security }
    }
}

impl Authenticate for Authenticator<'_> {
    fn authenticate(&self, token: &str) -> Result<Identity, AuthError> {
        let token = token.trim();
        if token.is_empty() {
            debug!(trace_id = %trace_ctx::trace_id(), reason = "missing_credential", "authentication failed");
            return Err(AuthError::MissingCredential);
        }

        match decode_token(token, self.security) {
            Ok(claims) => Ok(Identity {
                subject: claims.sub,
                email: claims.email,
            }),
            Err(e) => {
                let err = AuthError::from(e);
                debug!(
                    trace_id = %trace_ctx::trace_id(),
                    reason = err.reason_code(),
                    "authentication failed"
                );
                Err(err)
            }
        }
    }
}
