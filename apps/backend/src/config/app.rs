//! Application configuration loaded once from environment variables.

use std::env;
use std::time::Duration;

use tracing::warn;

use crate::config::db::{db_url, DbProfile};
use crate::error::AppError;
use crate::state::security_config::SecurityConfig;

pub const DEFAULT_TOKEN_TTL_MINUTES: u64 = 30;
pub const DEFAULT_CORS_ORIGINS: &[&str] = &["http://localhost:3000", "http://127.0.0.1:3000"];

const MIN_RECOMMENDED_SECRET_LEN: usize = 32;

#[derive(Debug, Clone)]
pub struct AppConfig {
    // Server configuration
    pub host: String,
    pub port: u16,

    // Database configuration
    pub database_url: String,

    // Security configuration
    pub jwt_secret: String,
    pub token_ttl_minutes: u64,

    // Allowed browser origins
    pub cors_origins: Vec<String>,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, AppError> {
        let host = env::var("BACKEND_HOST").unwrap_or_else(|_| "0.0.0.0".to_string());

        let port_str = env::var("BACKEND_PORT").unwrap_or_else(|_| "8000".to_string());
        let port = port_str.parse::<u16>().map_err(|_| {
            AppError::config(format!(
                "BACKEND_PORT must be a valid port number, got '{port_str}'"
            ))
        })?;

        let jwt_secret = match env::var("BACKEND_JWT_SECRET") {
            Ok(secret) if !secret.trim().is_empty() => secret,
            _ => return Err(AppError::config("BACKEND_JWT_SECRET must be set")),
        };
        if jwt_secret.len() < MIN_RECOMMENDED_SECRET_LEN {
            warn!(
                len = jwt_secret.len(),
                "BACKEND_JWT_SECRET is shorter than {MIN_RECOMMENDED_SECRET_LEN} characters"
            );
        }

        let token_ttl_minutes = match env::var("ACCESS_TOKEN_EXPIRE_MINUTES") {
            Ok(raw) => parse_ttl_minutes(&raw)?,
            Err(_) => DEFAULT_TOKEN_TTL_MINUTES,
        };

        let cors_origins = env::var("CORS_ALLOWED_ORIGINS")
            .map(|raw| parse_origins(&raw))
            .unwrap_or_else(|_| default_origins());

        let database_url = db_url(DbProfile::Prod)?;

        Ok(AppConfig {
            host,
            port,
            database_url,
            jwt_secret,
            token_ttl_minutes,
            cors_origins,
        })
    }

    pub fn security(&self) -> SecurityConfig {
        SecurityConfig::new(self.jwt_secret.as_bytes())
            .with_token_ttl(Duration::from_secs(self.token_ttl_minutes * 60))
    }
}

fn parse_ttl_minutes(raw: &str) -> Result<u64, AppError> {
    match raw.trim().parse::<u64>() {
        Ok(minutes) if minutes > 0 => Ok(minutes),
        _ => Err(AppError::config(format!(
            "ACCESS_TOKEN_EXPIRE_MINUTES must be a positive integer, got '{raw}'"
        ))),
    }
}

/// Comma separated list; blanks dropped. An empty result falls back to the defaults.
fn parse_origins(raw: &str) -> Vec<String> {
    let origins: Vec<String> = raw
        .split(',')
        .map(str::trim)
        .filter(|o| !o.is_empty())
        .map(str::to_string)
        .collect();
    if origins.is_empty() {
        default_origins()
    } else {
        origins
    }
}

fn default_origins() -> Vec<String> {
    DEFAULT_CORS_ORIGINS.iter().map(|o| o.to_string()).collect()
}
