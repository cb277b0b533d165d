#![deny(clippy::wildcard_imports)]
#![cfg_attr(test, allow(clippy::wildcard_imports))]

pub mod adapters;
pub mod auth;
pub mod config;
pub mod db;
pub mod entities;
pub mod error;
pub mod errors;
pub mod extractors;
pub mod infra;
pub mod logging;
pub mod middleware;
pub mod pipeline;
pub mod repos;
pub mod routes;
pub mod services;
pub mod state;
pub mod trace_ctx;
pub mod validation;

// Re-exports for public API
pub use auth::jwt::{decode_token, encode_token, mint_access_token, mint_token, TokenError};
pub use auth::{AuthError, Authenticate, Authenticator, Claims, Identity, PathIdentityExtractor};
pub use config::app::AppConfig;
pub use config::db::{db_url, DbProfile};
pub use error::AppError;
pub use errors::ErrorCode;
pub use extractors::{CurrentUser, TaskId, ValidatedJson};
pub use infra::db::connect_db;
pub use middleware::isolation_gate::{decide, GateDecision, GateDenial, IsolationGate};
pub use pipeline::build_app;
pub use state::app_state::AppState;
pub use state::security_config::SecurityConfig;

// Auto-initialize logging for unit tests
#[cfg(test)]
#[ctor::ctor]
fn init_test_logging() {
    backend_test_support::logging::init();
}
