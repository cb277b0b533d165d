use actix_cors::Cors;
use actix_web::http::header;

use crate::config::app::DEFAULT_CORS_ORIGINS;

/// Build CORS middleware with an explicit configuration:
/// - only the given origins (blank, `null` and non-http(s) entries are ignored)
/// - only the methods the API uses
/// - credentials allowed, trace headers exposed
///
/// Preflight requests are answered here and never reach the isolation gate.
pub fn cors_middleware(origins: &[String]) -> Cors {
    let mut allowed: Vec<&str> = origins
        .iter()
        .map(|s| s.trim())
        .filter(|s| !s.is_empty() && *s != "null")
        .filter(|s| s.starts_with("http://") || s.starts_with("https://"))
        .collect();

    if allowed.is_empty() {
        allowed = DEFAULT_CORS_ORIGINS.to_vec();
    }

    let mut cors = Cors::default()
        .allowed_methods(vec!["GET", "POST", "PUT", "PATCH", "DELETE", "OPTIONS"])
        .allowed_headers(vec![
            header::AUTHORIZATION,
            header::CONTENT_TYPE,
            header::ACCEPT,
        ])
        .expose_headers(vec![
            header::HeaderName::from_static("x-trace-id"),
            header::HeaderName::from_static("x-request-id"),
        ])
        .supports_credentials()
        .max_age(3600);

    for origin in allowed {
        cors = cors.allowed_origin(origin);
    }

    cors
}
