use actix_web::http::header::{HeaderMap, AUTHORIZATION};

/// Token part of an `Authorization: Bearer <token>` header.
///
/// Returns `None` when the header is absent, not valid UTF-8, or uses
/// another scheme. `Bearer ` with nothing after it yields `Some("")`.
pub fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    let value = headers.get(AUTHORIZATION)?.to_str().ok()?;
    value.strip_prefix("Bearer ").map(str::trim)
}
