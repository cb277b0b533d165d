//! Assertions for the `{"detail": {"code", "message", "details"}}` error shape.
//!
//! Kept free of backend types so the contract is checked from the outside.

use actix_web::http::header::HeaderMap;
use actix_web::http::StatusCode;
use serde::Deserialize;
use serde_json::{Map, Value};

#[derive(Debug, Deserialize)]
pub struct ErrorDetailLike {
    pub code: String,
    pub message: String,
    pub details: Map<String, Value>,
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelopeLike {
    detail: ErrorDetailLike,
}

/// Check status, trace header and envelope; returns the parsed detail for
/// further assertions.
pub fn assert_error_envelope(
    status: StatusCode,
    headers: &HeaderMap,
    body: &[u8],
    expected_status: StatusCode,
    expected_code: &str,
) -> ErrorDetailLike {
    assert_eq!(status, expected_status, "unexpected status");

    let trace_id = headers
        .get("x-trace-id")
        .expect("x-trace-id header should be present")
        .to_str()
        .expect("x-trace-id header should be valid UTF-8");
    assert!(!trace_id.is_empty(), "x-trace-id should not be empty");

    let envelope: ErrorEnvelopeLike =
        serde_json::from_slice(body).expect("body should be an error envelope");
    assert_eq!(envelope.detail.code, expected_code);
    assert!(
        !envelope.detail.message.is_empty(),
        "message should not be empty"
    );
    envelope.detail
}

/// Same as [`assert_error_envelope`] for a test `ServiceResponse`.
pub async fn assert_error_response<B>(
    resp: actix_web::dev::ServiceResponse<B>,
    expected_status: StatusCode,
    expected_code: &str,
) -> ErrorDetailLike
where
    B: actix_web::body::MessageBody,
{
    let status = resp.status();
    let headers = resp.headers().clone();
    let body = actix_web::test::read_body(resp).await;
    assert_error_envelope(status, &headers, &body, expected_status, expected_code)
}
