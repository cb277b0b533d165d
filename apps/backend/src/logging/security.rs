use tracing::warn;

use crate::logging::pii::Redacted;
use crate::trace_ctx;

/// Log a request the isolation gate refused.
pub fn access_denied(path: &str, reason: &str) {
    let trace_id = trace_ctx::trace_id();

    warn!(
        event = "SECURITY_ACCESS_DENIED",
        %trace_id,
        path = %Redacted(path),
        reason,
        "Request denied by isolation gate"
    );
}

/// Log a failed sign-in attempt.
pub fn login_failed(reason: &str, email: &str) {
    let trace_id = trace_ctx::trace_id();

    warn!(
        event = "SECURITY_LOGIN_FAILED",
        %trace_id,
        email = %Redacted(email),
        reason,
        "Authentication failure"
    );
}
