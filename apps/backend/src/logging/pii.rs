use std::fmt;
use std::sync::LazyLock;

use regex::Regex;

// Vetted literals; construction cannot fail.
#[allow(clippy::unwrap_used)]
static EMAIL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b([A-Za-z0-9._%+-])[A-Za-z0-9._%+-]*(@[A-Za-z0-9.-]+\.[A-Za-z]+)\b").unwrap());

#[allow(clippy::unwrap_used)]
static JWT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\beyJ[A-Za-z0-9_-]*\.[A-Za-z0-9_-]+\.[A-Za-z0-9_-]*").unwrap()
});

#[allow(clippy::unwrap_used)]
static OPAQUE_TOKEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b[A-Za-z0-9+/]{24,}={0,2}").unwrap());

/// Mask emails (keep first character and domain), JWTs and long opaque tokens.
pub fn redact(input: &str) -> String {
    let out = EMAIL.replace_all(input, "$1***$2");
    let out = JWT.replace_all(&out, "[REDACTED_JWT]");
    OPAQUE_TOKEN
        .replace_all(&out, "[REDACTED_TOKEN]")
        .into_owned()
}

/// Display wrapper that redacts on format, for use in log fields.
pub struct Redacted<'a>(pub &'a str);

impl fmt::Display for Redacted<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&redact(self.0))
    }
}

impl fmt::Debug for Redacted<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&redact(self.0))
    }
}
