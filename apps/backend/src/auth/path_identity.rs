//! Finds the identity a request path claims to act for.

/// Default identity-scoped namespace.
pub const DEFAULT_RESOURCE_ROOT: &str = "api";

/// Recognises `/<root>/<identity>(/...)`.
///
/// Every path inside the root is identity-scoped, including `/api` and
/// `/api/`, which claim the empty identity. Matching is case-sensitive.
///
/// Callers pass the routing path, already percent-decoded. Leading slashes
/// are collapsed, and a first segment that still carries an escape
/// (`%2F`, `%25`) is treated as scoped with the empty identity, so it can
/// never be allowed.
#[derive(Debug, Clone)]
pub struct PathIdentityExtractor {
    resource_root: String,
}

impl PathIdentityExtractor {
    pub fn new(resource_root: impl Into<String>) -> Self {
        Self {
            resource_root: resource_root.into(),
        }
    }

    pub fn resource_root(&self) -> &str {
        &self.resource_root
    }

    pub fn extract_claimed_identity<'p>(&self, path: &'p str) -> Option<&'p str> {
        let rest = path.trim_start_matches('/');
        let mut segments = rest.splitn(3, '/');
        let root = segments.next()?;
        if root.contains('%') {
            return Some("");
        }
        if root != self.resource_root {
            return None;
        }
        Some(segments.next().unwrap_or(""))
    }
}

impl Default for PathIdentityExtractor {
    fn default() -> Self {
        Self::new(DEFAULT_RESOURCE_ROOT)
    }
}
