//! Declarative access policy.
//!
//! An ordered list of path rules evaluated first-match. Paths with no
//! matching rule require authentication, so forgetting to register a
//! route fails closed rather than open.

use std::sync::Arc;

use axum::extract::Request;
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use tracing::debug;

use crate::application::authenticate::AuthenticatedContext;
use crate::error::AuthError;

/// One path rule. Built through [`AccessPolicy::public`] and
/// [`AccessPolicy::protected`].
#[derive(Debug, Clone)]
struct AccessRule {
    pattern: String,
    requires_auth: bool,
}

/// Ordered access rules with a fail-closed default.
///
/// Patterns are matched against the request path in insertion order
/// and the first match wins:
/// - `*` matches every path
/// - a pattern ending in `/*` matches the prefix and everything below
///   it (`/auth/*` matches `/auth/signin` and `/auth`, not `/authx`)
/// - any other pattern matches exactly
#[derive(Debug, Clone, Default)]
pub struct AccessPolicy {
    rules: Vec<AccessRule>,
}

impl AccessPolicy {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a rule allowing anonymous access to matching paths.
    pub fn public(mut self, pattern: impl Into<String>) -> Self {
        self.rules.push(AccessRule {
            pattern: pattern.into(),
            requires_auth: false,
        });
        self
    }

    /// Append a rule requiring authentication for matching paths.
    pub fn protected(mut self, pattern: impl Into<String>) -> Self {
        self.rules.push(AccessRule {
            pattern: pattern.into(),
            requires_auth: true,
        });
        self
    }

    /// Whether `path` requires an authenticated principal.
    ///
    /// First matching rule decides; no match means auth required.
    pub fn requires_auth(&self, path: &str) -> bool {
        self.rules
            .iter()
            .find(|rule| Self::matches(&rule.pattern, path))
            .map(|rule| rule.requires_auth)
            .unwrap_or(true)
    }

    fn matches(pattern: &str, path: &str) -> bool {
        if pattern == "*" {
            return true;
        }
        if let Some(prefix) = pattern.strip_suffix("/*") {
            return path == prefix || path.starts_with(&format!("{prefix}/"));
        }
        pattern == path
    }
}

/// Enforce the access policy against the authenticated context that
/// the request authenticator may have attached upstream.
pub async fn enforce_access_policy(
    policy: Arc<AccessPolicy>,
    request: Request,
    next: Next,
) -> Response {
    let path = request.uri().path();

    if !policy.requires_auth(path) {
        return next.run(request).await;
    }

    if request.extensions().get::<AuthenticatedContext>().is_none() {
        debug!(%path, "Access denied: no authenticated principal");
        return AuthError::AuthorizationDenied.into_response();
    }

    next.run(request).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unmatched_path_requires_auth() {
        let policy = AccessPolicy::new().public("/auth/*");
        assert!(policy.requires_auth("/me"));
        assert!(policy.requires_auth("/"));
    }

    #[test]
    fn empty_policy_requires_auth_everywhere() {
        let policy = AccessPolicy::new();
        assert!(policy.requires_auth("/anything"));
    }

    #[test]
    fn prefix_wildcard_covers_subtree_and_root() {
        let policy = AccessPolicy::new().public("/auth/*");
        assert!(!policy.requires_auth("/auth/signin"));
        assert!(!policy.requires_auth("/auth/signup"));
        assert!(!policy.requires_auth("/auth"));
    }

    #[test]
    fn prefix_wildcard_does_not_match_sibling_prefix() {
        let policy = AccessPolicy::new().public("/auth/*");
        assert!(policy.requires_auth("/authx"));
        assert!(policy.requires_auth("/authx/signin"));
    }

    #[test]
    fn first_match_wins() {
        let policy = AccessPolicy::new()
            .protected("/auth/admin/*")
            .public("/auth/*");
        assert!(policy.requires_auth("/auth/admin/keys"));
        assert!(!policy.requires_auth("/auth/signin"));
    }

    #[test]
    fn exact_pattern_matches_only_itself() {
        let policy = AccessPolicy::new().public("/healthz");
        assert!(!policy.requires_auth("/healthz"));
        assert!(policy.requires_auth("/healthz/deep"));
    }

    #[test]
    fn star_matches_everything() {
        let policy = AccessPolicy::new().public("*");
        assert!(!policy.requires_auth("/me"));
        assert!(!policy.requires_auth("/"));
    }
}
