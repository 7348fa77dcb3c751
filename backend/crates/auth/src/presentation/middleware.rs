//! Request authentication middleware.
//!
//! Runs on every request. Reads the `Authorization` header, validates
//! the bearer token, and attaches an [`AuthenticatedContext`] to the
//! request extensions on success. A missing, malformed, tampered or
//! expired token never aborts the pipeline here; the request simply
//! continues without a context and the access policy decides its fate.

use std::sync::Arc;

use axum::extract::Request;
use axum::http::header;
use axum::http::HeaderMap;
use axum::middleware::Next;
use axum::response::Response;
use tracing::debug;

use crate::application::authenticate::{AuthenticateRequestUseCase, AuthenticatedContext};
use crate::application::config::AuthConfig;
use crate::domain::repository::PrincipalRepository;

/// State for the request authenticator layer.
pub struct AuthenticatorState<R> {
    pub repo: Arc<R>,
    pub config: Arc<AuthConfig>,
}

impl<R> Clone for AuthenticatorState<R> {
    fn clone(&self) -> Self {
        Self {
            repo: Arc::clone(&self.repo),
            config: Arc::clone(&self.config),
        }
    }
}

impl<R> AuthenticatorState<R> {
    pub fn new(repo: Arc<R>, config: Arc<AuthConfig>) -> Self {
        Self { repo, config }
    }
}

/// Extract the bearer token from the `Authorization` header.
///
/// Returns `None` when the header is absent, not valid UTF-8, or does
/// not carry the `Bearer ` scheme prefix.
pub fn extract_bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(header::AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
}

/// Authenticate the request if a bearer token is present.
///
/// Outcomes:
/// - no token: pass through untouched
/// - valid token, known principal: [`AuthenticatedContext`] attached
/// - anything else: logged at debug, request passes through anonymous
pub async fn authenticate_request<R>(
    state: AuthenticatorState<R>,
    mut request: Request,
    next: Next,
) -> Response
where
    R: PrincipalRepository + Send + Sync + 'static,
{
    if let Some(token) = extract_bearer_token(request.headers()) {
        let use_case =
            AuthenticateRequestUseCase::new(Arc::clone(&state.repo), Arc::clone(&state.config));
        match use_case.execute(token).await {
            Ok(context) => {
                request.extensions_mut().insert::<AuthenticatedContext>(context);
            }
            Err(error) => {
                debug!(path = %request.uri().path(), %error, "Token rejected");
            }
        }
    }

    next.run(request).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn extracts_token_after_bearer_prefix() {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::AUTHORIZATION,
            HeaderValue::from_static("Bearer abc.def"),
        );
        assert_eq!(extract_bearer_token(&headers), Some("abc.def"));
    }

    #[test]
    fn missing_header_yields_none() {
        let headers = HeaderMap::new();
        assert_eq!(extract_bearer_token(&headers), None);
    }

    #[test]
    fn wrong_scheme_yields_none() {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::AUTHORIZATION,
            HeaderValue::from_static("Basic dXNlcjpwdw=="),
        );
        assert_eq!(extract_bearer_token(&headers), None);
    }

    #[test]
    fn prefix_is_case_sensitive() {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::AUTHORIZATION,
            HeaderValue::from_static("bearer abc.def"),
        );
        assert_eq!(extract_bearer_token(&headers), None);
    }
}
