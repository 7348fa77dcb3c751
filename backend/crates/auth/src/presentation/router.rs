//! Auth route composition.

use std::sync::Arc;

use axum::Router;
use axum::routing::post;

use crate::application::config::AuthConfig;
use crate::domain::repository::PrincipalRepository;
use crate::infra::postgres::PgPrincipalRepository;
use crate::presentation::handlers::{self, AuthAppState};

/// Build the `/auth` routes backed by PostgreSQL.
pub fn auth_router(repo: Arc<PgPrincipalRepository>, config: Arc<AuthConfig>) -> Router {
    auth_router_generic(repo, config)
}

/// Build the `/auth` routes over any principal store.
///
/// Mounted under a prefix by the caller, typically `nest("/auth", ..)`.
pub fn auth_router_generic<R>(repo: Arc<R>, config: Arc<AuthConfig>) -> Router
where
    R: PrincipalRepository + Send + Sync + 'static,
{
    let state = AuthAppState::new(repo, config);

    Router::new()
        .route("/signup", post(handlers::sign_up::<R>))
        .route("/signin", post(handlers::sign_in::<R>))
        .with_state(state)
}
