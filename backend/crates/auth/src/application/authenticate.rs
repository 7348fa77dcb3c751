//! Authenticate Request Use Case
//!
//! Turns a presented bearer token into an authenticated-principal
//! context for a single request. There is no process-wide "current
//! user"; the context is owned by the request that produced it.

use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::application::token::{TokenCodec, TokenError};
use crate::domain::entity::principal::Principal;
use crate::domain::repository::PrincipalRepository;
use crate::domain::value_object::{Role, Username};
use crate::error::{AuthError, AuthResult};

/// Request-scoped marker of a successfully authenticated principal
///
/// Created here on success, attached to the request extensions by the
/// middleware, discarded when the request completes.
#[derive(Debug, Clone)]
pub struct AuthenticatedContext {
    pub principal: Principal,
    pub roles: Vec<Role>,
}

/// Per-request token authentication use case
pub struct AuthenticateRequestUseCase<R>
where
    R: PrincipalRepository,
{
    repo: Arc<R>,
    config: Arc<AuthConfig>,
}

impl<R> AuthenticateRequestUseCase<R>
where
    R: PrincipalRepository,
{
    pub fn new(repo: Arc<R>, config: Arc<AuthConfig>) -> Self {
        Self { repo, config }
    }

    /// Validate a token and resolve its subject.
    ///
    /// A syntactically valid, unexpired token whose principal no longer
    /// exists does not authenticate.
    pub async fn execute(&self, token: &str) -> AuthResult<AuthenticatedContext> {
        let claims = TokenCodec::new(&self.config).validate(token)?;

        let username =
            Username::new(&claims.subject).map_err(|_| TokenError::Malformed)?;

        let principal = self
            .repo
            .find_by_username(&username)
            .await?
            .ok_or(AuthError::PrincipalNotFound)?;

        Ok(AuthenticatedContext {
            roles: principal.roles.clone(),
            principal,
        })
    }
}
