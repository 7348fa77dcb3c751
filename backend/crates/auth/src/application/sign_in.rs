//! Sign In Use Case
//!
//! Verifies credentials and mints a bearer token.

use std::sync::Arc;

use platform::password::ClearTextPassword;

use crate::application::config::AuthConfig;
use crate::application::token::TokenCodec;
use crate::domain::repository::PrincipalRepository;
use crate::domain::value_object::Username;
use crate::error::{AuthError, AuthResult};

/// Sign in input
pub struct SignInInput {
    pub username: String,
    pub password: String,
}

/// Sign in output; never carries the password hash
#[derive(Debug)]
pub struct SignInOutput {
    /// Signed bearer token
    pub token: String,
    /// Principal ID
    pub principal_id: String,
    /// Username as registered
    pub username: String,
}

/// Sign in use case
pub struct SignInUseCase<R>
where
    R: PrincipalRepository,
{
    repo: Arc<R>,
    config: Arc<AuthConfig>,
}

impl<R> SignInUseCase<R>
where
    R: PrincipalRepository,
{
    pub fn new(repo: Arc<R>, config: Arc<AuthConfig>) -> Self {
        Self { repo, config }
    }

    /// Authenticate and issue a token.
    ///
    /// A malformed username, a lookup miss and a password mismatch all
    /// return the identical `InvalidCredentials` so callers cannot
    /// enumerate registered usernames.
    pub async fn execute(&self, input: SignInInput) -> AuthResult<SignInOutput> {
        let username =
            Username::new(&input.username).map_err(|_| AuthError::InvalidCredentials)?;

        let principal = self
            .repo
            .find_by_username(&username)
            .await?
            .ok_or(AuthError::InvalidCredentials)?;

        let password =
            ClearTextPassword::new(input.password).map_err(|_| AuthError::InvalidCredentials)?;

        if !principal.password_hash.verify(&password, self.config.pepper()) {
            return Err(AuthError::InvalidCredentials);
        }

        let token = TokenCodec::new(&self.config).issue(&principal);

        tracing::info!(
            principal_id = %principal.principal_id,
            username = %principal.username,
            "Principal signed in"
        );

        Ok(SignInOutput {
            token,
            principal_id: principal.principal_id.to_string(),
            username: principal.username.original().to_string(),
        })
    }
}
