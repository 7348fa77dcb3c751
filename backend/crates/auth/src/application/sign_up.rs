//! Sign Up Use Case
//!
//! Registers a new principal.

use std::sync::Arc;

use platform::password::ClearTextPassword;

use crate::application::config::AuthConfig;
use crate::domain::entity::principal::Principal;
use crate::domain::repository::PrincipalRepository;
use crate::domain::value_object::{Email, Username};
use crate::error::{AuthError, AuthResult};

/// Sign up input
pub struct SignUpInput {
    pub username: String,
    pub password: String,
    pub email: Option<String>,
}

/// Sign up output
#[derive(Debug)]
pub struct SignUpOutput {
    pub principal_id: String,
}

/// Sign up use case
pub struct SignUpUseCase<R>
where
    R: PrincipalRepository,
{
    repo: Arc<R>,
    config: Arc<AuthConfig>,
}

impl<R> SignUpUseCase<R>
where
    R: PrincipalRepository,
{
    pub fn new(repo: Arc<R>, config: Arc<AuthConfig>) -> Self {
        Self { repo, config }
    }

    /// Validate, check uniqueness, hash and persist.
    ///
    /// The existence checks here are advisory; the store's uniqueness
    /// constraint is the real serialization point under concurrent
    /// signups, and a loss there surfaces as an error from `create`
    /// rather than being swallowed. No retries happen internally.
    pub async fn execute(&self, input: SignUpInput) -> AuthResult<SignUpOutput> {
        let username = Username::new(&input.username)
            .map_err(|e| AuthError::UsernameValidation(e.to_string()))?;

        let email = input
            .email
            .map(Email::new)
            .transpose()
            .map_err(|e| AuthError::EmailValidation(e.to_string()))?;

        if self.repo.exists_by_username(&username).await? {
            return Err(AuthError::UsernameTaken);
        }

        if let Some(email) = &email {
            if self.repo.exists_by_email(email).await? {
                return Err(AuthError::EmailTaken);
            }
        }

        let password = ClearTextPassword::new(input.password)
            .map_err(|e| AuthError::PasswordValidation(e.to_string()))?;
        let password_hash = password
            .hash(self.config.pepper())
            .map_err(|e| AuthError::Internal(e.to_string()))?;

        let principal = Principal::new(username, email, password_hash);

        self.repo.create(&principal).await?;

        tracing::info!(
            principal_id = %principal.principal_id,
            username = %principal.username,
            "Principal registered"
        );

        Ok(SignUpOutput {
            principal_id: principal.principal_id.to_string(),
        })
    }
}
