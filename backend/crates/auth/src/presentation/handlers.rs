//! HTTP handlers for the auth endpoints.

use std::sync::Arc;

use axum::Extension;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::Json;

use crate::application::authenticate::AuthenticatedContext;
use crate::application::config::AuthConfig;
use crate::application::sign_in::{SignInInput, SignInUseCase};
use crate::application::sign_up::{SignUpInput, SignUpUseCase};
use crate::domain::repository::PrincipalRepository;
use crate::error::{AuthError, AuthResult};
use crate::presentation::dto::{
    PrincipalResponse, SignInRequest, SignInResponse, SignUpRequest, SignUpResponse,
};

/// Shared state handed to every auth handler.
pub struct AuthAppState<R> {
    pub repo: Arc<R>,
    pub config: Arc<AuthConfig>,
}

impl<R> Clone for AuthAppState<R> {
    fn clone(&self) -> Self {
        Self {
            repo: Arc::clone(&self.repo),
            config: Arc::clone(&self.config),
        }
    }
}

impl<R> AuthAppState<R> {
    pub fn new(repo: Arc<R>, config: Arc<AuthConfig>) -> Self {
        Self { repo, config }
    }
}

/// `POST /auth/signup`
///
/// Registers a new principal. Validation failures and duplicate
/// usernames or emails all answer 400; the store constraint is the
/// final arbiter for uniqueness.
pub async fn sign_up<R>(
    State(state): State<AuthAppState<R>>,
    Json(body): Json<SignUpRequest>,
) -> AuthResult<(StatusCode, Json<SignUpResponse>)>
where
    R: PrincipalRepository + Send + Sync + 'static,
{
    let use_case = SignUpUseCase::new(Arc::clone(&state.repo), Arc::clone(&state.config));
    use_case
        .execute(SignUpInput {
            username: body.username,
            password: body.password,
            email: body.email,
        })
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(SignUpResponse {
            message: "User registered successfully".to_string(),
        }),
    ))
}

/// `POST /auth/signin`
///
/// Verifies credentials and issues a signed bearer token. Every
/// failure mode returns the same `InvalidCredentials` error.
pub async fn sign_in<R>(
    State(state): State<AuthAppState<R>>,
    Json(body): Json<SignInRequest>,
) -> AuthResult<Json<SignInResponse>>
where
    R: PrincipalRepository + Send + Sync + 'static,
{
    let use_case = SignInUseCase::new(Arc::clone(&state.repo), Arc::clone(&state.config));
    let output = use_case
        .execute(SignInInput {
            username: body.username,
            password: body.password,
        })
        .await?;

    Ok(Json(SignInResponse {
        token: output.token,
        id: output.principal_id,
        username: output.username,
    }))
}

/// `GET /me`
///
/// Returns the authenticated principal attached by the request
/// authenticator. Reachable without a valid token only if the access
/// policy marks the route public, in which case this still rejects.
pub async fn whoami(
    context: Option<Extension<AuthenticatedContext>>,
) -> AuthResult<Json<PrincipalResponse>> {
    let Extension(context) = context.ok_or(AuthError::AuthorizationDenied)?;

    Ok(Json(PrincipalResponse {
        id: context.principal.principal_id.to_string(),
        username: context.principal.username.original().to_string(),
        roles: context.principal.role_codes(),
    }))
}
