//! API Server Entry Point
//!
//! Application entry point and server initialization.
//! Uses `anyhow` for startup errors, but application-level
//! errors should use `kernel::error::AppError`.

use std::env;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use auth::policy::{AccessPolicy, enforce_access_policy};
use auth::middleware::{AuthenticatorState, authenticate_request};
use auth::{AuthConfig, PgPrincipalRepository, auth_router};
use axum::{
    Router, http,
    http::{Method, header},
    middleware,
    routing::get,
};
use base64::Engine;
use base64::engine::general_purpose;
use sqlx::postgres::PgPoolOptions;
use tokio::net::TcpListener;
use tower_http::cors::{AllowHeaders, AllowMethods, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "api=info,auth=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Database connection
    let database_url = env::var("DATABASE_URL").expect("DATABASE_URL must be set in environment");

    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&database_url)
        .await?;

    tracing::info!("Connected to database");

    // Run migrations
    sqlx::migrate!("../../../database/migrations")
        .run(&pool)
        .await?;

    tracing::info!("Migrations completed");

    // Auth configuration
    let auth_config = Arc::new(load_auth_config()?);

    let repo = Arc::new(PgPrincipalRepository::new(pool.clone()));

    // Access policy: auth endpoints are public, everything else
    // requires an authenticated principal. Unlisted paths fail closed.
    let policy = Arc::new(AccessPolicy::new().public("/auth/*"));

    let authenticator = AuthenticatorState::new(Arc::clone(&repo), Arc::clone(&auth_config));

    // CORS configuration
    let frontend_origins = env::var("FRONTEND_ORIGINS")
        .unwrap_or_else(|_| "http://localhost:40922,http://127.0.0.1:40922".to_string());

    let allowed_origins: Vec<http::HeaderValue> = frontend_origins
        .split(',')
        .filter_map(|origin| origin.trim().parse().ok())
        .collect();

    let cors = CorsLayer::new()
        .allow_origin(allowed_origins)
        .allow_methods(AllowMethods::list([
            Method::GET,
            Method::POST,
            Method::OPTIONS,
        ]))
        .allow_headers(AllowHeaders::list([
            header::CONTENT_TYPE,
            header::AUTHORIZATION,
            header::ACCEPT,
        ]))
        .allow_credentials(true);

    // Build router. Layer order matters: the authenticator is added
    // last so it runs first and the policy sees its result.
    let app = Router::new()
        .route("/me", get(auth::handlers::whoami))
        .nest("/auth", auth_router(repo, auth_config))
        .layer(middleware::from_fn(move |request, next| {
            enforce_access_policy(Arc::clone(&policy), request, next)
        }))
        .layer(middleware::from_fn(move |request, next| {
            authenticate_request(authenticator.clone(), request, next)
        }))
        .layer(TraceLayer::new_for_http())
        .layer(cors);

    // Start server
    let addr = SocketAddr::from(([0, 0, 0, 0], 31113));
    tracing::info!("Listening on {}", addr);

    let listener = TcpListener::bind(addr).await?;
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;

    Ok(())
}

/// Build the auth configuration from the environment.
///
/// Debug builds fall back to a random secret and a short TTL so local
/// development needs no setup; production requires `AUTH_TOKEN_SECRET`
/// (base64, 32 bytes) so tokens survive restarts and scale out.
fn load_auth_config() -> anyhow::Result<AuthConfig> {
    let mut config = if cfg!(debug_assertions) {
        match env::var("AUTH_TOKEN_SECRET") {
            Ok(secret_b64) => AuthConfig {
                token_secret: decode_secret(&secret_b64)?,
                ..AuthConfig::default()
            },
            Err(_) => {
                tracing::warn!("AUTH_TOKEN_SECRET not set; using a random per-process secret");
                AuthConfig::development()
            }
        }
    } else {
        let secret_b64 =
            env::var("AUTH_TOKEN_SECRET").expect("AUTH_TOKEN_SECRET must be set in production");
        AuthConfig {
            token_secret: decode_secret(&secret_b64)?,
            ..AuthConfig::default()
        }
    };

    if let Ok(ttl) = env::var("AUTH_TOKEN_TTL_SECS") {
        config.token_ttl = Duration::from_secs(ttl.parse()?);
    }

    if let Ok(pepper_b64) = env::var("AUTH_PASSWORD_PEPPER") {
        config.password_pepper = Some(Engine::decode(&general_purpose::STANDARD, &pepper_b64)?);
    }

    Ok(config)
}

fn decode_secret(secret_b64: &str) -> anyhow::Result<[u8; 32]> {
    let bytes = Engine::decode(&general_purpose::STANDARD, secret_b64)?;
    anyhow::ensure!(bytes.len() == 32, "AUTH_TOKEN_SECRET must decode to 32 bytes");
    let mut secret = [0u8; 32];
    secret.copy_from_slice(&bytes);
    Ok(secret)
}
