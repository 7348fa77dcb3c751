//! Auth (Authentication) Backend Module
//!
//! Clean Architecture structure:
//! - `domain/` - Business logic, entities, repository traits
//! - `application/` - Use cases and application services
//! - `infra/` - Store implementations (PostgreSQL, in-memory)
//! - `presentation/` - HTTP handlers, DTOs, middleware, router
//!
//! ## Features
//! - Principal signup/signin with username + password
//! - Stateless HMAC-signed bearer tokens with a hard TTL
//! - Per-request token authentication middleware
//! - Declarative access policy (public/protected paths, fail closed)
//!
//! ## Security Model
//! - Passwords hashed with Argon2id (NIST SP 800-63B compliant)
//! - Tokens are tamper-evident: HMAC-SHA256 over the claims, verified
//!   in constant time; expiry is the only termination mechanism
//! - Credential and token failures are low-information to callers;
//!   details go to tracing only

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

// Re-exports for convenience
pub use application::config::AuthConfig;
pub use application::token::{Claims, TokenCodec, TokenError};
pub use error::{AuthError, AuthResult};
pub use infra::memory::MemoryPrincipalRepository;
pub use infra::postgres::PgPrincipalRepository;
pub use presentation::router::auth_router;

// Re-export kernel error types for unified error handling
pub use kernel::error::{
    app_error::{AppError, AppResult},
    kind::ErrorKind,
};

// Convenience re-exports
pub mod config {
    pub use crate::application::config::*;
}

pub mod models {
    pub use crate::domain::entity::*;
    pub use crate::domain::value_object::*;
    pub use crate::presentation::dto::*;
}

pub mod handlers {
    pub use crate::presentation::handlers::*;
}

pub mod store {
    pub use crate::infra::postgres::PgPrincipalRepository as PrincipalStore;
}

pub mod router {
    pub use crate::presentation::router::*;
}

pub mod middleware {
    pub use crate::presentation::middleware::*;
}

pub mod policy {
    pub use crate::presentation::policy::*;
}
