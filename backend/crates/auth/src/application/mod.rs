//! Application Layer
//!
//! Use cases and application services.

pub mod authenticate;
pub mod config;
pub mod sign_in;
pub mod sign_up;
pub mod token;

// Re-exports
pub use authenticate::{AuthenticateRequestUseCase, AuthenticatedContext};
pub use config::AuthConfig;
pub use sign_in::{SignInInput, SignInOutput, SignInUseCase};
pub use sign_up::{SignUpInput, SignUpOutput, SignUpUseCase};
pub use token::{Claims, TokenCodec, TokenError};
