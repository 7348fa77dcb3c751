//! Repository Traits
//!
//! Interfaces for principal persistence. Implementations live in the
//! infrastructure layer; this core only consumes the contract.

use crate::domain::entity::principal::Principal;
use crate::domain::value_object::{Email, Username};
use crate::error::AuthResult;

/// Principal store trait
///
/// The existence checks are advisory only; the store's uniqueness
/// constraint is the actual invariant enforcer, so `create` can still
/// fail with a duplicate even after a passing pre-check.
#[trait_variant::make(PrincipalRepository: Send)]
pub trait LocalPrincipalRepository {
    /// Persist a new principal
    async fn create(&self, principal: &Principal) -> AuthResult<()>;

    /// Find a principal by canonical username
    async fn find_by_username(&self, username: &Username) -> AuthResult<Option<Principal>>;

    /// Check if a username exists
    async fn exists_by_username(&self, username: &Username) -> AuthResult<bool>;

    /// Check if an email exists
    async fn exists_by_email(&self, email: &Email) -> AuthResult<bool>;
}
