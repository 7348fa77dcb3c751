//! Principal Entity
//!
//! The authenticated identity and its authorization-relevant attributes.
//! Created at signup and never mutated by this module afterwards; role
//! assignment changes live outside this core.

use chrono::{DateTime, Utc};
use platform::password::HashedPassword;

use crate::domain::value_object::{Email, PrincipalId, Role, Username};

/// Principal entity
///
/// A plain struct satisfying the capability contract the pipeline needs:
/// it has a username, a credential hash and a role set. The password hash
/// never leaves this crate through a response DTO.
#[derive(Debug, Clone)]
pub struct Principal {
    /// Internal UUID identifier
    pub principal_id: PrincipalId,
    /// Username (unique, login handle and token subject)
    pub username: Username,
    /// Email (optional; unique when present)
    pub email: Option<Email>,
    /// Argon2id password hash
    pub password_hash: HashedPassword,
    /// Granted roles; `[Role::User]` on first registration
    pub roles: Vec<Role>,
    /// Created timestamp
    pub created_at: DateTime<Utc>,
    /// Updated timestamp
    pub updated_at: DateTime<Utc>,
}

impl Principal {
    /// Create a new principal with the default role set
    pub fn new(username: Username, email: Option<Email>, password_hash: HashedPassword) -> Self {
        let now = Utc::now();
        Self {
            principal_id: PrincipalId::new(),
            username,
            email,
            password_hash,
            roles: vec![Role::default()],
            created_at: now,
            updated_at: now,
        }
    }

    /// Check whether the principal holds the given role
    pub fn has_role(&self, role: Role) -> bool {
        self.roles.contains(&role)
    }

    /// Role codes (`ROLE_USER`, ...) for serialization
    pub fn role_codes(&self) -> Vec<String> {
        self.roles.iter().map(|r| r.code().to_string()).collect()
    }
}
