//! In-Memory Repository Implementation
//!
//! HashMap-backed principal store for tests and local development.
//! Enforces the same uniqueness invariants as the PostgreSQL store so
//! use-case behavior matches.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::domain::entity::principal::Principal;
use crate::domain::repository::PrincipalRepository;
use crate::domain::value_object::{Email, Username};
use crate::error::{AuthError, AuthResult};

/// In-memory principal repository, keyed by canonical username
#[derive(Clone, Default)]
pub struct MemoryPrincipalRepository {
    inner: Arc<RwLock<HashMap<String, Principal>>>,
}

impl MemoryPrincipalRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored principals
    pub fn len(&self) -> usize {
        self.inner.read().map(|m| m.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl PrincipalRepository for MemoryPrincipalRepository {
    async fn create(&self, principal: &Principal) -> AuthResult<()> {
        let mut map = self
            .inner
            .write()
            .map_err(|_| AuthError::Internal("Store lock poisoned".to_string()))?;

        // The write lock is the serialization point, mirroring the
        // database unique indexes.
        if map.contains_key(principal.username.canonical()) {
            return Err(AuthError::UsernameTaken);
        }
        if let Some(email) = &principal.email {
            if map
                .values()
                .any(|p| p.email.as_ref().is_some_and(|e| e == email))
            {
                return Err(AuthError::EmailTaken);
            }
        }

        map.insert(principal.username.canonical().to_string(), principal.clone());
        Ok(())
    }

    async fn find_by_username(&self, username: &Username) -> AuthResult<Option<Principal>> {
        let map = self
            .inner
            .read()
            .map_err(|_| AuthError::Internal("Store lock poisoned".to_string()))?;
        Ok(map.get(username.canonical()).cloned())
    }

    async fn exists_by_username(&self, username: &Username) -> AuthResult<bool> {
        let map = self
            .inner
            .read()
            .map_err(|_| AuthError::Internal("Store lock poisoned".to_string()))?;
        Ok(map.contains_key(username.canonical()))
    }

    async fn exists_by_email(&self, email: &Email) -> AuthResult<bool> {
        let map = self
            .inner
            .read()
            .map_err(|_| AuthError::Internal("Store lock poisoned".to_string()))?;
        Ok(map
            .values()
            .any(|p| p.email.as_ref().is_some_and(|e| e == email)))
    }
}
