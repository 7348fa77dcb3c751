use serde::{Deserialize, Serialize};
use std::fmt;

/// Role granted to a principal
///
/// Stored and serialized as the Spring-style role codes (`ROLE_USER`, ...)
/// so existing clients keep working.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[repr(i16)]
pub enum Role {
    #[default]
    User = 0,
    Moderator = 1,
    Admin = 2,
}

impl Role {
    #[inline]
    pub const fn id(&self) -> i16 {
        *self as i16
    }

    #[inline]
    pub const fn code(&self) -> &'static str {
        use Role::*;
        match self {
            User => "ROLE_USER",
            Moderator => "ROLE_MODERATOR",
            Admin => "ROLE_ADMIN",
        }
    }

    #[inline]
    pub const fn is_admin(&self) -> bool {
        matches!(self, Role::Admin)
    }

    #[inline]
    pub fn from_code(code: &str) -> Option<Self> {
        use Role::*;
        match code {
            "ROLE_USER" => Some(User),
            "ROLE_MODERATOR" => Some(Moderator),
            "ROLE_ADMIN" => Some(Admin),
            _ => None,
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}
