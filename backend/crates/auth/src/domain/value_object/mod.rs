//! Value Object Module

pub mod email;
pub mod principal_id;
pub mod role;
pub mod username;

pub use email::Email;
pub use principal_id::PrincipalId;
pub use role::Role;
pub use username::Username;
