//! Presentation Layer
//!
//! HTTP handlers, DTOs, middleware, access policy, and router.

pub mod dto;
pub mod handlers;
pub mod middleware;
pub mod policy;
pub mod router;
