//! Entity Module

pub mod principal;

pub use principal::Principal;
