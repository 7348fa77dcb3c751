//! Infrastructure Layer
//!
//! Principal store implementations.

pub mod memory;
pub mod postgres;
