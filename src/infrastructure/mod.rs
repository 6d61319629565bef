//! Infrastructure layer: storage and credential implementations.
//!
//! - [`persistence`] - In-memory repository implementations
//! - [`security`] - JWT signing and argon2 password hashing

pub mod persistence;
pub mod security;
