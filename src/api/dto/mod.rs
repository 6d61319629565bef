//! Data Transfer Objects for API requests and responses.
//!
//! All DTOs use Serde for JSON serialization/deserialization; account
//! requests are checked with validator.

pub mod auth;
pub mod health;
pub mod links;
