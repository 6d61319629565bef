//! Core domain entities representing the business data model.
//!
//! Entities are plain data structures; invariants that span several records
//! (code uniqueness, ownership scoping) are enforced by the repositories.
//!
//! # Entity Types
//!
//! - [`Link`] - A shortened URL owned by a user
//! - [`User`] - An account that can own links
//!
//! Creation inputs use separate structs (`NewLink`, `NewUser`) because the
//! store assigns identifiers and timestamps.

pub mod link;
pub mod user;

pub use link::{Link, NewLink};
pub use user::{NewUser, User};
