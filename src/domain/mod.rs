//! Domain layer containing business entities and contracts.
//!
//! Defines entities, repository interfaces, the time source and the registry
//! error type, independent of storage and HTTP concerns.
//!
//! # Architecture
//!
//! - [`entities`] - Core business data structures
//! - [`repositories`] - Data access trait definitions
//! - [`clock`] - Injectable time source
//! - [`error`] - Registry failure kinds
//! - [`expiry_sweeper`] - Optional background eviction of expired links
//!
//! # Link Lifecycle
//!
//! 1. A link is created live by [`crate::application::services::LinkService::register`]
//! 2. Redirects read it and bump its click counter
//! 3. It is evicted when its owner deletes it, or when any operation finds it expired
//!
//! Eviction is terminal and frees the short code for reuse.

pub mod clock;
pub mod entities;
pub mod error;
pub mod expiry_sweeper;
pub mod repositories;
