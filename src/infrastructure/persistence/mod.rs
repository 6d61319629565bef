//! In-process repository implementations.
//!
//! Nothing here survives a restart; each repository is an explicitly
//! constructed instance shared through `Arc`.
//!
//! # Available Repositories
//!
//! - [`InMemoryLinkRepository`] - Link registry with lazy expiry
//! - [`InMemoryUserRepository`] - Registered accounts

pub mod memory_link_repository;
pub mod memory_user_repository;

pub use memory_link_repository::InMemoryLinkRepository;
pub use memory_user_repository::InMemoryUserRepository;
