//! # Snaplink
//!
//! An in-memory link shortener built with Axum.
//!
//! ## Architecture
//!
//! The crate keeps the usual layer separation:
//!
//! - **Domain Layer** ([`domain`]) - Link and user entities, repository traits, clock
//! - **Application Layer** ([`application`]) - The link registry and account service
//! - **Infrastructure Layer** ([`infrastructure`]) - In-memory stores, JWT and password hashing
//! - **API Layer** ([`api`]) - REST handlers, DTOs and middleware
//!
//! ## Features
//!
//! - Random or custom short codes, unique among live links
//! - Optional per-link expiry with lazy eviction and an optional background sweep
//! - Click counting on redirect
//! - Per-user link ownership behind JWT bearer authentication
//!
//! ## Quick Start
//!
//! ```bash
//! export JWT_SECRET="change-me"
//! cargo run
//! ```
//!
//! ## Configuration
//!
//! Service configuration is loaded from environment variables via [`config::Config`].
//! See [`config`] module for available options.

pub mod api;
pub mod application;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod state;
pub mod utils;

pub mod config;
pub mod server;

pub mod routes;

pub use error::AppError;
pub use state::AppState;

/// Commonly used types for external consumers.
///
/// Re-exports frequently used types to simplify imports for library users
/// and integration tests.
pub mod prelude {
    pub use crate::application::services::{AuthService, LinkService, LinkSettings};
    pub use crate::domain::clock::{Clock, SystemClock};
    pub use crate::domain::entities::{Link, NewLink};
    pub use crate::domain::error::RegistryError;
    pub use crate::error::AppError;
    pub use crate::state::AppState;
}
