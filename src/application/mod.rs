//! Application layer services implementing business logic.
//!
//! Services consume repository traits and provide a clean API for HTTP handlers.
//!
//! # Available Services
//!
//! - [`services::link_service::LinkService`] - The link registry: registration,
//!   resolution, click accounting and owner-scoped listing/deletion
//! - [`services::auth_service::AuthService`] - Accounts and bearer tokens

pub mod services;
