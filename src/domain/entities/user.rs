//! User account entity owned by the authentication gate.

use chrono::{DateTime, Utc};

/// A registered account.
///
/// The username doubles as the owner identity attached to links.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub username: String,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

/// Input data for registering an account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    pub username: String,
    pub password_hash: String,
}
