//! Link entity representing a shortened URL mapping.

use chrono::{DateTime, Utc};

/// A shortened URL link with ownership and click metadata.
///
/// Only `clicks` changes after creation; everything else is fixed until the
/// link is deleted by its owner or evicted on expiry.
#[derive(Debug, Clone, PartialEq)]
pub struct Link {
    pub id: i64,
    pub code: String,
    pub url: String,
    pub owner: String,
    pub created_at: DateTime<Utc>,
    pub expires_at: Option<DateTime<Utc>>,
    pub clicks: u64,
}

impl Link {
    /// Creates a link with a zeroed click counter.
    pub fn new(id: i64, new_link: NewLink, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            code: new_link.code,
            url: new_link.url,
            owner: new_link.owner,
            created_at,
            expires_at: new_link.expires_at,
            clicks: 0,
        }
    }

    /// Returns true if the link's expiry is at or before `now`.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.expires_at.is_some_and(|e| e <= now)
    }

    /// Returns true if the link is owned by `owner`.
    pub fn is_owned_by(&self, owner: &str) -> bool {
        self.owner == owner
    }
}

/// Input data for creating a new link.
///
/// The store assigns `id` and `created_at` at insertion time.
#[derive(Debug, Clone, PartialEq)]
pub struct NewLink {
    pub code: String,
    pub url: String,
    pub owner: String,
    pub expires_at: Option<DateTime<Utc>>,
}
