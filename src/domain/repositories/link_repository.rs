//! Repository trait for short link data access.

use crate::domain::entities::{Link, NewLink};
use crate::domain::error::RegistryError;
use async_trait::async_trait;

/// Storage contract for the link registry.
///
/// Every method is atomic with respect to every other method. Expired links are
/// evicted lazily: any operation that touches one treats it as absent and, with
/// the exception of [`LinkRepository::exists`], removes it.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::InMemoryLinkRepository`] - mutex-guarded map
/// - Test mocks available with `cfg(test)`
///
/// # Examples
///
/// See integration tests: `tests/registry_link.rs`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LinkRepository: Send + Sync {
    /// Inserts a new link, assigning the next id and the creation timestamp.
    ///
    /// An expired occupant of the same code is evicted and replaced.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::Conflict`] if a live link already holds the code.
    async fn insert(&self, new_link: NewLink) -> Result<Link, RegistryError>;

    /// Returns the live link for `code`, evicting it first if it has expired.
    async fn find_live(&self, code: &str) -> Option<Link>;

    /// Returns whether a live link occupies `code`.
    ///
    /// Does not evict; an expired occupant simply does not count.
    async fn exists(&self, code: &str) -> bool;

    /// Increments the click counter of a live link by one.
    ///
    /// Returns the new counter value, or `None` if the link is absent or expired.
    async fn increment_clicks(&self, code: &str) -> Option<u64>;

    /// Lists live links owned by `owner`, newest first.
    ///
    /// Sweeps every expired link encountered during the scan, whoever owns it.
    async fn list_by_owner(&self, owner: &str) -> Vec<Link>;

    /// Removes the link if it exists and is owned by `owner`.
    ///
    /// Returns `false` both when the code is unknown and when it belongs to
    /// another owner.
    async fn delete_by_owner(&self, code: &str, owner: &str) -> bool;

    /// Evicts every expired link, returning how many were removed.
    async fn purge_expired(&self) -> usize;

    /// Number of links currently held, expired-but-unswept ones included.
    async fn count(&self) -> usize;
}
