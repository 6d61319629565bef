//! In-memory implementation of the link repository.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::Mutex;
use tracing::debug;

use crate::domain::clock::Clock;
use crate::domain::entities::{Link, NewLink};
use crate::domain::error::RegistryError;
use crate::domain::repositories::LinkRepository;

/// Identifier assigned to the first link.
pub const FIRST_LINK_ID: i64 = 1000;

struct Registry {
    links: HashMap<String, Link>,
    next_id: i64,
}

impl Registry {
    /// Removes `code` if its link has expired. Returns true if an eviction happened.
    fn evict_if_expired(&mut self, code: &str, now: DateTime<Utc>) -> bool {
        let expired = self
            .links
            .get(code)
            .is_some_and(|link| link.is_expired_at(now));

        if expired {
            self.links.remove(code);
            debug!(code, "Evicted expired link");
        }
        expired
    }

    fn live(&mut self, code: &str, now: DateTime<Utc>) -> Option<&mut Link> {
        self.evict_if_expired(code, now);
        self.links.get_mut(code)
    }
}

/// Link registry held in process memory.
///
/// A single mutex guards the whole map, so every operation is atomic with
/// respect to every other one. No lock is held across an await point.
pub struct InMemoryLinkRepository {
    inner: Mutex<Registry>,
    clock: Arc<dyn Clock>,
}

impl InMemoryLinkRepository {
    /// Creates an empty registry reading time from `clock`.
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            inner: Mutex::new(Registry {
                links: HashMap::new(),
                next_id: FIRST_LINK_ID,
            }),
            clock,
        }
    }
}

#[async_trait]
impl LinkRepository for InMemoryLinkRepository {
    async fn insert(&self, new_link: NewLink) -> Result<Link, RegistryError> {
        let now = self.clock.now();
        let mut registry = self.inner.lock().await;

        if registry.live(&new_link.code, now).is_some() {
            return Err(RegistryError::Conflict(new_link.code));
        }

        let id = registry.next_id;
        registry.next_id += 1;

        let link = Link::new(id, new_link, now);
        registry.links.insert(link.code.clone(), link.clone());

        debug!(id, code = %link.code, owner = %link.owner, "Registered link");
        Ok(link)
    }

    async fn find_live(&self, code: &str) -> Option<Link> {
        let now = self.clock.now();
        let mut registry = self.inner.lock().await;

        registry.live(code, now).cloned()
    }

    async fn exists(&self, code: &str) -> bool {
        let now = self.clock.now();
        let registry = self.inner.lock().await;

        registry
            .links
            .get(code)
            .is_some_and(|link| !link.is_expired_at(now))
    }

    async fn increment_clicks(&self, code: &str) -> Option<u64> {
        let now = self.clock.now();
        let mut registry = self.inner.lock().await;

        registry.live(code, now).map(|link| {
            link.clicks += 1;
            link.clicks
        })
    }

    async fn list_by_owner(&self, owner: &str) -> Vec<Link> {
        let now = self.clock.now();
        let mut registry = self.inner.lock().await;

        let before = registry.links.len();
        registry.links.retain(|_, link| !link.is_expired_at(now));
        let evicted = before - registry.links.len();
        if evicted > 0 {
            debug!(evicted, "Evicted expired links during listing");
        }

        let mut owned: Vec<Link> = registry
            .links
            .values()
            .filter(|link| link.is_owned_by(owner))
            .cloned()
            .collect();

        // ids increase with insertion, so they order links sharing a timestamp
        owned.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        owned
    }

    async fn delete_by_owner(&self, code: &str, owner: &str) -> bool {
        let now = self.clock.now();
        let mut registry = self.inner.lock().await;

        let owned = registry
            .live(code, now)
            .is_some_and(|link| link.is_owned_by(owner));

        if owned {
            registry.links.remove(code);
            debug!(code, owner, "Deleted link");
        }
        owned
    }

    async fn purge_expired(&self) -> usize {
        let now = self.clock.now();
        let mut registry = self.inner.lock().await;

        let before = registry.links.len();
        registry.links.retain(|_, link| !link.is_expired_at(now));
        before - registry.links.len()
    }

    async fn count(&self) -> usize {
        self.inner.lock().await.links.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::clock::SystemClock;
    use chrono::Duration;

    fn repository() -> InMemoryLinkRepository {
        InMemoryLinkRepository::new(Arc::new(SystemClock))
    }

    fn new_link(code: &str, owner: &str, expires_at: Option<DateTime<Utc>>) -> NewLink {
        NewLink {
            code: code.to_string(),
            url: "https://example.com".to_string(),
            owner: owner.to_string(),
            expires_at,
        }
    }

    #[tokio::test]
    async fn test_insert_assigns_sequential_ids() {
        let repo = repository();

        let first = repo.insert(new_link("aaa", "alice", None)).await.unwrap();
        let second = repo.insert(new_link("bbb", "alice", None)).await.unwrap();

        assert_eq!(first.id, FIRST_LINK_ID);
        assert_eq!(second.id, FIRST_LINK_ID + 1);
        assert_eq!(first.clicks, 0);
    }

    #[tokio::test]
    async fn test_insert_conflict_leaves_original() {
        let repo = repository();
        repo.insert(new_link("dup", "alice", None)).await.unwrap();

        let err = repo.insert(new_link("dup", "bob", None)).await.unwrap_err();
        assert_eq!(err, RegistryError::Conflict("dup".to_string()));

        let link = repo.find_live("dup").await.unwrap();
        assert_eq!(link.owner, "alice");
        assert_eq!(repo.count().await, 1);
    }

    #[tokio::test]
    async fn test_ids_not_reused_after_delete() {
        let repo = repository();
        let first = repo.insert(new_link("one", "alice", None)).await.unwrap();
        assert!(repo.delete_by_owner("one", "alice").await);

        let again = repo.insert(new_link("one", "alice", None)).await.unwrap();
        assert!(again.id > first.id);
    }

    #[tokio::test]
    async fn test_expired_link_is_evicted_on_find() {
        let repo = repository();
        let past = Utc::now() - Duration::seconds(1);
        repo.insert(new_link("old", "alice", Some(past))).await.unwrap();

        assert_eq!(repo.count().await, 1);
        assert!(repo.find_live("old").await.is_none());
        assert_eq!(repo.count().await, 0);
    }

    #[tokio::test]
    async fn test_exists_ignores_expired_without_evicting() {
        let repo = repository();
        let past = Utc::now() - Duration::seconds(1);
        repo.insert(new_link("old", "alice", Some(past))).await.unwrap();

        assert!(!repo.exists("old").await);
        assert_eq!(repo.count().await, 1);
    }

    #[tokio::test]
    async fn test_insert_replaces_expired_occupant() {
        let repo = repository();
        let past = Utc::now() - Duration::seconds(1);
        repo.insert(new_link("reuse", "alice", Some(past))).await.unwrap();

        let link = repo.insert(new_link("reuse", "bob", None)).await.unwrap();
        assert_eq!(link.owner, "bob");
        assert_eq!(repo.count().await, 1);
    }

    #[tokio::test]
    async fn test_increment_clicks() {
        let repo = repository();
        repo.insert(new_link("hit", "alice", None)).await.unwrap();

        assert_eq!(repo.increment_clicks("hit").await, Some(1));
        assert_eq!(repo.increment_clicks("hit").await, Some(2));
        assert_eq!(repo.find_live("hit").await.unwrap().clicks, 2);
    }

    #[tokio::test]
    async fn test_increment_clicks_absent_is_noop() {
        let repo = repository();
        assert_eq!(repo.increment_clicks("missing").await, None);
    }

    #[tokio::test]
    async fn test_list_by_owner_sweeps_all_expired() {
        let repo = repository();
        let past = Utc::now() - Duration::seconds(1);
        repo.insert(new_link("mine", "alice", None)).await.unwrap();
        repo.insert(new_link("gone", "alice", Some(past))).await.unwrap();
        repo.insert(new_link("theirs", "bob", Some(past))).await.unwrap();

        let links = repo.list_by_owner("alice").await;

        assert_eq!(links.len(), 1);
        assert_eq!(links[0].code, "mine");
        assert_eq!(repo.count().await, 1);
    }

    #[tokio::test]
    async fn test_list_by_owner_newest_first() {
        let repo = repository();
        for code in ["c01", "c02", "c03"] {
            repo.insert(new_link(code, "alice", None)).await.unwrap();
        }

        let codes: Vec<String> = repo
            .list_by_owner("alice")
            .await
            .into_iter()
            .map(|l| l.code)
            .collect();

        assert_eq!(codes, vec!["c03", "c02", "c01"]);
    }

    #[tokio::test]
    async fn test_delete_requires_owner() {
        let repo = repository();
        repo.insert(new_link("keep", "alice", None)).await.unwrap();

        assert!(!repo.delete_by_owner("keep", "bob").await);
        assert!(repo.exists("keep").await);

        assert!(repo.delete_by_owner("keep", "alice").await);
        assert!(!repo.exists("keep").await);
        assert!(!repo.delete_by_owner("keep", "alice").await);
    }

    #[tokio::test]
    async fn test_delete_expired_returns_false() {
        let repo = repository();
        let past = Utc::now() - Duration::seconds(1);
        repo.insert(new_link("old", "alice", Some(past))).await.unwrap();

        assert!(!repo.delete_by_owner("old", "alice").await);
        assert_eq!(repo.count().await, 0);
    }

    #[tokio::test]
    async fn test_purge_expired() {
        let repo = repository();
        let past = Utc::now() - Duration::seconds(1);
        let future = Utc::now() + Duration::hours(1);
        repo.insert(new_link("p1", "alice", Some(past))).await.unwrap();
        repo.insert(new_link("p2", "bob", Some(past))).await.unwrap();
        repo.insert(new_link("f1", "bob", Some(future))).await.unwrap();

        assert_eq!(repo.purge_expired().await, 2);
        assert_eq!(repo.purge_expired().await, 0);
        assert!(repo.exists("f1").await);
    }
}
