//! Link registration, resolution and ownership-scoped management.

use std::sync::Arc;

use chrono::{DateTime, TimeDelta, Utc};
use tracing::{debug, warn};

use crate::domain::clock::Clock;
use crate::domain::entities::{Link, NewLink};
use crate::domain::error::RegistryError;
use crate::domain::repositories::LinkRepository;
use crate::utils::code_generator::{CodeGenerator, CustomCodePolicy, is_reserved};
use crate::utils::url_validator::validate_destination;

/// Default bound on generated-code attempts before giving up.
pub const DEFAULT_MAX_CODE_ATTEMPTS: usize = 100;

const MILLIS_PER_HOUR: f64 = 3_600_000.0;

/// Tunables for code allocation.
#[derive(Debug, Clone)]
pub struct LinkSettings {
    pub generator: CodeGenerator,
    pub custom_code_policy: CustomCodePolicy,
    pub max_code_attempts: usize,
}

impl Default for LinkSettings {
    fn default() -> Self {
        Self {
            generator: CodeGenerator::default(),
            custom_code_policy: CustomCodePolicy::default(),
            max_code_attempts: DEFAULT_MAX_CODE_ATTEMPTS,
        }
    }
}

/// The link registry.
///
/// Validates input, allocates collision-free short codes and scopes deletion
/// and listing to the owning identity. Identities are trusted as given; the
/// HTTP layer authenticates them.
pub struct LinkService<L: LinkRepository> {
    link_repository: Arc<L>,
    clock: Arc<dyn Clock>,
    settings: LinkSettings,
}

impl<L: LinkRepository> LinkService<L> {
    /// Creates a new link service.
    pub fn new(link_repository: Arc<L>, clock: Arc<dyn Clock>, settings: LinkSettings) -> Self {
        Self {
            link_repository,
            clock,
            settings,
        }
    }

    /// Registers a new link owned by `owner`.
    ///
    /// # Arguments
    ///
    /// - `url` - Absolute destination URL, stored verbatim
    /// - `custom_code` - Optional user-chosen code (validated against the policy)
    /// - `ttl_hours` - Optional lifetime; only positive finite values set an expiry
    /// - `owner` - Authenticated identity of the creator
    ///
    /// # Code Allocation
    ///
    /// - A custom code is claimed atomically or rejected with a conflict
    /// - Otherwise random candidates are drawn until one is free, up to
    ///   `max_code_attempts` times. A candidate that loses an insert race is
    ///   retried like any other collision.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::InvalidInput`] if:
    /// - URL is missing or not absolute
    /// - Custom code violates the policy
    /// - Expiry is out of the representable range
    ///
    /// Returns [`RegistryError::Conflict`] if the custom code is held by a live link.
    ///
    /// Returns [`RegistryError::ExhaustedCapacity`] if no free code was found.
    pub async fn register(
        &self,
        url: &str,
        custom_code: Option<&str>,
        ttl_hours: Option<f64>,
        owner: &str,
    ) -> Result<Link, RegistryError> {
        validate_destination(url).map_err(|e| RegistryError::invalid(e.to_string()))?;

        let expires_at = self.expires_at(ttl_hours)?;

        if let Some(code) = custom_code {
            self.settings.custom_code_policy.validate(code)?;

            if self.link_repository.exists(code).await {
                return Err(RegistryError::Conflict(code.to_string()));
            }

            return self
                .link_repository
                .insert(NewLink {
                    code: code.to_string(),
                    url: url.to_string(),
                    owner: owner.to_string(),
                    expires_at,
                })
                .await;
        }

        let candidates = std::iter::repeat_with(|| self.settings.generator.generate());
        self.register_generated(candidates, url, expires_at, owner).await
    }

    /// Claims the first free candidate, trying at most `max_code_attempts`.
    ///
    /// Reserved codes are skipped; their routes shadow the redirect.
    async fn register_generated(
        &self,
        candidates: impl Iterator<Item = String>,
        url: &str,
        expires_at: Option<DateTime<Utc>>,
        owner: &str,
    ) -> Result<Link, RegistryError> {
        for (attempt, code) in (1..=self.settings.max_code_attempts).zip(candidates) {
            if is_reserved(&code) {
                debug!(attempt, code = %code, "Generated code is reserved");
                continue;
            }

            if self.link_repository.exists(&code).await {
                debug!(attempt, code = %code, "Generated code already taken");
                continue;
            }

            let new_link = NewLink {
                code,
                url: url.to_string(),
                owner: owner.to_string(),
                expires_at,
            };

            match self.link_repository.insert(new_link).await {
                Err(RegistryError::Conflict(code)) => {
                    debug!(attempt, code = %code, "Lost race for generated code");
                }
                result => return result,
            }
        }

        warn!(
            attempts = self.settings.max_code_attempts,
            "Short code space exhausted"
        );
        Err(RegistryError::ExhaustedCapacity {
            attempts: self.settings.max_code_attempts,
        })
    }

    /// Resolves a code to its live link without touching the click counter.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::NotFound`] if the code is unknown or has expired
    /// (an expired link is evicted as a side effect).
    pub async fn resolve(&self, code: &str) -> Result<Link, RegistryError> {
        self.link_repository
            .find_live(code)
            .await
            .ok_or(RegistryError::NotFound)
    }

    /// Counts one click for a live link.
    ///
    /// A no-op when the link disappeared between resolution and this call.
    pub async fn record_click(&self, code: &str) {
        if self.link_repository.increment_clicks(code).await.is_none() {
            debug!(code, "Click on a link that is gone");
        }
    }

    /// Lists the owner's live links, newest first.
    pub async fn list_by_owner(&self, owner: &str) -> Vec<Link> {
        self.link_repository.list_by_owner(owner).await
    }

    /// Deletes a link if `owner` owns it.
    ///
    /// Returns `false` for unknown codes and for codes owned by someone else alike.
    pub async fn delete_by_owner(&self, code: &str, owner: &str) -> bool {
        self.link_repository.delete_by_owner(code, owner).await
    }

    /// Returns whether a live link occupies `code`.
    pub async fn exists(&self, code: &str) -> bool {
        self.link_repository.exists(code).await
    }

    /// Number of stored links, including expired ones not yet evicted.
    pub async fn stored_count(&self) -> usize {
        self.link_repository.count().await
    }

    fn expires_at(&self, ttl_hours: Option<f64>) -> Result<Option<DateTime<Utc>>, RegistryError> {
        let Some(hours) = ttl_hours.filter(|h| h.is_finite() && *h > 0.0) else {
            return Ok(None);
        };

        let millis = (hours * MILLIS_PER_HOUR).round();
        TimeDelta::try_milliseconds(millis as i64)
            .filter(|_| millis < i64::MAX as f64)
            .and_then(|ttl| self.clock.now().checked_add_signed(ttl))
            .map(Some)
            .ok_or_else(|| RegistryError::invalid("Expiry is too far in the future"))
    }
}
