//! Shared application state injected into every handler.

use std::sync::Arc;

use crate::application::services::{AuthService, LinkService};
use crate::infrastructure::persistence::{InMemoryLinkRepository, InMemoryUserRepository};

pub type AppLinkService = LinkService<InMemoryLinkRepository>;
pub type AppAuthService = AuthService<InMemoryUserRepository>;

/// Handles to the explicitly constructed services.
///
/// Cloning is cheap; every clone shares the same registry.
#[derive(Clone)]
pub struct AppState {
    pub link_service: Arc<AppLinkService>,
    pub auth_service: Arc<AppAuthService>,
    /// Base for short URLs; `None` derives it from each request's `Host`.
    pub public_base_url: Option<String>,
}

impl AppState {
    pub fn new(
        link_service: Arc<AppLinkService>,
        auth_service: Arc<AppAuthService>,
        public_base_url: Option<String>,
    ) -> Self {
        Self {
            link_service,
            auth_service,
            public_base_url,
        }
    }
}
