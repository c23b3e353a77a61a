//! Shared application state injected into every handler.

use std::sync::Arc;

use crate::application::services::{AboutService, AuthService, LinkService};
use crate::config::Config;
use crate::domain::repositories::{AboutRepository, ShortLinkRepository, TokenRepository};
use crate::infrastructure::memory::{
    InMemoryAboutRepository, InMemoryShortLinkRepository, InMemoryTokenRepository,
};
use crate::utils::clock::{Clock, SystemClock};

/// Storage backends the services run on.
pub struct Repositories {
    pub links: Arc<dyn ShortLinkRepository>,
    pub about: Arc<dyn AboutRepository>,
    pub tokens: Arc<dyn TokenRepository>,
}

impl Repositories {
    /// Fresh, empty in-process repositories.
    pub fn in_memory() -> Self {
        Self {
            links: Arc::new(InMemoryShortLinkRepository::new()),
            about: Arc::new(InMemoryAboutRepository::new()),
            tokens: Arc::new(InMemoryTokenRepository::new()),
        }
    }
}

/// Service-level settings extracted from [`Config`].
#[derive(Debug, Clone)]
pub struct ServiceSettings {
    pub display_prefix: String,
    pub short_url_max_length: usize,
    pub token_signing_secret: String,
}

impl From<&Config> for ServiceSettings {
    fn from(config: &Config) -> Self {
        Self {
            display_prefix: config.display_prefix.clone(),
            short_url_max_length: config.short_url_max_length,
            token_signing_secret: config.token_signing_secret.clone(),
        }
    }
}

/// Application state shared across handlers.
///
/// Cheap to clone: every service sits behind an `Arc`.
#[derive(Clone)]
pub struct AppState {
    pub link_service: Arc<LinkService<dyn ShortLinkRepository>>,
    pub about_service: Arc<AboutService<dyn AboutRepository>>,
    pub auth_service: Arc<AuthService<dyn TokenRepository>>,
}

impl AppState {
    pub fn new(repositories: Repositories, settings: ServiceSettings, clock: Arc<dyn Clock>) -> Self {
        let link_service = LinkService::new(
            repositories.links,
            settings.display_prefix,
            settings.short_url_max_length,
            clock.clone(),
        );

        Self {
            link_service: Arc::new(link_service),
            about_service: Arc::new(AboutService::new(repositories.about, clock)),
            auth_service: Arc::new(AuthService::new(
                repositories.tokens,
                settings.token_signing_secret,
            )),
        }
    }

    /// Builds state for `config` using the system clock.
    pub fn from_config(repositories: Repositories, config: &Config) -> Self {
        Self::new(repositories, config.into(), Arc::new(SystemClock))
    }
}
