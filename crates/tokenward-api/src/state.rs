//! Application state shared across all handlers and extractors.

use std::sync::Arc;
use std::time::Duration;

use tokenward_auth::directory::CredentialVerifier;
use tokenward_auth::lifecycle::TokenLifecycleService;
use tokenward_core::config::AppConfig;

/// Passed to every handler via `State<AppState>`. Cheap to clone.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Application configuration.
    pub config: Arc<AppConfig>,
    /// Token lifecycle over the configured store.
    pub tokens: Arc<TokenLifecycleService>,
    /// Login credential check.
    pub credentials: Arc<dyn CredentialVerifier>,
}

impl AppState {
    /// Bundle the shared dependencies.
    pub fn new(
        config: Arc<AppConfig>,
        tokens: Arc<TokenLifecycleService>,
        credentials: Arc<dyn CredentialVerifier>,
    ) -> Self {
        Self {
            config,
            tokens,
            credentials,
        }
    }

    /// Bound applied to every call into the token lifecycle.
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.config.server.request_timeout_seconds)
    }
}
