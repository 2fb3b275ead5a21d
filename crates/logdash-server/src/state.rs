//! Shared state for the log API server.

use std::fmt;
use std::sync::Arc;
use std::time::Instant;

use logdash_core::{PageLimits, SharedLogStore};

use crate::auth::TokenVerifier;
use crate::config::ServerConfig;
use crate::error::{ApiError, ServerError};

/// Shared state for the log API server.
pub struct AppState {
    /// Server configuration.
    config: Arc<ServerConfig>,
    /// Log record store.
    store: SharedLogStore,
    /// Bearer token verifier, present when authentication is enabled.
    verifier: Option<TokenVerifier>,
    /// Server start time.
    start_time: Instant,
}

impl AppState {
    /// Create a new state over `store`.
    pub fn new(config: ServerConfig, store: SharedLogStore) -> Self {
        let verifier = config.auth_secret.as_deref().map(TokenVerifier::new);
        Self {
            config: Arc::new(config),
            store,
            verifier,
            start_time: Instant::now(),
        }
    }

    /// Get the configuration.
    #[must_use]
    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    /// Get the log store.
    #[must_use]
    pub fn store(&self) -> &SharedLogStore {
        &self.store
    }

    /// Get the token verifier, if authentication is enabled.
    #[must_use]
    pub const fn verifier(&self) -> Option<&TokenVerifier> {
        self.verifier.as_ref()
    }

    /// Page size policy from the configuration.
    #[must_use]
    pub fn page_limits(&self) -> PageLimits {
        self.config.page_limits()
    }

    /// Get server uptime in seconds.
    #[must_use]
    pub fn uptime_secs(&self) -> u64 {
        self.start_time.elapsed().as_secs()
    }

    /// Renders an error for a client of this deployment.
    pub fn reject(&self, err: impl Into<ServerError>) -> ApiError {
        err.into()
            .into_api_error(self.config.environment.is_development())
    }
}

impl fmt::Debug for AppState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppState")
            .field("config", &self.config)
            .field("records", &self.store.len())
            .field("auth", &self.verifier.is_some())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Environment;
    use axum::http::StatusCode;
    use logdash_core::{shared_store, LogError};

    #[test]
    fn test_state_without_auth() {
        let state = AppState::new(ServerConfig::default(), shared_store(Vec::new()));

        assert!(state.verifier().is_none());
        assert!(state.store().is_empty());
        assert_eq!(state.page_limits(), PageLimits::default());
        assert!(state.uptime_secs() < 5);
    }

    #[test]
    fn test_state_with_auth() {
        let config = ServerConfig::default().with_auth_secret("secret");
        let state = AppState::new(config, shared_store(Vec::new()));

        assert!(state.verifier().is_some());
        assert!(format!("{state:?}").contains("auth: true"));
    }

    #[test]
    fn test_reject_follows_environment() {
        let prod = AppState::new(ServerConfig::default(), shared_store(Vec::new()));
        let err = prod.reject(LogError::StoreUnavailable("down".to_string()));
        assert_eq!(err.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(err.body.error.is_none());

        let dev = AppState::new(
            ServerConfig::default().with_environment(Environment::Development),
            shared_store(Vec::new()),
        );
        let err = dev.reject(LogError::StoreUnavailable("down".to_string()));
        assert!(err.body.error.is_some());
    }
}
