//! Application state shared by the health endpoints

use std::sync::Arc;

use crate::config::Config;

/// Application state shared across handlers
#[derive(Debug, Clone)]
pub struct AppState {
    config: Arc<Config>,
    auth_enabled: bool,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(Config::default())
    }
}

impl AppState {
    /// Create a new AppState with the given configuration
    pub fn new(config: Config) -> Self {
        Self {
            config: Arc::new(config),
            auth_enabled: false,
        }
    }

    /// Record whether API routes sit behind token authentication
    #[must_use]
    pub fn with_auth_enabled(mut self, enabled: bool) -> Self {
        self.auth_enabled = enabled;
        self
    }

    /// Get the configuration
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Whether API routes sit behind token authentication
    pub fn auth_enabled(&self) -> bool {
        self.auth_enabled
    }
}
