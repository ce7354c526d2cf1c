//! Shared application state for request handlers.

use std::sync::Arc;

use crate::config::AppConfig;
use crate::env::EnvProvider;

/// Shared application state, cloneable across handlers via Arc-wrapped fields.
///
/// Both fields are read-only for the lifetime of the process, so handlers
/// need no synchronization.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub env: Arc<dyn EnvProvider>,
}

impl AppState {
    /// Creates a new application state from the loaded configuration and an environment source.
    pub fn new(config: AppConfig, env: impl EnvProvider + 'static) -> Self {
        Self {
            config: Arc::new(config),
            env: Arc::new(env),
        }
    }
}
