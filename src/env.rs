//! Read-only access to environment variables.
//!
//! Handlers never touch `std::env` directly. They receive an [`EnvProvider`]
//! through the application state, so tests can substitute a fixed set of
//! variables without mutating the process environment.

#[cfg(test)]
use std::collections::HashMap;

/// Environment variable holding the application version (read once at startup)
pub const ENV_APP_VERSION: &str = "APP_VERSION";

/// Environment variable naming the deployment environment (read per request)
pub const ENV_ENVIRONMENT: &str = "ENVIRONMENT";

/// Environment variable holding the host or pod name (read per request)
pub const ENV_HOSTNAME: &str = "HOSTNAME";

/// A read-only source of environment variables.
pub trait EnvProvider: Send + Sync {
    /// Returns the value of `key`, or `None` if it is unset or not valid UTF-8.
    fn var(&self, key: &str) -> Option<String>;

    /// Returns the value of `key`, falling back to `default` when unset.
    fn var_or(&self, key: &str, default: &str) -> String {
        self.var(key).unwrap_or_else(|| default.to_string())
    }
}

/// Reads from the live process environment.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessEnv;

impl EnvProvider for ProcessEnv {
    fn var(&self, key: &str) -> Option<String> {
        std::env::var(key).ok()
    }
}

/// A fixed set of variables.
#[cfg(test)]
#[derive(Debug, Clone, Default)]
pub struct StaticEnv {
    vars: HashMap<String, String>,
}

#[cfg(test)]
impl StaticEnv {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a variable, replacing any previous value for the same key.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.vars.insert(key.into(), value.into());
        self
    }
}

#[cfg(test)]
impl EnvProvider for StaticEnv {
    fn var(&self, key: &str) -> Option<String> {
        self.vars.get(key).cloned()
    }
}
