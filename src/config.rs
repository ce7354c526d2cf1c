//! Configuration loading and constants.
//!
//! Configuration is layered: built-in defaults, then an optional TOML file,
//! then the `APP_VERSION` environment variable. `AppConfig` is built once at
//! startup and never mutated afterwards.

use const_format::formatcp;
use serde::Deserialize;
use std::net::IpAddr;
use std::path::Path;

use crate::env::{EnvProvider, ENV_APP_VERSION};

// =============================================================================
// HTTP Response Cache Control
// =============================================================================
// Every payload carries a live timestamp, so upstream caches must not store it.

/// Seconds an intermediary may keep a 404 response
pub const HTTP_CACHE_ERROR_MAX_AGE: u32 = 5;

pub const CACHE_CONTROL_NO_STORE: &str = "no-store";

pub const CACHE_CONTROL_ERROR: &str = formatcp!("public, max-age={}", HTTP_CACHE_ERROR_MAX_AGE);

// =============================================================================
// Routes
// =============================================================================

pub const ROUTE_HOME: &str = "/";
pub const ROUTE_HEALTH: &str = "/health";
pub const ROUTE_INFO: &str = "/info";

/// Endpoints advertised by `/info`, in routing order
pub const ENDPOINTS: [&str; 3] = [ROUTE_HOME, ROUTE_HEALTH, ROUTE_INFO];

// =============================================================================
// Defaults
// =============================================================================

/// Listen on all interfaces
pub const DEFAULT_HTTP_HOST: &str = "0.0.0.0";

pub const DEFAULT_HTTP_PORT: u16 = 8080;

/// Version reported when neither `APP_VERSION` nor `[app].version` is set
pub const DEFAULT_APP_VERSION: &str = "1.0.0";

pub const DEFAULT_APP_NAME: &str = "Flask API";

pub const DEFAULT_GREETING: &str = "Hello from Flask on AKS!";

/// Reported by `/info` when `ENVIRONMENT` is unset
pub const DEFAULT_ENVIRONMENT: &str = "development";

/// Reported by `/info` when `HOSTNAME` is unset
pub const DEFAULT_HOSTNAME: &str = "unknown";

/// Default log filter when RUST_LOG is not set
pub const DEFAULT_LOG_FILTER: &str = "beacon=debug";

/// Default log format (text or json)
pub const DEFAULT_LOG_FORMAT: &str = "text";

/// Seconds to wait for in-flight requests on shutdown
pub const SHUTDOWN_GRACE_PERIOD_SECS: u64 = 30;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// HTTP listener configuration
    #[serde(default)]
    pub http: HttpServerConfig,
    /// Values reported by the informational endpoints
    #[serde(default)]
    pub app: AppInfoConfig,
    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// HTTP server configuration
#[derive(Debug, Clone, Deserialize)]
pub struct HttpServerConfig {
    #[serde(default = "HttpServerConfig::default_host")]
    pub host: String,
    #[serde(default = "HttpServerConfig::default_port")]
    pub port: u16,
}

impl Default for HttpServerConfig {
    fn default() -> Self {
        Self {
            host: Self::default_host(),
            port: Self::default_port(),
        }
    }
}

impl HttpServerConfig {
    fn default_host() -> String {
        DEFAULT_HTTP_HOST.to_string()
    }

    fn default_port() -> u16 {
        DEFAULT_HTTP_PORT
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppInfoConfig {
    /// Application version. `APP_VERSION` takes precedence when set.
    #[serde(default = "AppInfoConfig::default_version")]
    pub version: String,
    /// Application name reported by `/info`
    #[serde(default = "AppInfoConfig::default_name")]
    pub name: String,
    /// Message returned by `/`
    #[serde(default = "AppInfoConfig::default_greeting")]
    pub greeting: String,
}

impl Default for AppInfoConfig {
    fn default() -> Self {
        Self {
            version: Self::default_version(),
            name: Self::default_name(),
            greeting: Self::default_greeting(),
        }
    }
}

impl AppInfoConfig {
    fn default_version() -> String {
        DEFAULT_APP_VERSION.to_string()
    }

    fn default_name() -> String {
        DEFAULT_APP_NAME.to_string()
    }

    fn default_greeting() -> String {
        DEFAULT_GREETING.to_string()
    }
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Log format: "text" (human-readable, default) or "json" (structured)
    #[serde(default = "LoggingConfig::default_format")]
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            format: DEFAULT_LOG_FORMAT.to_string(),
        }
    }
}

impl LoggingConfig {
    fn default_format() -> String {
        DEFAULT_LOG_FORMAT.to_string()
    }

    pub fn is_json(&self) -> bool {
        self.format == "json"
    }
}

impl AppConfig {
    /// Builds the configuration from an optional TOML file and the environment.
    ///
    /// Without a file every setting takes its default, which is the normal
    /// mode inside a container.
    pub fn load<P: AsRef<Path>>(
        path: Option<P>,
        env: &dyn EnvProvider,
    ) -> Result<Self, ConfigError> {
        let config = match path {
            Some(path) => {
                let contents = std::fs::read_to_string(path)?;
                toml::from_str(&contents)?
            }
            None => AppConfig::default(),
        };

        config.with_env_overrides(env).validate()
    }

    /// Applies environment overrides. An empty `APP_VERSION` counts as unset.
    fn with_env_overrides(mut self, env: &dyn EnvProvider) -> Self {
        if let Some(version) = env.var(ENV_APP_VERSION).filter(|v| !v.is_empty()) {
            self.app.version = version;
        }
        self
    }

    fn validate(self) -> Result<Self, ConfigError> {
        if self.app.version.trim().is_empty() {
            return Err(ConfigError::Validation(
                "app.version must not be empty".to_string(),
            ));
        }
        if self.http.port == 0 {
            return Err(ConfigError::Validation(
                "http.port must be between 1 and 65535".to_string(),
            ));
        }
        if self.http.host.parse::<IpAddr>().is_err() {
            return Err(ConfigError::Validation(format!(
                "http.host is not an IP address: {}",
                self.http.host
            )));
        }
        if !matches!(self.logging.format.as_str(), "text" | "json") {
            return Err(ConfigError::Validation(format!(
                "logging.format must be \"text\" or \"json\", got \"{}\"",
                self.logging.format
            )));
        }
        Ok(self)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("Configuration error: {0}")]
    Validation(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::StaticEnv;
    use std::io::Write;

    fn write_config(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_defaults_without_file() {
        let config = AppConfig::load(None::<&str>, &StaticEnv::new()).unwrap();
        assert_eq!(config.http.host, "0.0.0.0");
        assert_eq!(config.http.port, 8080);
        assert_eq!(config.app.version, "1.0.0");
        assert_eq!(config.app.name, "Flask API");
        assert_eq!(config.app.greeting, "Hello from Flask on AKS!");
        assert!(!config.logging.is_json());
    }

    #[test]
    fn test_env_version_overrides_file() {
        let file = write_config("[app]\nversion = \"0.9.0\"\n");
        let env = StaticEnv::new().with(ENV_APP_VERSION, "2.3.1");
        let config = AppConfig::load(Some(file.path()), &env).unwrap();
        assert_eq!(config.app.version, "2.3.1");
    }

    #[test]
    fn test_file_version_used_without_env() {
        let file = write_config("[app]\nversion = \"0.9.0\"\n");
        let config = AppConfig::load(Some(file.path()), &StaticEnv::new()).unwrap();
        assert_eq!(config.app.version, "0.9.0");
    }

    #[test]
    fn test_empty_env_version_is_ignored() {
        let env = StaticEnv::new().with(ENV_APP_VERSION, "");
        let config = AppConfig::load(None::<&str>, &env).unwrap();
        assert_eq!(config.app.version, DEFAULT_APP_VERSION);
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let file = write_config("[http]\nport = 9090\n\n[logging]\nformat = \"json\"\n");
        let config = AppConfig::load(Some(file.path()), &StaticEnv::new()).unwrap();
        assert_eq!(config.http.port, 9090);
        assert_eq!(config.http.host, DEFAULT_HTTP_HOST);
        assert_eq!(config.app.name, DEFAULT_APP_NAME);
        assert!(config.logging.is_json());
    }

    #[test]
    fn test_empty_file_version_rejected() {
        let file = write_config("[app]\nversion = \"  \"\n");
        let err = AppConfig::load(Some(file.path()), &StaticEnv::new()).unwrap_err();
        assert!(matches!(err, ConfigError::Validation(_)));
    }

    #[test]
    fn test_invalid_values_rejected() {
        for contents in [
            "[http]\nport = 0\n",
            "[http]\nhost = \"not-an-ip\"\n",
            "[logging]\nformat = \"yaml\"\n",
        ] {
            let file = write_config(contents);
            let err = AppConfig::load(Some(file.path()), &StaticEnv::new()).unwrap_err();
            assert!(
                matches!(err, ConfigError::Validation(_)),
                "expected validation error for {contents:?}, got {err:?}"
            );
        }
    }

    #[test]
    fn test_malformed_toml() {
        let file = write_config("[http\nport = 1");
        let err = AppConfig::load(Some(file.path()), &StaticEnv::new()).unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.toml");
        let err = AppConfig::load(Some(&path), &StaticEnv::new()).unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }

    #[test]
    fn test_endpoints_match_routes() {
        assert_eq!(ENDPOINTS, ["/", "/health", "/info"]);
    }
}
