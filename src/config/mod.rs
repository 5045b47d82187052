//! Configuration module for watchdash
//!
//! Provides layered configuration loading from files, environment variables, and defaults.
//!
//! # Configuration Precedence
//!
//! 1. CLI arguments (highest priority)
//! 2. Environment variables (`WATCHDASH_*`)
//! 3. Configuration file (TOML)
//! 4. Default values (lowest priority)
//!
//! # Example
//!
//! ```rust
//! use watchdash::config::DashboardConfig;
//!
//! let config = DashboardConfig::default();
//! assert_eq!(config.backend.base_url, "http://localhost:8000");
//!
//! let toml = r#"
//! [backend]
//! base_url = "http://10.0.0.2:8000"
//! "#;
//! let config: DashboardConfig = toml::from_str(toml).unwrap();
//! assert_eq!(config.backend.base_url, "http://10.0.0.2:8000");
//! ```

pub mod backend;
pub mod display;
pub mod error;
pub mod logging;
pub mod server;

pub use backend::BackendConfig;
pub use display::{DisplayConfig, SuccessRateSource};
pub use error::ConfigError;
pub use logging::{LogFormat, LoggingConfig, LOG_COMPONENTS};
pub use server::ServerConfig;

use chrono::format::{Item, StrftimeItems};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Unified configuration for the dashboard client, CLI and preview server.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct DashboardConfig {
    /// Watchlist backend connection
    pub backend: BackendConfig,
    /// Formatting and presentation
    pub display: DisplayConfig,
    /// Preview server
    pub server: ServerConfig,
    /// Logging configuration
    pub logging: LoggingConfig,
}

impl DashboardConfig {
    /// Load configuration from a TOML file
    ///
    /// If path is None, returns default configuration.
    /// If path doesn't exist, returns NotFound error.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(p) => {
                if !p.exists() {
                    return Err(ConfigError::NotFound(p.to_path_buf()));
                }
                let content = std::fs::read_to_string(p)?;
                toml::from_str(&content).map_err(|e| ConfigError::Parse(e.to_string()))
            }
            None => Ok(Self::default()),
        }
    }

    /// Apply environment variable overrides
    ///
    /// Invalid values are silently ignored (defaults are kept).
    pub fn with_env_overrides(mut self) -> Self {
        if let Ok(url) = std::env::var("WATCHDASH_BACKEND_URL") {
            if !url.is_empty() {
                self.backend.base_url = url;
            }
        }

        if let Ok(port) = std::env::var("WATCHDASH_PORT") {
            if let Ok(p) = port.parse() {
                self.server.port = p;
            }
        }
        if let Ok(host) = std::env::var("WATCHDASH_HOST") {
            self.server.host = host;
        }

        if let Ok(level) = std::env::var("WATCHDASH_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Ok(format) = std::env::var("WATCHDASH_LOG_FORMAT") {
            if let Ok(f) = format.parse() {
                self.logging.format = f;
            }
        }

        self
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.backend.base_url.is_empty() {
            return Err(ConfigError::validation(
                "backend.base_url",
                "URL cannot be empty",
            ));
        }
        if let Err(e) = reqwest::Url::parse(&self.backend.base_url) {
            return Err(ConfigError::validation(
                "backend.base_url",
                format!("invalid URL: {}", e),
            ));
        }
        if self.backend.request_timeout_seconds == Some(0) {
            return Err(ConfigError::validation(
                "backend.request_timeout_seconds",
                "timeout must be non-zero when set",
            ));
        }

        if !matches!(self.display.rate_precision, 1 | 2) {
            return Err(ConfigError::validation(
                "display.rate_precision",
                "precision must be 1 or 2",
            ));
        }
        if self.display.date_format.is_empty() {
            return Err(ConfigError::validation(
                "display.date_format",
                "date format cannot be empty",
            ));
        }
        if StrftimeItems::new(&self.display.date_format).any(|item| matches!(item, Item::Error)) {
            return Err(ConfigError::validation(
                "display.date_format",
                "invalid strftime pattern",
            ));
        }
        if self.display.message_display_seconds == 0 {
            return Err(ConfigError::validation(
                "display.message_display_seconds",
                "display window must be non-zero",
            ));
        }

        if self.server.port == 0 {
            return Err(ConfigError::validation(
                "server.port",
                "port must be non-zero",
            ));
        }

        let unknown = self.logging.unknown_components();
        if !unknown.is_empty() {
            return Err(ConfigError::validation(
                "logging.component_levels",
                format!(
                    "unknown component(s) {}; expected one of {}",
                    unknown.join(", "),
                    LOG_COMPONENTS.join(", ")
                ),
            ));
        }

        Ok(())
    }
}
