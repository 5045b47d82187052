//! `[logging]` section: level, output format and per-module overrides.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::str::FromStr;

/// Modules that accept their own level under `component_levels`.
pub const LOG_COMPONENTS: &[&str] = &["api", "cli", "client", "preview", "view"];

/// Where tracing output goes: human-readable or one JSON object per line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

impl FromStr for LogFormat {
    type Err = String;

    /// Accepts the `WATCHDASH_LOG_FORMAT` spellings, case-insensitive.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pretty" => Ok(LogFormat::Pretty),
            "json" => Ok(LogFormat::Json),
            _ => Err(format!("unknown log format '{}' (expected pretty or json)", s)),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Base filter; CLI commands stay quiet on stderr at `warn`
    pub level: String,
    pub format: LogFormat,
    /// Per-module levels keyed by [`LOG_COMPONENTS`], e.g. `client = "debug"`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub component_levels: Option<HashMap<String, String>>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
            format: LogFormat::Pretty,
            component_levels: None,
        }
    }
}

impl LoggingConfig {
    /// Configured component names that are not watchdash modules, sorted.
    pub fn unknown_components(&self) -> Vec<&str> {
        let mut unknown: Vec<&str> = self
            .component_levels
            .iter()
            .flat_map(|levels| levels.keys())
            .map(String::as_str)
            .filter(|name| !LOG_COMPONENTS.contains(name))
            .collect();
        unknown.sort_unstable();
        unknown
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_keep_cli_quiet() {
        let config = LoggingConfig::default();
        assert_eq!(config.level, "warn");
        assert_eq!(config.format, LogFormat::Pretty);
        assert!(config.component_levels.is_none());
        assert!(config.unknown_components().is_empty());
    }

    #[test]
    fn test_logging_section_from_toml() {
        let config: LoggingConfig = toml::from_str(
            r#"
            format = "json"
            [component_levels]
            client = "debug"
            "#,
        )
        .unwrap();
        assert_eq!(config.level, "warn");
        assert_eq!(config.format, LogFormat::Json);
        assert_eq!(
            config.component_levels.unwrap().get("client").map(String::as_str),
            Some("debug")
        );
    }

    #[test]
    fn test_unknown_components_are_reported() {
        let levels = [("routing", "debug"), ("api", "trace"), ("health", "info")]
            .into_iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        let config = LoggingConfig {
            component_levels: Some(levels),
            ..Default::default()
        };
        assert_eq!(config.unknown_components(), vec!["health", "routing"]);
    }

    #[test]
    fn test_log_format_from_env_spelling() {
        assert_eq!("JSON".parse::<LogFormat>().unwrap(), LogFormat::Json);
        assert_eq!("pretty".parse::<LogFormat>().unwrap(), LogFormat::Pretty);
        assert!("xml".parse::<LogFormat>().unwrap_err().contains("pretty or json"));
    }
}
