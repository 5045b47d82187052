//! Tracing setup shared by the CLI and the preview server.

use crate::config::{LogFormat, LoggingConfig};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Build filter directives string from LoggingConfig
///
/// Constructs a tracing filter string that includes the base log level
/// and any component-specific log levels configured in the LoggingConfig.
///
/// # Examples
///
/// ```
/// use watchdash::config::{LogFormat, LoggingConfig};
/// use watchdash::logging::build_filter_directives;
/// use std::collections::HashMap;
///
/// let mut component_levels = HashMap::new();
/// component_levels.insert("client".to_string(), "debug".to_string());
///
/// let config = LoggingConfig {
///     level: "info".to_string(),
///     format: LogFormat::Pretty,
///     component_levels: Some(component_levels),
/// };
///
/// assert_eq!(build_filter_directives(&config), "info,watchdash::client=debug");
/// ```
pub fn build_filter_directives(config: &LoggingConfig) -> String {
    let mut filter_str = config.level.clone();

    if let Some(component_levels) = &config.component_levels {
        let mut components: Vec<_> = component_levels.iter().collect();
        components.sort();
        for (component, level) in components {
            filter_str.push_str(&format!(",watchdash::{}={}", component, level));
        }
    }

    filter_str
}

/// Initialize tracing based on configuration
///
/// `RUST_LOG` takes precedence over the configured directives. Logs go to
/// stderr so command output on stdout stays parseable.
pub fn init_tracing(config: &LoggingConfig) -> Result<(), Box<dyn std::error::Error>> {
    let filter_str = build_filter_directives(config);

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&filter_str));

    match config.format {
        LogFormat::Pretty => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(
                    tracing_subscriber::fmt::layer()
                        .pretty()
                        .with_writer(std::io::stderr),
                )
                .try_init()?;
        }
        LogFormat::Json => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(
                    tracing_subscriber::fmt::layer()
                        .json()
                        .with_writer(std::io::stderr),
                )
                .try_init()?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_build_filter_directives_base_level_only() {
        let config = LoggingConfig {
            level: "warn".to_string(),
            format: LogFormat::Pretty,
            component_levels: None,
        };
        assert_eq!(build_filter_directives(&config), "warn");
    }

    #[test]
    fn test_build_filter_directives_components_sorted() {
        let mut component_levels = HashMap::new();
        component_levels.insert("preview".to_string(), "info".to_string());
        component_levels.insert("api".to_string(), "trace".to_string());

        let config = LoggingConfig {
            level: "warn".to_string(),
            format: LogFormat::Json,
            component_levels: Some(component_levels),
        };
        assert_eq!(
            build_filter_directives(&config),
            "warn,watchdash::api=trace,watchdash::preview=info"
        );
    }

    #[test]
    fn test_build_filter_directives_empty_components() {
        let config = LoggingConfig {
            level: "debug".to_string(),
            format: LogFormat::Pretty,
            component_levels: Some(HashMap::new()),
        };
        assert_eq!(build_filter_directives(&config), "debug");
    }
}
