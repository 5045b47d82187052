//! Serve command implementation

use crate::api::HttpApiClient;
use crate::cli::commands::load_config;
use crate::cli::ServeArgs;
use crate::config::DashboardConfig;
use crate::logging::init_tracing;
use crate::preview::{create_router, PreviewState};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

/// Load configuration with CLI overrides
pub fn load_config_with_overrides(
    args: &ServeArgs,
) -> Result<DashboardConfig, Box<dyn std::error::Error>> {
    let mut config = load_config(&args.backend)?;

    // Apply CLI overrides (highest priority)
    if let Some(port) = args.port {
        config.server.port = port;
    }
    if let Some(ref host) = args.host {
        config.server.host = host.clone();
    }
    if let Some(ref log_level) = args.log_level {
        config.logging.level = log_level.clone();
    }

    config.validate()?;
    Ok(config)
}

/// Wait for shutdown signal (SIGINT or SIGTERM)
async fn shutdown_signal(cancel_token: CancellationToken) {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to install CTRL+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received SIGINT, shutting down...");
        }
        _ = terminate => {
            tracing::info!("Received SIGTERM, shutting down...");
        }
        _ = cancel_token.cancelled() => {
            tracing::info!("Shutdown requested");
        }
    }

    cancel_token.cancel();
}

/// Bind and serve the preview until `cancel_token` fires or a signal arrives
pub async fn serve_preview(
    config: DashboardConfig,
    cancel_token: CancellationToken,
) -> Result<(), Box<dyn std::error::Error>> {
    let api = Arc::new(HttpApiClient::new(&config.backend)?);
    let addr = format!("{}:{}", config.server.host, config.server.port);
    let state = Arc::new(PreviewState::new(api, Arc::new(config)));
    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(addr = %addr, "Preview server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(cancel_token))
        .await?;

    Ok(())
}

/// Main serve command handler
pub async fn run_serve(args: ServeArgs) -> Result<(), Box<dyn std::error::Error>> {
    // 1. Load and merge configuration
    let config = load_config_with_overrides(&args)?;

    // 2. Initialize tracing
    init_tracing(&config.logging)?;

    tracing::info!(backend = %config.backend.base_url, "Starting watchdash preview");
    tracing::debug!(?config, "Loaded configuration");

    // 3. Serve until shutdown
    serve_preview(config, CancellationToken::new()).await?;

    tracing::info!("Preview server stopped");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::BackendArgs;
    use std::path::PathBuf;
    use std::time::Duration;
    use tempfile::NamedTempFile;

    fn serve_args(config: PathBuf) -> ServeArgs {
        ServeArgs {
            port: None,
            host: None,
            log_level: None,
            backend: BackendArgs {
                config,
                backend_url: Some("http://localhost:8000".to_string()),
            },
        }
    }

    #[test]
    fn test_serve_config_loading() {
        let temp = NamedTempFile::new().unwrap();
        std::fs::write(temp.path(), "[server]\nport = 8080").unwrap();

        let config = load_config_with_overrides(&serve_args(temp.path().to_path_buf())).unwrap();
        assert_eq!(config.server.port, 8080);
    }

    #[test]
    fn test_serve_cli_overrides_config() {
        let temp = NamedTempFile::new().unwrap();
        std::fs::write(temp.path(), "[server]\nport = 8080").unwrap();

        let mut args = serve_args(temp.path().to_path_buf());
        args.port = Some(9090);
        args.log_level = Some("debug".to_string());

        let config = load_config_with_overrides(&args).unwrap();
        assert_eq!(config.server.port, 9090);
        assert_eq!(config.logging.level, "debug");
    }

    #[test]
    fn test_serve_works_without_config_file() {
        let config =
            load_config_with_overrides(&serve_args(PathBuf::from("nonexistent.toml"))).unwrap();
        assert_eq!(config.server.host, "127.0.0.1");
    }

    #[tokio::test]
    async fn test_shutdown_signal_returns_on_cancel() {
        let cancel = CancellationToken::new();
        let handle = tokio::spawn(shutdown_signal(cancel.clone()));

        cancel.cancel();
        let result = tokio::time::timeout(Duration::from_secs(1), handle).await;
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_serve_preview_stops_on_cancel() {
        let mut config = DashboardConfig::default();
        config.server.port = 0;
        let cancel = CancellationToken::new();
        let handle = tokio::spawn({
            let cancel = cancel.clone();
            async move { serve_preview(config, cancel).await.map_err(|e| e.to_string()) }
        });

        tokio::time::sleep(Duration::from_millis(50)).await;
        cancel.cancel();
        let result = tokio::time::timeout(Duration::from_secs(2), handle)
            .await
            .unwrap()
            .unwrap();
        assert!(result.is_ok());
    }
}
