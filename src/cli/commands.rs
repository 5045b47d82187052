//! Handlers for commands that talk to the backend
//!
//! Each `handle_*` function loads configuration, builds an HTTP client and
//! delegates to a generic function over [`WatchlistApi`] that produces the
//! text printed on stdout.

use super::output;
use super::prompt::TerminalPrompter;
use super::{
    AddArgs, BackendArgs, DeleteHistoryArgs, DetailArgs, HistoryArgs, NoticeArgs, RemoveArgs,
    RenderArgs, StatusArgs, ViewArgs,
};
use crate::api::{HistoryFilter, HttpApiClient, WatchStatus, WatchlistApi};
use crate::client::{AddOutcome, DashboardClient, MutationOutcome, NonInteractive, Prompter};
use crate::config::{DashboardConfig, SuccessRateSource};
use crate::dom::PageId;
use crate::format::Formatter;
use crate::view::{render, render_page};
use colored::Colorize;
use std::error::Error;
use std::sync::Arc;

type CommandResult = Result<String, Box<dyn Error>>;

/// Load configuration for a backend command
///
/// A missing config file is not an error; defaults are used instead.
pub fn load_config(args: &BackendArgs) -> Result<DashboardConfig, Box<dyn Error>> {
    let mut config = if args.config.exists() {
        DashboardConfig::load(Some(&args.config))?
    } else {
        tracing::debug!("Config file not found, using defaults");
        DashboardConfig::default()
    };

    config = config.with_env_overrides();

    if let Some(ref url) = args.backend_url {
        config.backend.base_url = url.clone();
    }

    config.validate()?;
    Ok(config)
}

/// Loaded configuration plus an HTTP client for it.
pub struct CommandContext {
    pub config: DashboardConfig,
    pub api: Arc<HttpApiClient>,
}

impl CommandContext {
    pub fn load(args: &BackendArgs) -> Result<Self, Box<dyn Error>> {
        let config = load_config(args)?;
        if let Err(e) = crate::logging::init_tracing(&config.logging) {
            eprintln!("Warning: Failed to initialize logging: {}", e);
        }
        let api = Arc::new(HttpApiClient::new(&config.backend)?);
        Ok(Self { config, api })
    }

    fn formatter(&self) -> Formatter {
        Formatter::from_config(&self.config.display)
    }

    fn client(&self, prompter: Arc<dyn Prompter>) -> DashboardClient<HttpApiClient> {
        DashboardClient::new(Arc::clone(&self.api), prompter, &self.config.display)
    }
}

// ----- generic command bodies -----

/// Connectivity line; disconnected is an error so the exit code is 1.
pub async fn status<A: WatchlistApi>(api: &A, backend_url: &str) -> CommandResult {
    match api.health().await {
        Ok(()) => Ok(format!("{} Connected to {}", "✓".green(), backend_url)),
        Err(e) => Err(format!("Disconnected from {}: {}", backend_url, e).into()),
    }
}

pub async fn summary<A: WatchlistApi>(
    api: &A,
    fmt: &Formatter,
    source: SuccessRateSource,
    json: bool,
) -> CommandResult {
    let summary = api.summary().await?;
    if json {
        let rate = match source {
            SuccessRateSource::Server => summary.alert_success_rate,
            SuccessRateSource::Derived => summary.derived_success_rate(),
        };
        return Ok(output::format_summary_json(&summary, rate)?);
    }
    let view = render::summary_view(&summary, fmt, source);
    Ok(output::format_summary_table(&view))
}

pub async fn watching<A: WatchlistApi>(api: &A, fmt: &Formatter, json: bool) -> CommandResult {
    let entries = api.watchlist(Some(WatchStatus::Watching)).await?;
    if json {
        return Ok(output::format_entries_json(&entries)?);
    }
    if entries.is_empty() {
        return Ok(render::EMPTY_WATCHING.to_string());
    }
    Ok(output::format_entries_table(&entries, fmt))
}

pub async fn history<A: WatchlistApi>(
    api: &A,
    fmt: &Formatter,
    filter: HistoryFilter,
    json: bool,
) -> CommandResult {
    let entries = api.history(filter).await?;
    if json {
        return Ok(output::format_entries_json(&entries)?);
    }
    if entries.is_empty() {
        return Ok(render::EMPTY_HISTORY.to_string());
    }
    Ok(output::format_entries_table(&entries, fmt))
}

pub async fn detail<A: WatchlistApi>(
    api: &A,
    fmt: &Formatter,
    code: &str,
    alert_threshold_rate: f64,
    json: bool,
) -> CommandResult {
    let detail = api.detail(code).await?;
    if json {
        return Ok(output::format_detail_json(&detail)?);
    }
    Ok(output::format_detail(&detail, fmt, alert_threshold_rate))
}

pub async fn add<A: WatchlistApi>(client: &DashboardClient<A>, name: &str) -> CommandResult {
    match client.add_stock(name).await {
        AddOutcome::Added(entry) => {
            let shown = if entry.stock_name.is_empty() {
                name.trim()
            } else {
                entry.stock_name.as_str()
            };
            let code = if entry.stock_code.is_empty() {
                String::new()
            } else {
                format!(" ({})", entry.stock_code)
            };
            Ok(format!(
                "{} Added {}{} to the watchlist",
                "✓".green(),
                shown,
                code
            ))
        }
        AddOutcome::Rejected => Err("Stock name cannot be empty".into()),
        AddOutcome::Busy => Err("Another submission is in progress".into()),
        AddOutcome::Failed(e) => Err(e.user_message("Could not reach the server.").into()),
    }
}

fn mutation_result(outcome: MutationOutcome, done: String, fallback: &str) -> CommandResult {
    match outcome {
        MutationOutcome::Done => Ok(format!("{} {}", "✓".green(), done)),
        MutationOutcome::Declined => Ok("Cancelled".to_string()),
        MutationOutcome::Rejected => Err(fallback.to_string().into()),
        MutationOutcome::Failed(e) => Err(e.user_message(fallback).into()),
    }
}

pub async fn remove<A: WatchlistApi>(
    client: &DashboardClient<A>,
    code: &str,
    name: Option<&str>,
) -> CommandResult {
    let outcome = client.remove_stock(code, name.unwrap_or_default()).await;
    mutation_result(
        outcome,
        format!("Removed {} from the watchlist", name.unwrap_or(code)),
        "Failed to remove the stock.",
    )
}

pub async fn delete_history<A: WatchlistApi>(
    client: &DashboardClient<A>,
    id: i64,
    name: Option<&str>,
) -> CommandResult {
    let outcome = client
        .delete_history_record(id, name.unwrap_or_default())
        .await;
    mutation_result(
        outcome,
        format!("Deleted history record #{}", id),
        "Failed to delete the history record.",
    )
}

pub async fn notice<A: WatchlistApi>(client: &DashboardClient<A>, message: &str) -> CommandResult {
    let outcome = client.send_notice(message).await;
    if outcome == MutationOutcome::Rejected {
        return Err("Notice message cannot be empty".into());
    }
    mutation_result(outcome, "Notice sent".to_string(), "Failed to send the notice.")
}

/// Full HTML page for the requested view.
pub async fn render_html<A: WatchlistApi>(
    client: &DashboardClient<A>,
    title: &str,
    filter: HistoryFilter,
    detail_code: Option<&str>,
) -> String {
    let page = if detail_code.is_some() {
        PageId::Detail
    } else if filter != HistoryFilter::All {
        PageId::History
    } else {
        PageId::Dashboard
    };
    client.restore_view(page, filter);

    match detail_code {
        Some(code) => {
            tokio::join!(client.initialize(), client.show_detail(code));
        }
        None => {
            client.initialize().await;
        }
    }

    render_page(&client.document(), title).into_string()
}

// ----- handlers -----

/// Handle `watchdash status`
pub async fn handle_status(args: &StatusArgs) -> CommandResult {
    let ctx = CommandContext::load(&args.backend)?;
    status(ctx.api.as_ref(), &ctx.config.backend.base_url).await
}

/// Handle `watchdash summary`
pub async fn handle_summary(args: &ViewArgs) -> CommandResult {
    let ctx = CommandContext::load(&args.backend)?;
    summary(
        ctx.api.as_ref(),
        &ctx.formatter(),
        ctx.config.display.success_rate,
        args.json,
    )
    .await
}

/// Handle `watchdash watching`
pub async fn handle_watching(args: &ViewArgs) -> CommandResult {
    let ctx = CommandContext::load(&args.backend)?;
    watching(ctx.api.as_ref(), &ctx.formatter(), args.json).await
}

/// Handle `watchdash history`
pub async fn handle_history(args: &HistoryArgs) -> CommandResult {
    let ctx = CommandContext::load(&args.backend)?;
    history(ctx.api.as_ref(), &ctx.formatter(), args.filter, args.json).await
}

/// Handle `watchdash detail`
pub async fn handle_detail(args: &DetailArgs) -> CommandResult {
    let ctx = CommandContext::load(&args.backend)?;
    detail(
        ctx.api.as_ref(),
        &ctx.formatter(),
        &args.code,
        ctx.config.display.alert_threshold_rate,
        args.json,
    )
    .await
}

/// Handle `watchdash add`
pub async fn handle_add(args: &AddArgs) -> CommandResult {
    let ctx = CommandContext::load(&args.backend)?;
    let client = ctx.client(Arc::new(NonInteractive));
    add(&client, &args.name).await
}

/// Handle `watchdash remove`
pub async fn handle_remove(args: &RemoveArgs) -> CommandResult {
    let ctx = CommandContext::load(&args.backend)?;
    let client = ctx.client(Arc::new(TerminalPrompter::new(args.yes)));
    remove(&client, &args.code, args.name.as_deref()).await
}

/// Handle `watchdash delete-history`
pub async fn handle_delete_history(args: &DeleteHistoryArgs) -> CommandResult {
    let ctx = CommandContext::load(&args.backend)?;
    let client = ctx.client(Arc::new(TerminalPrompter::new(args.yes)));
    delete_history(&client, args.id, args.name.as_deref()).await
}

/// Handle `watchdash notice`
pub async fn handle_notice(args: &NoticeArgs) -> CommandResult {
    let ctx = CommandContext::load(&args.backend)?;
    let client = ctx.client(Arc::new(TerminalPrompter::new(args.yes)));
    notice(&client, &args.message).await
}

/// Handle `watchdash render`
pub async fn handle_render(args: &RenderArgs) -> CommandResult {
    let ctx = CommandContext::load(&args.backend)?;
    let client = ctx.client(Arc::new(NonInteractive));
    let html = render_html(
        &client,
        &ctx.config.display.title,
        args.filter,
        args.detail.as_deref(),
    )
    .await;

    match &args.output {
        Some(path) => {
            std::fs::write(path, html)?;
            Ok(format!("{} Dashboard written to {}", "✓".green(), path.display()))
        }
        None => Ok(html),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn backend_args(config: PathBuf, url: Option<&str>) -> BackendArgs {
        BackendArgs {
            config,
            backend_url: url.map(str::to_string),
        }
    }

    #[test]
    fn test_load_config_missing_file_uses_defaults() {
        let args = backend_args(PathBuf::from("nonexistent.toml"), Some("http://localhost:8000"));
        let config = load_config(&args).unwrap();
        assert_eq!(config.server.port, 3000);
    }

    #[test]
    fn test_load_config_cli_url_overrides_file() {
        let temp = tempfile::NamedTempFile::new().unwrap();
        std::fs::write(temp.path(), "[backend]\nbase_url = \"http://file:8000\"").unwrap();

        let args = backend_args(temp.path().to_path_buf(), Some("http://cli:9000"));
        let config = load_config(&args).unwrap();
        assert_eq!(config.backend.base_url, "http://cli:9000");
    }

    #[test]
    fn test_load_config_rejects_invalid_url() {
        let args = backend_args(PathBuf::from("nonexistent.toml"), Some("not a url"));
        assert!(load_config(&args).is_err());
    }
}
