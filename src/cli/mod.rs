//! CLI module for watchdash
//!
//! Command-line interface definitions and handlers for the watchlist dashboard.
//!
//! # Commands
//!
//! - `status` - Check backend connectivity
//! - `summary` / `watching` / `history` / `detail` - Read views
//! - `add` / `remove` / `delete-history` / `notice` - Mutations (confirmed)
//! - `render` - Write a full HTML snapshot of the dashboard
//! - `serve` - Start the read-only preview server
//! - `config` - Configuration utilities (init)
//! - `completions` - Generate shell completions
//!
//! # Example
//!
//! ```bash
//! # Show counters from a remote backend
//! watchdash summary --backend-url http://10.0.0.2:8000
//!
//! # Alerted history as JSON
//! watchdash history --filter alerted --json
//!
//! # Generate shell completions
//! watchdash completions bash > ~/.bash_completion.d/watchdash
//! ```

pub mod commands;
pub mod completions;
pub mod config;
pub mod output;
pub mod prompt;
pub mod serve;

pub use completions::handle_completions;
pub use config::handle_config_init;

use crate::api::HistoryFilter;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// watchdash - Stock watchlist dashboard
#[derive(Parser, Debug)]
#[command(
    name = "watchdash",
    version,
    about = "Stock watchlist dashboard client"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Check backend connectivity
    Status(StatusArgs),
    /// Show dashboard counters
    Summary(ViewArgs),
    /// List stocks currently being watched
    Watching(ViewArgs),
    /// List watch history
    History(HistoryArgs),
    /// Show one stock with its daily prices
    Detail(DetailArgs),
    /// Add a stock to the watchlist
    Add(AddArgs),
    /// Remove a stock from the watchlist
    Remove(RemoveArgs),
    /// Delete a history record
    DeleteHistory(DeleteHistoryArgs),
    /// Broadcast a notice to subscribers
    Notice(NoticeArgs),
    /// Render the dashboard to a standalone HTML file
    Render(RenderArgs),
    /// Start the read-only preview server
    Serve(ServeArgs),
    /// Configuration utilities
    #[command(subcommand)]
    Config(ConfigCommands),
    /// Generate shell completions
    Completions(CompletionsArgs),
}

/// Options shared by every command that talks to the backend.
#[derive(Args, Debug, Clone)]
pub struct BackendArgs {
    /// Path to configuration file
    #[arg(short, long, default_value = "watchdash.toml")]
    pub config: PathBuf,

    /// Override backend base URL
    #[arg(short, long, env = "WATCHDASH_BACKEND_URL")]
    pub backend_url: Option<String>,
}

#[derive(Args, Debug)]
pub struct StatusArgs {
    #[command(flatten)]
    pub backend: BackendArgs,
}

#[derive(Args, Debug)]
pub struct ViewArgs {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,

    #[command(flatten)]
    pub backend: BackendArgs,
}

#[derive(Args, Debug)]
pub struct HistoryArgs {
    /// Filter by outcome (all, alerted, expired)
    #[arg(short, long, default_value = "all")]
    pub filter: HistoryFilter,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,

    #[command(flatten)]
    pub backend: BackendArgs,
}

#[derive(Args, Debug)]
pub struct DetailArgs {
    /// Stock code (e.g., 005930)
    pub code: String,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,

    #[command(flatten)]
    pub backend: BackendArgs,
}

#[derive(Args, Debug)]
pub struct AddArgs {
    /// Stock name as listed on the exchange
    pub name: String,

    #[command(flatten)]
    pub backend: BackendArgs,
}

#[derive(Args, Debug)]
pub struct RemoveArgs {
    /// Stock code to remove
    pub code: String,

    /// Stock name shown in the confirmation prompt
    #[arg(short, long)]
    pub name: Option<String>,

    /// Skip the confirmation prompt
    #[arg(short, long)]
    pub yes: bool,

    #[command(flatten)]
    pub backend: BackendArgs,
}

#[derive(Args, Debug)]
pub struct DeleteHistoryArgs {
    /// History record id
    pub id: i64,

    /// Stock name shown in the confirmation prompt
    #[arg(short, long)]
    pub name: Option<String>,

    /// Skip the confirmation prompt
    #[arg(short, long)]
    pub yes: bool,

    #[command(flatten)]
    pub backend: BackendArgs,
}

#[derive(Args, Debug)]
pub struct NoticeArgs {
    /// Notice text
    pub message: String,

    /// Skip the confirmation prompt
    #[arg(short, long)]
    pub yes: bool,

    #[command(flatten)]
    pub backend: BackendArgs,
}

#[derive(Args, Debug)]
pub struct RenderArgs {
    /// History filter tab to render active
    #[arg(short, long, default_value = "all")]
    pub filter: HistoryFilter,

    /// Render the detail page for this stock code
    #[arg(short, long)]
    pub detail: Option<String>,

    /// Write to a file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    #[command(flatten)]
    pub backend: BackendArgs,
}

#[derive(Args, Debug)]
pub struct ServeArgs {
    /// Override server port
    #[arg(short, long, env = "WATCHDASH_PORT")]
    pub port: Option<u16>,

    /// Override server host
    #[arg(short = 'H', long, env = "WATCHDASH_HOST")]
    pub host: Option<String>,

    /// Set log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "WATCHDASH_LOG_LEVEL")]
    pub log_level: Option<String>,

    #[command(flatten)]
    pub backend: BackendArgs,
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Initialize a new configuration file
    Init(ConfigInitArgs),
}

#[derive(Args, Debug)]
pub struct ConfigInitArgs {
    /// Output file path
    #[arg(short, long, default_value = "watchdash.toml")]
    pub output: PathBuf,

    /// Overwrite existing file
    #[arg(short, long)]
    pub force: bool,
}

#[derive(Args, Debug)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: clap_complete::Shell,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_cli_parse_status_defaults() {
        let cli = Cli::try_parse_from(["watchdash", "status"]).unwrap();
        match cli.command {
            Commands::Status(args) => {
                assert_eq!(args.backend.config, PathBuf::from("watchdash.toml"));
            }
            _ => panic!("Expected Status command"),
        }
    }

    #[test]
    fn test_cli_parse_backend_url() {
        let cli = Cli::try_parse_from([
            "watchdash",
            "summary",
            "--backend-url",
            "http://10.0.0.2:8000",
            "--json",
        ])
        .unwrap();
        match cli.command {
            Commands::Summary(args) => {
                assert!(args.json);
                assert_eq!(args.backend.backend_url.as_deref(), Some("http://10.0.0.2:8000"));
            }
            _ => panic!("Expected Summary command"),
        }
    }

    #[test]
    fn test_cli_parse_history_filter() {
        let cli = Cli::try_parse_from(["watchdash", "history", "--filter", "expired"]).unwrap();
        match cli.command {
            Commands::History(args) => assert_eq!(args.filter, HistoryFilter::Expired),
            _ => panic!("Expected History command"),
        }
    }

    #[test]
    fn test_cli_parse_history_invalid_filter() {
        let result = Cli::try_parse_from(["watchdash", "history", "--filter", "watching"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_cli_parse_remove_with_yes() {
        let cli = Cli::try_parse_from([
            "watchdash", "remove", "005930", "--name", "Samsung", "--yes",
        ])
        .unwrap();
        match cli.command {
            Commands::Remove(args) => {
                assert_eq!(args.code, "005930");
                assert_eq!(args.name.as_deref(), Some("Samsung"));
                assert!(args.yes);
            }
            _ => panic!("Expected Remove command"),
        }
    }

    #[test]
    fn test_cli_parse_delete_history() {
        let cli = Cli::try_parse_from(["watchdash", "delete-history", "42"]).unwrap();
        match cli.command {
            Commands::DeleteHistory(args) => {
                assert_eq!(args.id, 42);
                assert!(!args.yes);
            }
            _ => panic!("Expected DeleteHistory command"),
        }
    }

    #[test]
    fn test_cli_parse_render() {
        let cli = Cli::try_parse_from([
            "watchdash", "render", "--detail", "005930", "-o", "out.html",
        ])
        .unwrap();
        match cli.command {
            Commands::Render(args) => {
                assert_eq!(args.detail.as_deref(), Some("005930"));
                assert_eq!(args.output, Some(PathBuf::from("out.html")));
                assert_eq!(args.filter, HistoryFilter::All);
            }
            _ => panic!("Expected Render command"),
        }
    }

    #[test]
    fn test_cli_parse_serve_with_port() {
        let cli = Cli::try_parse_from(["watchdash", "serve", "-p", "9000"]).unwrap();
        match cli.command {
            Commands::Serve(args) => assert_eq!(args.port, Some(9000)),
            _ => panic!("Expected Serve command"),
        }
    }

    #[test]
    fn test_cli_parse_config_init() {
        let cli = Cli::try_parse_from(["watchdash", "config", "init", "--force"]).unwrap();
        match cli.command {
            Commands::Config(ConfigCommands::Init(args)) => assert!(args.force),
            _ => panic!("Expected Config Init command"),
        }
    }

    #[test]
    fn test_cli_debug_assert() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
