use clap::Parser;
use watchdash::cli::{
    commands, handle_completions, handle_config_init, serve, Cli, Commands, ConfigCommands,
};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Status(args) => commands::handle_status(&args).await,
        Commands::Summary(args) => commands::handle_summary(&args).await,
        Commands::Watching(args) => commands::handle_watching(&args).await,
        Commands::History(args) => commands::handle_history(&args).await,
        Commands::Detail(args) => commands::handle_detail(&args).await,
        Commands::Add(args) => commands::handle_add(&args).await,
        Commands::Remove(args) => commands::handle_remove(&args).await,
        Commands::DeleteHistory(args) => commands::handle_delete_history(&args).await,
        Commands::Notice(args) => commands::handle_notice(&args).await,
        Commands::Render(args) => commands::handle_render(&args).await,
        Commands::Serve(args) => serve::run_serve(args).await.map(|_| String::new()),
        Commands::Config(ConfigCommands::Init(args)) => handle_config_init(&args),
        Commands::Completions(args) => {
            handle_completions(&args);
            Ok(String::new())
        }
    };

    match result {
        Ok(output) => {
            if !output.is_empty() {
                println!("{}", output);
            }
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}
