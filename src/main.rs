//! recipebox CLI
//!
//! Commands:
//! - `search`, `tags`, `suggest`, `browse` - query the collection
//! - `show`, `add`, `update`, `delete` - manage single recipes
//! - `whoami` - inspect the stored session

use anyhow::Result;
use clap::Parser;
use recipebox::cli::{Cli, Commands};
use recipebox::config::{Config, Overrides};
use recipebox::error::AppError;
use recipebox::tools::{browse, manage, search, tags, whoami, AppContext};
use tracing::debug;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging based on verbosity flags
    let log_level = if cli.quiet {
        "error"
    } else if cli.verbose {
        "debug"
    } else {
        "info"
    };

    tracing_subscriber::fmt()
        .with_env_filter(log_level)
        .with_writer(std::io::stderr) // Log to stderr to keep stdout clean
        .init();

    let Some(command) = cli.command else {
        eprintln!("Error: No command specified. Use --help for usage information.");
        std::process::exit(1);
    };

    let overrides = Overrides {
        api_base: cli.api_base,
        store: cli.store,
        token_file: cli.token_file,
    };

    match run(command, overrides).await {
        Ok(Some(output)) => {
            println!("{}", output);
            Ok(())
        }
        Ok(None) => Ok(()),
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(e.exit_code());
        }
    }
}

/// Execute one command; `None` means it already wrote its own output
async fn run(command: Commands, overrides: Overrides) -> Result<Option<String>, AppError> {
    let config = Config::load(overrides).map_err(|e| AppError::Config(format!("{:#}", e)))?;
    debug!("Configuration: {:?}", config);
    let ctx = AppContext::open(config)?;

    let output = match command {
        Commands::Search(args) => search::execute_search(&ctx, &args).await?,
        Commands::Tags => tags::execute_tags(&ctx).await?,
        Commands::Suggest(args) => tags::execute_suggest(&ctx, &args).await?,
        Commands::Show(args) => manage::execute_show(&ctx, &args.id).await?,
        Commands::Add(args) => manage::execute_add(&ctx, &args.file).await?,
        Commands::Update(args) => manage::execute_update(&ctx, &args.id, &args.file).await?,
        Commands::Delete(args) => manage::execute_delete(&ctx, &args.id).await?,
        Commands::Browse(args) => {
            browse::execute_browse(&ctx, &args.tags).await?;
            return Ok(None);
        }
        Commands::Whoami => whoami::execute_whoami(&ctx)?,
    };
    Ok(Some(output))
}
