//! Chunkwise CLI
//!
//! Main entry point for the chunkwise command-line tool.
//! Feeds large code files and patches through a chunked question/answer
//! session and prints the stitched-together report.

mod cache;
mod commands;

use clap::{Parser, Subcommand};
use commands::{ExplainCommand, ReviewCommand};
use chunkwise_core::{config::AppConfig, logging, AppResult};
use std::path::PathBuf;

/// Chunkwise CLI - chunked summaries and reviews for large files
#[derive(Parser, Debug)]
#[command(name = "chunkwise")]
#[command(about = "Chunked summaries and reviews for large files", long_about = None)]
#[command(version)]
struct Cli {
    /// Path to config file
    #[arg(short, long, global = true, env = "CHUNKWISE_CONFIG")]
    config: Option<PathBuf>,

    /// Model identifier
    #[arg(short, long, global = true, env = "CHUNKWISE_MODEL")]
    model: Option<String>,

    /// Language the model should reply in
    #[arg(short, long, global = true, env = "CHUNKWISE_LANGUAGE")]
    language: Option<String>,

    /// Completion provider (openai)
    #[arg(short, long, global = true, env = "CHUNKWISE_PROVIDER")]
    provider: Option<String>,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long, global = true, env = "RUST_LOG")]
    log_level: Option<String>,

    /// Enable verbose output (sets log level to debug)
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Disable colored output
    #[arg(long, global = true, env = "NO_COLOR")]
    no_color: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Explain a code file section by section
    Explain(ExplainCommand),

    /// Review a patch file and draft a commit message
    Review(ReviewCommand),
}

#[tokio::main]
async fn main() -> AppResult<()> {
    // Parse command-line arguments first (needed for logging config)
    let cli = Cli::parse();

    // Load base configuration, honoring the --config flag
    let config = AppConfig::load_from(cli.config)?;

    // Apply CLI overrides
    let config = config.with_overrides(
        cli.model,
        cli.language,
        cli.provider,
        cli.log_level,
        cli.verbose,
        cli.no_color,
    );

    // Initialize logging with final configuration
    logging::init_logging(config.log_level.as_deref(), config.no_color)?;

    tracing::info!("Chunkwise CLI starting");
    tracing::debug!("Model: {}", config.model);
    tracing::debug!("Provider: {}", config.provider);
    tracing::debug!("Save dir: {:?}", config.save_dir);

    config.ensure_save_dir()?;

    let command_name = match &cli.command {
        Commands::Explain(_) => "explain",
        Commands::Review(_) => "review",
    };
    let _span = tracing::info_span!("command", name = command_name).entered();

    let result = match cli.command {
        Commands::Explain(cmd) => cmd.execute(&config).await,
        Commands::Review(cmd) => cmd.execute(&config).await,
    };

    match &result {
        Ok(_) => tracing::info!("Command completed successfully"),
        Err(e) => tracing::error!("Command failed: {}", e),
    }

    result
}
