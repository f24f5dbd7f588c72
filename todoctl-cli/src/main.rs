//! todoctl CLI - multi-list todo web server
//!
//! Entry point for the todoctl command-line tool:
//! - `serve` runs the HTTP server (migrations applied on startup)
//! - `migrate` applies, reverts, or inspects schema migrations

use anyhow::Result;
use clap::{Parser, Subcommand};

mod commands;
mod tracing_setup;

use commands::migrate::MigrateArgs;
use commands::serve::ServeArgs;
use tracing_setup::TracingConfig;

#[derive(Parser, Debug)]
#[command(
    name = "todoctl",
    author,
    version,
    about = "Multi-list todo web server backed by SQLite"
)]
struct Cli {
    /// Enable debug logging
    #[arg(long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run the HTTP server
    Serve(ServeArgs),

    /// Apply, revert, or inspect schema migrations
    Migrate(MigrateArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env if present; real env vars win
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    tracing_setup::init_tracing(&TracingConfig { debug: cli.debug })?;

    match cli.command {
        Commands::Serve(args) => commands::serve::run_serve(args).await,
        Commands::Migrate(args) => commands::migrate::run_migrate(args).await,
    }
}
