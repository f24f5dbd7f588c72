//! Migration command
//!
//! `up` applies every pending step, `down` reverts the most recent
//! one, `status` prints the revision chain with applied markers.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use todoctl_server::db::{create_pool, migrations};

use super::DEFAULT_DATABASE_URL;

/// Arguments for the migrate command
#[derive(Parser, Debug)]
pub struct MigrateArgs {
    /// Database URL (overrides environment)
    #[arg(long, env = "DATABASE_URL")]
    pub database_url: Option<String>,

    #[command(subcommand)]
    pub action: MigrateAction,
}

#[derive(Subcommand, Debug)]
pub enum MigrateAction {
    /// Apply all pending migrations
    Up,
    /// Revert the most recently applied migration
    Down,
    /// Show the migration chain and what is applied
    Status,
}

/// Run the migrate command
pub async fn run_migrate(args: MigrateArgs) -> Result<()> {
    let database_url = args
        .database_url
        .unwrap_or_else(|| DEFAULT_DATABASE_URL.to_owned());

    let pool = create_pool(&database_url)
        .await
        .context("Failed to create database pool")?;

    match args.action {
        MigrateAction::Up => {
            let applied = migrations::upgrade(&pool).await?;
            if applied == 0 {
                println!("Nothing to apply; schema is up to date");
            } else {
                println!("Applied {} migration(s)", applied);
            }
        }
        MigrateAction::Down => match migrations::downgrade(&pool).await? {
            Some(id) => println!("Reverted {}", id),
            None => println!("Nothing to revert; schema is empty"),
        },
        MigrateAction::Status => {
            for step in migrations::status(&pool).await? {
                let marker = if step.applied { "x" } else { " " };
                let parent = step.parent.unwrap_or("(root)");
                println!("[{}] {}  <- {}", marker, step.id, parent);
            }
        }
    }

    Ok(())
}
