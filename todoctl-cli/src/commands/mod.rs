//! CLI subcommand implementations

pub mod migrate;
pub mod serve;

/// Default database URL when neither flag nor env is set.
pub const DEFAULT_DATABASE_URL: &str = "sqlite://todos.db";
