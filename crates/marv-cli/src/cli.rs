//! CLI argument definitions using clap derive API

use clap::{Args, Parser, Subcommand, ValueEnum};

/// Marv - a schema migration sequencer for DuckDB
#[derive(Parser, Debug)]
#[command(name = "marv")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Global options
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Global arguments available to all commands
#[derive(Args, Debug, Clone)]
pub struct GlobalArgs {
    /// Path to the migrations directory
    #[arg(short, long, global = true, default_value = "migrations")]
    pub directory: String,

    /// Path to the DuckDB database file (:memory: for a transient database)
    #[arg(long, global = true, default_value = "marv.duckdb", env = "MARV_DATABASE")]
    pub database: String,

    /// Name of the history-tracking table
    #[arg(long, global = true, default_value = "migrations")]
    pub table: String,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Scan the migrations directory and apply pending migrations
    Migrate(MigrateArgs),

    /// List migrations and their applied status
    Ls(LsArgs),

    /// Drop the history-tracking store
    Drop(DropArgs),
}

/// Arguments for the migrate command
#[derive(Args, Debug)]
pub struct MigrateArgs {
    /// Namespace stamped onto scanned migrations
    #[arg(short, long)]
    pub namespace: Option<String>,

    /// Pattern applied to candidate filenames
    #[arg(short, long)]
    pub filter: Option<String>,

    /// Suppress deprecation warnings
    #[arg(short, long)]
    pub quiet: bool,
}

/// Arguments for the ls command
#[derive(Args, Debug)]
pub struct LsArgs {
    /// Namespace stamped onto scanned migrations
    #[arg(short, long)]
    pub namespace: Option<String>,

    /// Pattern applied to candidate filenames
    #[arg(short, long)]
    pub filter: Option<String>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "table")]
    pub output: LsOutput,
}

/// List output formats
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum LsOutput {
    /// Table format
    Table,
    /// JSON output
    Json,
}

/// Arguments for the drop command
#[derive(Args, Debug)]
pub struct DropArgs {
    /// Skip the confirmation message and drop immediately
    #[arg(short = 'y', long)]
    pub yes: bool,
}

#[cfg(test)]
#[path = "cli_test.rs"]
mod tests;
