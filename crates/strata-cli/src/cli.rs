//! CLI argument definitions using clap derive API

use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Strata - apply and revert SQL migrations kept in a directory tree
#[derive(Parser, Debug)]
#[command(name = "strata")]
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
///
/// Each connection flag falls back to an environment variable and then to
/// the config file.
#[derive(Args, Debug, Clone, Default)]
pub struct GlobalArgs {
    /// Enable verbose (debug) logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Config file (default: strata.yml in the current directory, if present)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Migration root directory
    #[arg(long, global = true, env = "MIGRATION_PATH")]
    pub path: Option<PathBuf>,

    /// Database type: mysql, postgres, sqlite or duckdb
    #[arg(long, global = true, env = "DB_TYPE")]
    pub db_type: Option<String>,

    /// Database host
    #[arg(long, global = true, env = "DB_HOST")]
    pub db_host: Option<String>,

    /// Database port
    #[arg(long, global = true, env = "DB_PORT")]
    pub db_port: Option<u16>,

    /// Database user
    #[arg(long, global = true, env = "DB_USER")]
    pub db_user: Option<String>,

    /// Database password
    #[arg(long, global = true, env = "DB_PASSWORD", hide_env_values = true)]
    pub db_password: Option<String>,

    /// Database name, or file path for sqlite and duckdb
    #[arg(long, global = true, env = "DB_NAME")]
    pub db_name: Option<String>,

    /// History table name
    #[arg(long, global = true, env = "DB_TABLE")]
    pub db_table: Option<String>,

    /// Print each SQL body and hook output as it runs
    #[arg(long, global = true)]
    pub debug: bool,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show applied migrations
    History(HistoryArgs),

    /// List migrations that have not been applied
    #[command(alias = "new")]
    Pending(PendingArgs),

    /// Apply pending migrations
    Up(StepArgs),

    /// Revert the most recently applied migrations
    Down(StepArgs),

    /// Show whether one migration has been applied
    Status(StatusArgs),

    /// Create a new migration directory
    Create(CreateArgs),
}

/// Listing output formats
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Plain text lines
    #[default]
    Table,
    /// JSON output
    Json,
}

/// Arguments for the history command
#[derive(Args, Debug, Default)]
pub struct HistoryArgs {
    /// Output format
    #[arg(short, long, value_enum, default_value = "table")]
    pub output: OutputFormat,
}

/// Arguments for the pending command
#[derive(Args, Debug, Default)]
pub struct PendingArgs {
    /// Output format
    #[arg(short, long, value_enum, default_value = "table")]
    pub output: OutputFormat,
}

/// Arguments for the up and down commands
#[derive(Args, Debug)]
pub struct StepArgs {
    /// Maximum number of migrations to process (negative: all)
    #[arg(long, default_value_t = -1, allow_negative_numbers = true)]
    pub steps: i64,

    /// Process exactly one migration
    #[arg(long)]
    pub step: bool,
}

impl Default for StepArgs {
    fn default() -> Self {
        Self {
            steps: -1,
            step: false,
        }
    }
}

/// Arguments for the status command
#[derive(Args, Debug)]
pub struct StatusArgs {
    /// Migration id
    pub id: String,
}

/// Arguments for the create command
#[derive(Args, Debug, Default)]
pub struct CreateArgs {
    /// Short description, saved as <description>.txt
    #[arg(short, long)]
    pub desc: Option<String>,

    /// Also create up.sh and down.sh hook scripts
    #[arg(long)]
    pub script: bool,
}

#[cfg(test)]
#[path = "cli_test.rs"]
mod tests;
