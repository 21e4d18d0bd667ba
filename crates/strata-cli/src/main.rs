//! Strata CLI - directory-driven schema migrations

use anyhow::Result;
use clap::Parser;

mod cli;
mod commands;
mod context;

use cli::Cli;
use commands::{create, down, history, pending, status, up};

/// Modules whose log output is shown at the chosen level; everything else
/// is limited to warnings.
const LOG_TARGETS: &[&str] = &["strata", "strata_core", "strata_db", "strata_engine"];

fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "info" };
    let mut filter = String::from("warn");
    for target in LOG_TARGETS {
        filter.push_str(&format!(",{target}={level}"));
    }
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(filter))
        .format_timestamp(None)
        .format_target(false)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.global.verbose);

    match &cli.command {
        cli::Commands::History(args) => history::execute(args, &cli.global).await,
        cli::Commands::Pending(args) => pending::execute(args, &cli.global).await,
        cli::Commands::Up(args) => up::execute(args, &cli.global).await,
        cli::Commands::Down(args) => down::execute(args, &cli.global).await,
        cli::Commands::Status(args) => status::execute(args, &cli.global).await,
        cli::Commands::Create(args) => create::execute(args, &cli.global).await,
    }
}
