//! Pending command implementation

use anyhow::{Context, Result};
use serde::Serialize;
use strata_engine::PendingMigration;

use crate::cli::{GlobalArgs, OutputFormat, PendingArgs};
use crate::context::MigrationContext;

/// Pending migration as serialized for `--output json`
#[derive(Debug, Serialize)]
struct PendingRow<'a> {
    id: &'a str,
    description: Option<&'a str>,
}

/// Execute the pending command
pub async fn execute(args: &PendingArgs, global: &GlobalArgs) -> Result<()> {
    let ctx = MigrationContext::new(global).await?;
    let result = report(&ctx, args).await;
    ctx.close().await;
    result
}

async fn report(ctx: &MigrationContext, args: &PendingArgs) -> Result<()> {
    let pending = ctx.migrator.pending().await?;

    match args.output {
        OutputFormat::Table => print_pending(&pending),
        OutputFormat::Json => {
            let rows: Vec<PendingRow<'_>> = pending
                .iter()
                .map(|p| PendingRow {
                    id: p.id.as_str(),
                    description: p.description.as_deref(),
                })
                .collect();
            let json =
                serde_json::to_string_pretty(&rows).context("Failed to serialize to JSON")?;
            println!("{}", json);
        }
    }
    Ok(())
}

/// Print the pending set as listing lines
pub(crate) fn print_pending(pending: &[PendingMigration]) {
    println!("New migrations to add:");
    for migration in pending {
        println!("{}", format_pending(migration));
    }
    if pending.is_empty() {
        println!("There is nothing to add!");
    }
}

fn format_pending(migration: &PendingMigration) -> String {
    match &migration.description {
        Some(desc) => format!("Migration: {}, will be added ({})", migration.id, desc),
        None => format!("Migration: {}, will be added", migration.id),
    }
}

#[cfg(test)]
#[path = "pending_test.rs"]
mod tests;
