//! History command implementation

use anyhow::{Context, Result};
use strata_core::MigrationRecord;

use crate::cli::{GlobalArgs, HistoryArgs, OutputFormat};
use crate::commands::pending::print_pending;
use crate::context::MigrationContext;

/// Execute the history command
pub async fn execute(args: &HistoryArgs, global: &GlobalArgs) -> Result<()> {
    let ctx = MigrationContext::new(global).await?;
    let result = report(&ctx, args).await;
    ctx.close().await;
    result
}

async fn report(ctx: &MigrationContext, args: &HistoryArgs) -> Result<()> {
    let records = ctx.migrator.history().await?;

    match args.output {
        OutputFormat::Json => print_json(&records)?,
        OutputFormat::Table => {
            println!("History of Migrations:");
            for record in &records {
                println!("{}", format_record(record));
            }
            if records.is_empty() {
                println!("Migrations not added yet! You can check if there are new migrations");
                print_pending(&ctx.migrator.pending().await?);
            }
        }
    }
    Ok(())
}

/// One ledger record as a listing line
pub(crate) fn format_record(record: &MigrationRecord) -> String {
    format!(
        "Migration: {}, Applied At: {}",
        record.id,
        record.applied_at_display()
    )
}

fn print_json(records: &[MigrationRecord]) -> Result<()> {
    let json = serde_json::to_string_pretty(records).context("Failed to serialize to JSON")?;
    println!("{}", json);
    Ok(())
}

#[cfg(test)]
#[path = "history_test.rs"]
mod tests;
