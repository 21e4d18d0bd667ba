//! Status command implementation

use anyhow::Result;
use strata_core::MigrationId;

use crate::cli::{GlobalArgs, StatusArgs};
use crate::commands::history::format_record;
use crate::context::MigrationContext;

/// Execute the status command
pub async fn execute(args: &StatusArgs, global: &GlobalArgs) -> Result<()> {
    let id = MigrationId::try_new(args.id.trim())
        .ok_or_else(|| anyhow::anyhow!("Migration id must not be empty"))?;

    let ctx = MigrationContext::new(global).await?;
    let result = ctx.migrator.status(&id).await;
    ctx.close().await;

    match result? {
        Some(record) => println!("{}", format_record(&record)),
        None => println!("Migration {} not found in history", id),
    }
    Ok(())
}
