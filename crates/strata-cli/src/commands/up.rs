//! Up command implementation

use anyhow::Result;
use strata_core::StepLimit;
use strata_engine::RunOutcome;

use crate::cli::{GlobalArgs, StepArgs};
use crate::context::{load_config, MigrationContext};

/// Execute the up command
pub async fn execute(args: &StepArgs, global: &GlobalArgs) -> Result<()> {
    let mut config = load_config(global)?;
    config.steps = StepLimit::from_args(args.steps, args.step);
    log::debug!("Applying up to {} migration(s)", config.steps);

    let ctx = MigrationContext::connect(config).await?;
    println!("Migrations to add:");
    let result = ctx.migrator.up(ctx.config.steps).await;
    ctx.close().await;

    match result? {
        RunOutcome::NothingPending => println!("There are no new migrations to apply."),
        RunOutcome::Completed(ids) => {
            for id in ids {
                println!("Successfully applied migration: {}", id);
            }
        }
    }
    Ok(())
}

#[cfg(test)]
#[path = "up_test.rs"]
mod tests;
