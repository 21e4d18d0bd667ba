//! Down command implementation

use anyhow::Result;
use strata_core::StepLimit;
use strata_engine::RunOutcome;

use crate::cli::{GlobalArgs, StepArgs};
use crate::context::{load_config, MigrationContext};

/// Execute the down command
pub async fn execute(args: &StepArgs, global: &GlobalArgs) -> Result<()> {
    let mut config = load_config(global)?;
    config.steps = StepLimit::from_args(args.steps, args.step);
    log::debug!("Reverting up to {} migration(s)", config.steps);

    let ctx = MigrationContext::connect(config).await?;
    println!("Migrations to remove:");
    let result = ctx.migrator.down(ctx.config.steps).await;
    ctx.close().await;

    match result? {
        RunOutcome::NothingPending => println!("There is nothing to remove!"),
        RunOutcome::Completed(ids) => {
            for id in ids {
                println!("Migration '{}' has been successfully removed.", id);
            }
        }
    }
    Ok(())
}
