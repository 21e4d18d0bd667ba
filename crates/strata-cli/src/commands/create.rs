//! Create command implementation

use anyhow::{Context, Result};
use chrono::Local;
use strata_core::{create_migration, ScaffoldOptions};

use crate::cli::{CreateArgs, GlobalArgs};
use crate::context::load_config;

/// Execute the create command
pub async fn execute(args: &CreateArgs, global: &GlobalArgs) -> Result<()> {
    let config = load_config(global)?;
    let options = ScaffoldOptions {
        description: args.desc.clone(),
        with_scripts: args.script,
    };

    let migration = create_migration(&config.migration_path, &options, Local::now().naive_local())
        .context("Failed to create migration")?;
    log::debug!("Created {}", migration.path().display());

    println!("Successfully created new migration: {}", migration.id());
    Ok(())
}

#[cfg(test)]
#[path = "create_test.rs"]
mod tests;
