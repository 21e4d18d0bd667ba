//! Runtime context for CLI commands

use anyhow::{Context, Result};
use std::path::Path;
use std::str::FromStr;
use std::sync::Arc;
use strata_core::{Config, Dialect};
use strata_db::Database;
use strata_engine::{BashRunner, Migrator};

use crate::cli::GlobalArgs;

/// Build the configuration for this run: config file (explicit or
/// discovered in the current directory), then command-line and
/// environment overrides.
pub(crate) fn load_config(global: &GlobalArgs) -> Result<Config> {
    let mut config = match &global.config {
        Some(path) => Config::load(path).context("Failed to load configuration file")?,
        None => Config::discover(Path::new(".")).context("Failed to load configuration")?,
    };

    if let Some(path) = &global.path {
        config.migration_path = path.clone();
    }
    if let Some(table) = &global.db_table {
        config.table_name = table.clone();
    }
    if let Some(db_type) = &global.db_type {
        config.database.dialect = Dialect::from_str(db_type)?;
    }

    let db = &mut config.database;
    if global.db_host.is_some() {
        db.host = global.db_host.clone();
    }
    if global.db_port.is_some() {
        db.port = global.db_port;
    }
    if global.db_user.is_some() {
        db.user = global.db_user.clone();
    }
    if global.db_password.is_some() {
        db.password = global.db_password.clone();
    }
    if global.db_name.is_some() {
        db.name = global.db_name.clone();
    }

    config.debug = global.debug;
    config.validate()?;
    Ok(config)
}

/// Configuration plus an open connection and a migrator over it
pub(crate) struct MigrationContext {
    pub config: Config,
    pub migrator: Migrator,
    db: Arc<dyn Database>,
}

impl MigrationContext {
    /// Load configuration from global arguments and connect
    pub async fn new(global: &GlobalArgs) -> Result<Self> {
        Self::connect(load_config(global)?).await
    }

    /// Connect using an already-built configuration and make sure the
    /// history table exists
    pub async fn connect(config: Config) -> Result<Self> {
        let db = strata_db::connect(&config.database)
            .await
            .context("Failed to connect to database")?;
        log::debug!("Connected to {} database", db.db_type());

        let migrator = Migrator::new(Arc::clone(&db), &config, Arc::new(BashRunner));
        migrator
            .ensure_table()
            .await
            .context("Failed to prepare the history table")?;

        Ok(Self {
            config,
            migrator,
            db,
        })
    }

    /// Release the database session
    pub async fn close(&self) {
        self.db.close().await;
    }
}

#[cfg(test)]
#[path = "context_test.rs"]
mod tests;
