//! Forward and reverse migration workflows

use crate::error::{EngineError, EngineResult};
use crate::hooks::ScriptRunner;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use strata_core::{
    discovery, split_statements, Config, MigrationDir, MigrationId, MigrationRecord, StepLimit,
};
use strata_db::ledger::map_write_error;
use strata_db::{run_atomically, Database, HistoryLedger, Statement};

/// Result of one workflow run
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunOutcome {
    /// There was nothing to apply (or revert)
    NothingPending,
    /// These migrations were processed, in order
    Completed(Vec<MigrationId>),
}

/// A migration found on disk but not in the ledger
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingMigration {
    pub id: MigrationId,
    pub description: Option<String>,
}

/// Reconciles the migration directory with the history ledger
pub struct Migrator {
    db: Arc<dyn Database>,
    ledger: HistoryLedger,
    root: PathBuf,
    hooks: Arc<dyn ScriptRunner>,
    debug: bool,
}

impl Migrator {
    /// Create a migrator over `db` for the configured directory and table
    pub fn new(db: Arc<dyn Database>, config: &Config, hooks: Arc<dyn ScriptRunner>) -> Self {
        let ledger = HistoryLedger::new(Arc::clone(&db), config.table_name.clone());
        Self {
            db,
            ledger,
            root: config.migration_path.clone(),
            hooks,
            debug: config.debug,
        }
    }

    /// Create the history table if needed
    pub async fn ensure_table(&self) -> EngineResult<bool> {
        Ok(self.ledger.ensure_table().await?)
    }

    /// Apply pending migrations in ascending order, up to `steps` of them.
    ///
    /// For each migration the `up.sh` hook runs first, then the split
    /// `up.sql` body and the ledger insert run as one transaction. The
    /// first failure stops the run; earlier migrations stay applied.
    pub async fn up(&self, steps: StepLimit) -> EngineResult<RunOutcome> {
        let applied = self.ledger.list_all().await?;
        let pending = discovery::pending(&self.root, applied.iter().map(|r| &r.id))?;
        if pending.is_empty() {
            return Ok(RunOutcome::NothingPending);
        }

        let mut done = Vec::new();
        for id in steps.head(&pending) {
            self.apply(id).await?;
            log::info!("Applied migration {}", id);
            done.push(id.clone());
        }
        Ok(RunOutcome::Completed(done))
    }

    /// Revert applied migrations, restricted to the last `steps` records.
    ///
    /// A count of zero does not restrict: every record is reverted. The
    /// selected records are processed in ascending id order. For each
    /// one the split `down.sql` body and the ledger delete run as one
    /// transaction, then the `down.sh` hook runs.
    pub async fn down(&self, steps: StepLimit) -> EngineResult<RunOutcome> {
        let history = self.ledger.list_all().await?;
        if history.is_empty() {
            return Ok(RunOutcome::NothingPending);
        }

        let selected = match steps {
            StepLimit::Count(0) => &history[..],
            limit => limit.tail(&history),
        };

        let mut done = Vec::new();
        for record in selected {
            self.revert(&record.id).await?;
            log::info!("Reverted migration {}", record.id);
            done.push(record.id.clone());
        }
        Ok(RunOutcome::Completed(done))
    }

    /// All ledger records, ascending by id
    pub async fn history(&self) -> EngineResult<Vec<MigrationRecord>> {
        Ok(self.ledger.list_all().await?)
    }

    /// Migrations on disk that are not yet applied, with their descriptions
    pub async fn pending(&self) -> EngineResult<Vec<PendingMigration>> {
        let applied = self.ledger.list_all().await?;
        let pending = discovery::pending(&self.root, applied.iter().map(|r| &r.id))?;
        Ok(pending
            .into_iter()
            .map(|id| {
                let description = MigrationDir::new(&self.root, &id).description();
                PendingMigration { id, description }
            })
            .collect())
    }

    /// Ledger record for one id, if applied
    pub async fn status(&self, id: &MigrationId) -> EngineResult<Option<MigrationRecord>> {
        Ok(self.ledger.find(id).await?)
    }

    async fn apply(&self, id: &MigrationId) -> EngineResult<()> {
        let dir = MigrationDir::new(&self.root, id);
        let body = dir.read_up()?;

        if let Some(script) = dir.up_script() {
            self.run_hook(&script).await?;
        }

        let mut batch = self.body_statements(&body);
        let body_len = batch.len();
        batch.push(self.ledger.insert_statement(id));

        run_atomically(self.db.as_ref(), &batch)
            .await
            .map_err(|e| {
                if e.failed_index() == Some(body_len) {
                    EngineError::Record {
                        id: id.clone(),
                        source: map_write_error(id, e.into_db_error()),
                    }
                } else {
                    EngineError::Apply {
                        id: id.clone(),
                        source: e,
                    }
                }
            })
    }

    async fn revert(&self, id: &MigrationId) -> EngineResult<()> {
        let dir = MigrationDir::new(&self.root, id);
        let body = dir.read_down()?;

        let mut batch = self.body_statements(&body);
        let body_len = batch.len();
        batch.push(self.ledger.remove_statement(id));

        run_atomically(self.db.as_ref(), &batch)
            .await
            .map_err(|e| {
                if e.failed_index() == Some(body_len) {
                    EngineError::Unrecord {
                        id: id.clone(),
                        source: e.into_db_error(),
                    }
                } else {
                    EngineError::Revert {
                        id: id.clone(),
                        source: e,
                    }
                }
            })?;

        if let Some(script) = dir.down_script() {
            self.run_hook(&script).await?;
        }
        Ok(())
    }

    fn body_statements(&self, body: &str) -> Vec<Statement> {
        if self.debug {
            log::info!("-- DEBUG SQL:\n{}", body);
        }
        split_statements(body)
            .into_iter()
            .map(Statement::from)
            .collect()
    }

    async fn run_hook(&self, script: &Path) -> EngineResult<()> {
        let output = self.hooks.run(script).await?;
        if self.debug {
            log::info!("-- DEBUG SCRIPT:\n{}", output.output);
        }
        output.into_result(script)?;
        Ok(())
    }
}

#[cfg(test)]
#[path = "engine_test.rs"]
mod tests;
