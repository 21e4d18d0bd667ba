//! Migration history ledger
//!
//! One row per applied migration in the configured table. All SQL comes
//! from the active [`SqlDialect`]; this module never branches on dialect.

use crate::dialect::{dialect_for, SqlDialect};
use crate::error::{DbError, DbResult};
use crate::traits::{Database, Statement};
use chrono::Utc;
use std::sync::Arc;
use strata_core::{MigrationId, MigrationRecord};

/// CRUD over the history table
pub struct HistoryLedger {
    db: Arc<dyn Database>,
    dialect: &'static dyn SqlDialect,
    table: String,
}

impl HistoryLedger {
    /// Ledger over `table` using the dialect of `db`
    pub fn new(db: Arc<dyn Database>, table: impl Into<String>) -> Self {
        let dialect = dialect_for(db.dialect());
        Self {
            db,
            dialect,
            table: table.into(),
        }
    }

    /// Create the history table if it does not exist.
    ///
    /// Returns `true` when the table was created by this call.
    pub async fn ensure_table(&self) -> DbResult<bool> {
        let exists = self
            .db
            .query_count(&self.dialect.table_exists_query(&self.table))
            .await?
            > 0;
        if exists {
            log::debug!("Table {} already exists", self.table);
            return Ok(false);
        }

        self.db
            .execute(&Statement::new(self.dialect.create_table_query(&self.table)))
            .await?;
        log::info!("Table {} created", self.table);
        Ok(true)
    }

    /// Statement recording `id` as applied now
    pub fn insert_statement(&self, id: &MigrationId) -> Statement {
        let now = self.dialect.format_timestamp(Utc::now().naive_utc());
        Statement::with_args(
            self.dialect.insert_record_query(&self.table),
            vec![id.to_string(), now],
        )
    }

    /// Statement deleting the record for `id`
    pub fn remove_statement(&self, id: &MigrationId) -> Statement {
        Statement::with_args(
            self.dialect.delete_record_query(&self.table),
            vec![id.to_string()],
        )
    }

    /// Record `id` as applied
    pub async fn insert(&self, id: &MigrationId) -> DbResult<()> {
        self.db
            .execute(&self.insert_statement(id))
            .await
            .map_err(|e| map_write_error(id, e))?;
        Ok(())
    }

    /// Delete the record for `id`; absent ids are not an error
    pub async fn remove(&self, id: &MigrationId) -> DbResult<()> {
        let rows = self.db.execute(&self.remove_statement(id)).await?;
        if rows == 0 {
            log::debug!("No history record for {}", id);
        }
        Ok(())
    }

    /// Every record, ascending by migration id
    pub async fn list_all(&self) -> DbResult<Vec<MigrationRecord>> {
        let rows = self
            .db
            .query_text(&self.dialect.select_history_query(&self.table), 2)
            .await
            .map_err(|e| DbError::LedgerRead(e.to_string()))?;

        let mut records = rows
            .into_iter()
            .map(|row| {
                let [id, applied_at]: [String; 2] = row.try_into().map_err(|row: Vec<String>| {
                    DbError::LedgerRead(format!("expected 2 columns, got {}", row.len()))
                })?;
                let id = MigrationId::try_new(id)
                    .ok_or_else(|| DbError::LedgerRead("empty migration id".into()))?;
                Ok(MigrationRecord {
                    id,
                    applied_at: self.dialect.parse_timestamp(&applied_at)?,
                })
            })
            .collect::<DbResult<Vec<_>>>()?;
        records.sort_by(|a, b| a.id.cmp(&b.id));
        Ok(records)
    }

    /// The record for `id`, if it has been applied
    pub async fn find(&self, id: &MigrationId) -> DbResult<Option<MigrationRecord>> {
        Ok(self.list_all().await?.into_iter().find(|r| &r.id == id))
    }
}

/// Turn a primary-key violation on a ledger write into `DuplicateMigration`
pub fn map_write_error(id: &MigrationId, err: DbError) -> DbError {
    match err {
        DbError::UniqueViolation(_) => DbError::DuplicateMigration(id.to_string()),
        other => other,
    }
}

#[cfg(test)]
#[path = "ledger_test.rs"]
mod tests;
