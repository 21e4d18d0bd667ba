//! Atomic execution of a statement batch

use crate::error::ExecutionError;
use crate::traits::{Database, Statement};

/// Run `statements` in order inside one transaction.
///
/// The first failing statement stops the batch and rolls the transaction
/// back; its zero-based position is reported in the error. An empty batch
/// still opens and commits a transaction. A failed COMMIT or ROLLBACK is
/// logged but does not change the outcome.
pub async fn run_atomically(
    db: &dyn Database,
    statements: &[Statement],
) -> Result<(), ExecutionError> {
    let mut tx = db.begin().await.map_err(ExecutionError::Begin)?;

    for (index, statement) in statements.iter().enumerate() {
        log::debug!("Executing statement {}: {}", index + 1, statement.sql);
        if let Err(source) = tx.execute(statement).await {
            if let Err(e) = tx.rollback().await {
                log::error!("Rollback failed: {}", e);
            }
            return Err(ExecutionError::Statement {
                index,
                sql: statement.sql.clone(),
                source,
            });
        }
    }

    if let Err(e) = tx.commit().await {
        log::error!("Commit failed: {}", e);
    }
    Ok(())
}

#[cfg(test)]
#[path = "executor_test.rs"]
mod tests;
