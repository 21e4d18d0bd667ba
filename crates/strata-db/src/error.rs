//! Error types for strata-db

use thiserror::Error;

/// Database operation errors
#[derive(Error, Debug)]
pub enum DbError {
    /// Connection error (D001)
    #[error("[D001] Database connection failed: {0}")]
    ConnectionError(String),

    /// Query execution error (D002)
    #[error("[D002] SQL execution failed: {0}")]
    ExecutionError(String),

    /// Primary-key or unique constraint violated (D003)
    #[error("[D003] Unique constraint violated: {0}")]
    UniqueViolation(String),

    /// Transaction management error (D004)
    #[error("[D004] Transaction failed: {0}")]
    TransactionError(String),

    /// Mutex poisoned (D005)
    #[error("[D005] Database mutex poisoned: {0}")]
    MutexPoisoned(String),

    /// Ledger rows could not be read or parsed (D006)
    #[error("[D006] Failed to read migration history: {0}")]
    LedgerRead(String),

    /// Migration already recorded in the ledger (D007)
    #[error("[D007] Migration {0} is already recorded in the history table")]
    DuplicateMigration(String),

    /// Internal error (D008)
    #[error("[D008] Internal database error: {0}")]
    Internal(String),
}

/// Result type alias for DbError
pub type DbResult<T> = Result<T, DbError>;

/// Failure of an atomic statement batch
#[derive(Error, Debug)]
pub enum ExecutionError {
    /// The transaction could not be opened (X001)
    #[error("[X001] Failed to begin transaction: {0}")]
    Begin(#[source] DbError),

    /// A statement failed; the batch was rolled back (X002)
    #[error("[X002] Statement {} failed, batch rolled back: {source}\n  {sql}", .index + 1)]
    Statement {
        /// Zero-based position of the failing statement
        index: usize,
        sql: String,
        #[source]
        source: DbError,
    },
}

impl ExecutionError {
    /// Zero-based index of the failing statement, if one was executed
    pub fn failed_index(&self) -> Option<usize> {
        match self {
            ExecutionError::Begin(_) => None,
            ExecutionError::Statement { index, .. } => Some(*index),
        }
    }

    /// Consume the error, returning the underlying database error
    pub fn into_db_error(self) -> DbError {
        match self {
            ExecutionError::Begin(e) => e,
            ExecutionError::Statement { source, .. } => source,
        }
    }
}

impl From<duckdb::Error> for DbError {
    fn from(err: duckdb::Error) -> Self {
        // duckdb::Error does not expose constraint kinds, so violations are
        // recognised by message.
        let msg = err.to_string();
        let lower = msg.to_ascii_lowercase();
        if lower.contains("duplicate key")
            || lower.contains("violates primary key constraint")
            || lower.contains("violates unique constraint")
            || lower.contains("primary key or unique constraint violated")
        {
            DbError::UniqueViolation(msg)
        } else {
            DbError::ExecutionError(msg)
        }
    }
}

impl From<sqlx::Error> for DbError {
    fn from(err: sqlx::Error) -> Self {
        match &err {
            sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
                DbError::UniqueViolation(db_err.to_string())
            }
            sqlx::Error::Configuration(_)
            | sqlx::Error::Io(_)
            | sqlx::Error::Tls(_)
            | sqlx::Error::PoolTimedOut
            | sqlx::Error::PoolClosed => DbError::ConnectionError(err.to_string()),
            _ => DbError::ExecutionError(err.to_string()),
        }
    }
}
