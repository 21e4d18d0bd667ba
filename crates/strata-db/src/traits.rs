//! Database trait definitions

use crate::error::DbResult;
use async_trait::async_trait;
use strata_core::Dialect;

/// One SQL statement with positional text arguments.
///
/// Placeholders follow the backend (`?` or `$n`); see
/// [`SqlDialect`](crate::dialect::SqlDialect). A statement without arguments
/// is sent as plain text, so DDL the backend cannot prepare still runs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Statement {
    pub sql: String,
    pub args: Vec<String>,
}

impl Statement {
    /// Statement without arguments
    pub fn new(sql: impl Into<String>) -> Self {
        Self {
            sql: sql.into(),
            args: Vec::new(),
        }
    }

    /// Statement with positional arguments
    pub fn with_args(sql: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            sql: sql.into(),
            args,
        }
    }
}

impl From<String> for Statement {
    fn from(sql: String) -> Self {
        Statement::new(sql)
    }
}

impl From<&str> for Statement {
    fn from(sql: &str) -> Self {
        Statement::new(sql)
    }
}

/// Database abstraction trait for Strata
///
/// Implementations hold exactly one session; calls are serialized.
#[async_trait]
pub trait Database: Send + Sync {
    /// Dialect of this backend
    fn dialect(&self) -> Dialect;

    /// Database type identifier for logging
    fn db_type(&self) -> &'static str {
        self.dialect().as_str()
    }

    /// Execute one statement outside any explicit transaction, returning
    /// affected rows where the backend reports them
    async fn execute(&self, statement: &Statement) -> DbResult<u64>;

    /// Run a single-row, single-column integer query (existence checks)
    async fn query_count(&self, sql: &str) -> DbResult<i64>;

    /// Run a query whose first `width` columns are all text
    async fn query_text(&self, sql: &str, width: usize) -> DbResult<Vec<Vec<String>>>;

    /// Open a transaction on the session
    async fn begin(&self) -> DbResult<Box<dyn Transaction>>;

    /// Release the session; further calls fail
    async fn close(&self) {}
}

/// An open transaction; dropped without commit means rolled back.
#[async_trait]
pub trait Transaction: Send {
    /// Execute one statement inside the transaction
    async fn execute(&mut self, statement: &Statement) -> DbResult<u64>;

    /// Commit the transaction
    async fn commit(self: Box<Self>) -> DbResult<()>;

    /// Roll the transaction back
    async fn rollback(self: Box<Self>) -> DbResult<()>;
}
