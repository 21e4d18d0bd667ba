//! DuckDB database backend implementation

use crate::error::{DbError, DbResult};
use crate::traits::{Database, Statement, Transaction};
use async_trait::async_trait;
use duckdb::Connection;
use std::path::Path;
use std::sync::{Arc, Mutex, MutexGuard};
use strata_core::Dialect;

/// DuckDB database backend
pub struct DuckDbBackend {
    conn: Arc<Mutex<Connection>>,
}

impl DuckDbBackend {
    /// Create a new in-memory DuckDB connection
    pub fn in_memory() -> DbResult<Self> {
        let conn =
            Connection::open_in_memory().map_err(|e| DbError::ConnectionError(e.to_string()))?;
        Ok(Self::from_connection(conn))
    }

    /// Create a new DuckDB connection from a file path
    pub fn from_path(path: &Path) -> DbResult<Self> {
        let conn = Connection::open(path).map_err(|e| DbError::ConnectionError(e.to_string()))?;
        Ok(Self::from_connection(conn))
    }

    /// Create from path string (handles :memory: special case)
    pub fn new(path: &str) -> DbResult<Self> {
        if path == ":memory:" {
            Self::in_memory()
        } else {
            Self::from_path(Path::new(path))
        }
    }

    fn from_connection(conn: Connection) -> Self {
        Self {
            conn: Arc::new(Mutex::new(conn)),
        }
    }
}

fn lock(conn: &Mutex<Connection>) -> DbResult<MutexGuard<'_, Connection>> {
    conn.lock()
        .map_err(|e| DbError::MutexPoisoned(e.to_string()))
}

fn execute_sync(conn: &Connection, statement: &Statement) -> DbResult<u64> {
    if statement.args.is_empty() {
        conn.execute_batch(&statement.sql)?;
        Ok(0)
    } else {
        let rows = conn.execute(
            &statement.sql,
            duckdb::params_from_iter(statement.args.iter()),
        )?;
        Ok(rows as u64)
    }
}

#[async_trait]
impl Database for DuckDbBackend {
    fn dialect(&self) -> Dialect {
        Dialect::DuckDb
    }

    async fn execute(&self, statement: &Statement) -> DbResult<u64> {
        let conn = lock(&self.conn)?;
        execute_sync(&conn, statement)
    }

    async fn query_count(&self, sql: &str) -> DbResult<i64> {
        let conn = lock(&self.conn)?;
        let count: i64 = conn.query_row(sql, [], |row| row.get(0))?;
        Ok(count)
    }

    async fn query_text(&self, sql: &str, width: usize) -> DbResult<Vec<Vec<String>>> {
        let conn = lock(&self.conn)?;
        let mut stmt = conn.prepare(sql)?;
        let rows = stmt.query_map([], |row| {
            (0..width)
                .map(|i| row.get::<_, Option<String>>(i).map(Option::unwrap_or_default))
                .collect::<Result<Vec<_>, _>>()
        })?;
        let mut out = Vec::new();
        for row in rows {
            out.push(row?);
        }
        Ok(out)
    }

    async fn begin(&self) -> DbResult<Box<dyn Transaction>> {
        {
            let conn = lock(&self.conn)?;
            conn.execute_batch("BEGIN TRANSACTION")
                .map_err(|e| DbError::TransactionError(e.to_string()))?;
        }
        Ok(Box::new(DuckDbTransaction {
            conn: Arc::clone(&self.conn),
            done: false,
        }))
    }
}

/// Transaction on the shared DuckDB connection
struct DuckDbTransaction {
    conn: Arc<Mutex<Connection>>,
    done: bool,
}

impl DuckDbTransaction {
    fn finish(&mut self, sql: &str) -> DbResult<()> {
        self.done = true;
        let conn = lock(&self.conn)?;
        conn.execute_batch(sql)
            .map_err(|e| DbError::TransactionError(e.to_string()))
    }
}

#[async_trait]
impl Transaction for DuckDbTransaction {
    async fn execute(&mut self, statement: &Statement) -> DbResult<u64> {
        let conn = lock(&self.conn)?;
        execute_sync(&conn, statement)
    }

    async fn commit(mut self: Box<Self>) -> DbResult<()> {
        self.finish("COMMIT")
    }

    async fn rollback(mut self: Box<Self>) -> DbResult<()> {
        self.finish("ROLLBACK")
    }
}

impl Drop for DuckDbTransaction {
    fn drop(&mut self) {
        if self.done {
            return;
        }
        if let Ok(conn) = self.conn.lock() {
            if let Err(e) = conn.execute_batch("ROLLBACK") {
                log::warn!("Rollback of abandoned transaction failed: {}", e);
            }
        }
    }
}

#[cfg(test)]
#[path = "duckdb_test.rs"]
mod tests;
