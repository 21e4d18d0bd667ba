//! sqlx-backed servers: MySQL, PostgreSQL and SQLite
//!
//! The three backends differ only in the sqlx driver type, so their
//! `Database` and `Transaction` impls are generated by one macro. Each
//! backend wraps a single-connection pool opened by
//! [`connect`](crate::connect::connect).

use crate::error::{DbError, DbResult};
use crate::traits::{Database, Statement, Transaction};
use async_trait::async_trait;
use sqlx::Row;
use strata_core::Dialect;

macro_rules! sqlx_backend {
    ($(#[$meta:meta])* $backend:ident, $tx:ident, $driver:ty, $dialect:expr) => {
        $(#[$meta])*
        pub struct $backend {
            pool: sqlx::Pool<$driver>,
        }

        impl $backend {
            /// Wrap an already-opened pool
            pub fn from_pool(pool: sqlx::Pool<$driver>) -> Self {
                Self { pool }
            }
        }

        #[async_trait]
        impl Database for $backend {
            fn dialect(&self) -> Dialect {
                $dialect
            }

            async fn execute(&self, statement: &Statement) -> DbResult<u64> {
                let result = if statement.args.is_empty() {
                    sqlx::Executor::execute(&self.pool, statement.sql.as_str()).await?
                } else {
                    let mut query = sqlx::query::<$driver>(&statement.sql);
                    for arg in &statement.args {
                        query = query.bind(arg.as_str());
                    }
                    query.execute(&self.pool).await?
                };
                Ok(result.rows_affected())
            }

            async fn query_count(&self, sql: &str) -> DbResult<i64> {
                let row = sqlx::query::<$driver>(sql).fetch_one(&self.pool).await?;
                Ok(row.try_get::<i64, _>(0)?)
            }

            async fn query_text(&self, sql: &str, width: usize) -> DbResult<Vec<Vec<String>>> {
                let rows = sqlx::query::<$driver>(sql).fetch_all(&self.pool).await?;
                rows.iter()
                    .map(|row| {
                        (0..width)
                            .map(|i| {
                                row.try_get::<Option<String>, _>(i)
                                    .map(Option::unwrap_or_default)
                                    .map_err(DbError::from)
                            })
                            .collect::<DbResult<Vec<String>>>()
                    })
                    .collect()
            }

            async fn begin(&self) -> DbResult<Box<dyn Transaction>> {
                let tx = self
                    .pool
                    .begin()
                    .await
                    .map_err(|e| DbError::TransactionError(e.to_string()))?;
                Ok(Box::new($tx { tx: Some(tx) }))
            }

            async fn close(&self) {
                self.pool.close().await;
            }
        }

        /// Open transaction; sqlx rolls it back when dropped unfinished
        struct $tx {
            tx: Option<sqlx::Transaction<'static, $driver>>,
        }

        impl $tx {
            fn take(&mut self) -> DbResult<sqlx::Transaction<'static, $driver>> {
                self.tx
                    .take()
                    .ok_or_else(|| DbError::TransactionError("transaction already finished".into()))
            }
        }

        #[async_trait]
        impl Transaction for $tx {
            async fn execute(&mut self, statement: &Statement) -> DbResult<u64> {
                let tx = self
                    .tx
                    .as_mut()
                    .ok_or_else(|| DbError::TransactionError("transaction already finished".into()))?;
                let result = if statement.args.is_empty() {
                    sqlx::Executor::execute(&mut **tx, statement.sql.as_str()).await?
                } else {
                    let mut query = sqlx::query::<$driver>(&statement.sql);
                    for arg in &statement.args {
                        query = query.bind(arg.as_str());
                    }
                    query.execute(&mut **tx).await?
                };
                Ok(result.rows_affected())
            }

            async fn commit(mut self: Box<Self>) -> DbResult<()> {
                self.take()?
                    .commit()
                    .await
                    .map_err(|e| DbError::TransactionError(e.to_string()))
            }

            async fn rollback(mut self: Box<Self>) -> DbResult<()> {
                self.take()?
                    .rollback()
                    .await
                    .map_err(|e| DbError::TransactionError(e.to_string()))
            }
        }
    };
}

sqlx_backend!(
    /// MySQL / MariaDB backend
    MySqlBackend,
    MySqlTransaction,
    sqlx::MySql,
    Dialect::Mysql
);

sqlx_backend!(
    /// PostgreSQL backend
    PostgresBackend,
    PostgresTransaction,
    sqlx::Postgres,
    Dialect::Postgres
);

sqlx_backend!(
    /// SQLite backend
    SqliteBackend,
    SqliteTransaction,
    sqlx::Sqlite,
    Dialect::Sqlite
);

#[cfg(test)]
#[path = "sqlx_backend_test.rs"]
mod tests;
