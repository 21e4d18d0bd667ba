//! strata-db - Database layer for Strata
//!
//! This crate provides the `Database` trait with DuckDB and sqlx-based
//! (MySQL, PostgreSQL, SQLite) implementations, the per-dialect SQL
//! capability interface, the transactional executor, and the history ledger.

pub mod connect;
pub mod dialect;
pub mod duckdb;
pub mod error;
pub mod executor;
pub mod ledger;
pub mod sqlx_backend;
pub mod traits;

pub use connect::connect;
pub use dialect::{dialect_for, SqlDialect};
pub use duckdb::DuckDbBackend;
pub use error::{DbError, DbResult, ExecutionError};
pub use executor::run_atomically;
pub use ledger::HistoryLedger;
pub use sqlx_backend::{MySqlBackend, PostgresBackend, SqliteBackend};
pub use traits::{Database, Statement, Transaction};
