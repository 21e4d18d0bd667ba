//! Per-dialect SQL for the history ledger.
//!
//! Every place the ledger's SQL differs between backends (introspection,
//! DDL, placeholders, timestamp text) lives behind [`SqlDialect`]. One
//! implementation is chosen at startup with [`dialect_for`].
//!
//! Table names are interpolated unquoted; callers validate them as plain
//! identifiers first (see `strata_core::Config::validate`).

use crate::error::{DbError, DbResult};
use chrono::{DateTime, NaiveDateTime};
use strata_core::Dialect;

/// Timestamp text exchanged with every backend
pub const SQL_TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Dialect capability interface used by the ledger
pub trait SqlDialect: Send + Sync {
    /// Which dialect this is
    fn dialect(&self) -> Dialect;

    /// `SELECT COUNT(*)` that is non-zero when `table` exists
    fn table_exists_query(&self, table: &str) -> String;

    /// `CREATE TABLE` for the ledger
    fn create_table_query(&self, table: &str) -> String;

    /// Insert taking (migration, applied_at text)
    fn insert_record_query(&self, table: &str) -> String;

    /// Delete taking (migration)
    fn delete_record_query(&self, table: &str) -> String;

    /// Select (migration, applied_at as text) ordered by migration
    fn select_history_query(&self, table: &str) -> String;

    /// Render a timestamp for [`insert_record_query`](Self::insert_record_query)
    fn format_timestamp(&self, ts: NaiveDateTime) -> String {
        ts.format(SQL_TIMESTAMP_FORMAT).to_string()
    }

    /// Parse the `applied_at` text produced by
    /// [`select_history_query`](Self::select_history_query)
    fn parse_timestamp(&self, text: &str) -> DbResult<NaiveDateTime> {
        NaiveDateTime::parse_from_str(text.trim(), SQL_TIMESTAMP_FORMAT)
            .map_err(|e| DbError::LedgerRead(format!("invalid applied_at '{text}': {e}")))
    }
}

/// MySQL / MariaDB
#[derive(Debug, Clone, Copy, Default)]
pub struct MySqlDialect;

/// PostgreSQL
#[derive(Debug, Clone, Copy, Default)]
pub struct PostgresDialect;

/// SQLite
#[derive(Debug, Clone, Copy, Default)]
pub struct SqliteDialect;

/// DuckDB
#[derive(Debug, Clone, Copy, Default)]
pub struct DuckDbDialect;

/// Select the capability implementation for `dialect`
pub fn dialect_for(dialect: Dialect) -> &'static dyn SqlDialect {
    match dialect {
        Dialect::Mysql => &MySqlDialect,
        Dialect::Postgres => &PostgresDialect,
        Dialect::Sqlite => &SqliteDialect,
        Dialect::DuckDb => &DuckDbDialect,
    }
}

impl SqlDialect for MySqlDialect {
    fn dialect(&self) -> Dialect {
        Dialect::Mysql
    }

    fn table_exists_query(&self, table: &str) -> String {
        format!(
            "SELECT COUNT(*) FROM information_schema.tables \
             WHERE table_schema = DATABASE() AND table_name = '{table}'"
        )
    }

    fn create_table_query(&self, table: &str) -> String {
        format!(
            "CREATE TABLE {table} (\
             migration VARCHAR(255) NOT NULL PRIMARY KEY, \
             applied_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP)"
        )
    }

    fn insert_record_query(&self, table: &str) -> String {
        format!("INSERT INTO {table} (migration, applied_at) VALUES (?, ?)")
    }

    fn delete_record_query(&self, table: &str) -> String {
        format!("DELETE FROM {table} WHERE migration = ?")
    }

    fn select_history_query(&self, table: &str) -> String {
        format!(
            "SELECT migration, CAST(DATE_FORMAT(applied_at, '%Y-%m-%d %H:%i:%s') AS CHAR) \
             FROM {table} ORDER BY migration ASC"
        )
    }
}

impl SqlDialect for PostgresDialect {
    fn dialect(&self) -> Dialect {
        Dialect::Postgres
    }

    fn table_exists_query(&self, table: &str) -> String {
        // Unquoted identifiers are folded to lower case by PostgreSQL.
        format!(
            "SELECT COUNT(*) FROM pg_tables \
             WHERE schemaname = current_schema() AND tablename = '{}'",
            table.to_ascii_lowercase()
        )
    }

    fn create_table_query(&self, table: &str) -> String {
        format!(
            "CREATE TABLE {table} (\
             migration VARCHAR(255) NOT NULL PRIMARY KEY, \
             applied_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP)"
        )
    }

    fn insert_record_query(&self, table: &str) -> String {
        format!("INSERT INTO {table} (migration, applied_at) VALUES ($1, CAST($2 AS TIMESTAMP))")
    }

    fn delete_record_query(&self, table: &str) -> String {
        format!("DELETE FROM {table} WHERE migration = $1")
    }

    fn select_history_query(&self, table: &str) -> String {
        format!(
            "SELECT migration, to_char(applied_at, 'YYYY-MM-DD HH24:MI:SS') \
             FROM {table} ORDER BY migration ASC"
        )
    }
}

impl SqlDialect for SqliteDialect {
    fn dialect(&self) -> Dialect {
        Dialect::Sqlite
    }

    fn table_exists_query(&self, table: &str) -> String {
        format!("SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name = '{table}'")
    }

    fn create_table_query(&self, table: &str) -> String {
        format!(
            "CREATE TABLE {table} (\
             migration TEXT NOT NULL PRIMARY KEY, \
             applied_at DATETIME DEFAULT CURRENT_TIMESTAMP)"
        )
    }

    fn insert_record_query(&self, table: &str) -> String {
        format!("INSERT INTO {table} (migration, applied_at) VALUES (?, ?)")
    }

    fn delete_record_query(&self, table: &str) -> String {
        format!("DELETE FROM {table} WHERE migration = ?")
    }

    fn select_history_query(&self, table: &str) -> String {
        format!(
            "SELECT migration, CAST(applied_at AS TEXT) FROM {table} ORDER BY migration ASC"
        )
    }

    /// SQLite stores whatever text it was given, so rows written by other
    /// tools may carry fractional seconds, a `T` separator, or an offset.
    fn parse_timestamp(&self, text: &str) -> DbResult<NaiveDateTime> {
        const FORMATS: &[&str] = &[
            SQL_TIMESTAMP_FORMAT,
            "%Y-%m-%d %H:%M:%S%.f",
            "%Y-%m-%dT%H:%M:%S",
            "%Y-%m-%dT%H:%M:%S%.f",
        ];
        let text = text.trim();
        FORMATS
            .iter()
            .find_map(|fmt| NaiveDateTime::parse_from_str(text, fmt).ok())
            .or_else(|| {
                DateTime::parse_from_rfc3339(text)
                    .ok()
                    .map(|dt| dt.naive_utc())
            })
            .ok_or_else(|| DbError::LedgerRead(format!("invalid applied_at '{text}'")))
    }
}

impl SqlDialect for DuckDbDialect {
    fn dialect(&self) -> Dialect {
        Dialect::DuckDb
    }

    fn table_exists_query(&self, table: &str) -> String {
        format!(
            "SELECT COUNT(*) FROM information_schema.tables \
             WHERE table_schema = 'main' AND table_name = '{table}'"
        )
    }

    fn create_table_query(&self, table: &str) -> String {
        format!(
            "CREATE TABLE {table} (\
             migration VARCHAR NOT NULL PRIMARY KEY, \
             applied_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP)"
        )
    }

    fn insert_record_query(&self, table: &str) -> String {
        format!("INSERT INTO {table} (migration, applied_at) VALUES (?, CAST(? AS TIMESTAMP))")
    }

    fn delete_record_query(&self, table: &str) -> String {
        format!("DELETE FROM {table} WHERE migration = ?")
    }

    fn select_history_query(&self, table: &str) -> String {
        format!(
            "SELECT migration, strftime(applied_at, '%Y-%m-%d %H:%M:%S') \
             FROM {table} ORDER BY migration ASC"
        )
    }
}

#[cfg(test)]
#[path = "dialect_test.rs"]
mod tests;
