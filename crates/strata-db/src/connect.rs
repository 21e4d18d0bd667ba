//! Open a backend from the database section of the configuration

use crate::duckdb::DuckDbBackend;
use crate::error::{DbError, DbResult};
use crate::sqlx_backend::{MySqlBackend, PostgresBackend, SqliteBackend};
use crate::traits::Database;
use sqlx::mysql::{MySqlConnectOptions, MySqlPoolOptions};
use sqlx::postgres::{PgConnectOptions, PgPoolOptions, PgSslMode};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use std::str::FromStr;
use std::sync::Arc;
use strata_core::{DatabaseConfig, Dialect};

/// Default host for server dialects
pub const DEFAULT_HOST: &str = "localhost";
/// Default MySQL port
pub const DEFAULT_MYSQL_PORT: u16 = 3306;
/// Default PostgreSQL port
pub const DEFAULT_POSTGRES_PORT: u16 = 5432;

/// In-memory database name for the file-based dialects
pub const MEMORY_DATABASE: &str = ":memory:";

/// Open one session against the configured database.
///
/// Server dialects get a pool capped at a single connection that is never
/// recycled, so session state (and SQLite `:memory:` contents) survive for
/// the life of the run.
pub async fn connect(config: &DatabaseConfig) -> DbResult<Arc<dyn Database>> {
    let name = config
        .name
        .as_deref()
        .filter(|n| !n.is_empty())
        .ok_or_else(|| {
            DbError::ConnectionError(format!(
                "no database name configured for {}",
                config.dialect
            ))
        })?;
    let host = config.host.as_deref().unwrap_or(DEFAULT_HOST);
    let user = config.user.as_deref().unwrap_or_default();
    let password = config.password.as_deref().unwrap_or_default();

    log::debug!("Connecting to {} database '{}'", config.dialect, name);

    let db: Arc<dyn Database> = match config.dialect {
        Dialect::DuckDb => Arc::new(DuckDbBackend::new(name)?),
        Dialect::Sqlite => {
            let options = if name == MEMORY_DATABASE {
                SqliteConnectOptions::from_str("sqlite::memory:").map_err(connection_error)?
            } else {
                SqliteConnectOptions::new()
                    .filename(name)
                    .create_if_missing(true)
            };
            let pool = SqlitePoolOptions::new()
                .max_connections(1)
                .idle_timeout(None)
                .max_lifetime(None)
                .connect_with(options)
                .await
                .map_err(connection_error)?;
            Arc::new(SqliteBackend::from_pool(pool))
        }
        Dialect::Mysql => {
            let options = MySqlConnectOptions::new()
                .host(host)
                .port(config.port.unwrap_or(DEFAULT_MYSQL_PORT))
                .username(user)
                .password(password)
                .database(name);
            let pool = MySqlPoolOptions::new()
                .max_connections(1)
                .idle_timeout(None)
                .max_lifetime(None)
                .connect_with(options)
                .await
                .map_err(connection_error)?;
            Arc::new(MySqlBackend::from_pool(pool))
        }
        Dialect::Postgres => {
            let options = PgConnectOptions::new()
                .host(host)
                .port(config.port.unwrap_or(DEFAULT_POSTGRES_PORT))
                .username(user)
                .password(password)
                .database(name)
                .ssl_mode(PgSslMode::Disable);
            let pool = PgPoolOptions::new()
                .max_connections(1)
                .idle_timeout(None)
                .max_lifetime(None)
                .connect_with(options)
                .await
                .map_err(connection_error)?;
            Arc::new(PostgresBackend::from_pool(pool))
        }
    };
    Ok(db)
}

fn connection_error(err: sqlx::Error) -> DbError {
    DbError::ConnectionError(err.to_string())
}

#[cfg(test)]
#[path = "connect_test.rs"]
mod tests;
