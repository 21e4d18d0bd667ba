//! Configuration types and parsing for strata.yml

use crate::error::{CoreError, CoreResult};
use crate::steps::StepLimit;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// File names probed by [`Config::discover`], in order.
pub const CONFIG_FILE_NAMES: &[&str] = &["strata.yml", "strata.yaml"];

/// Default name of the ledger table.
pub const DEFAULT_TABLE_NAME: &str = "strata_migrations";

/// Configuration for one Strata invocation.
///
/// Loaded from `strata.yml` (all fields optional) and then overridden by
/// command-line flags. Once built it is treated as read-only and passed by
/// reference to every operation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Directory holding one subdirectory per migration
    #[serde(default = "default_migration_path")]
    pub migration_path: PathBuf,

    /// Name of the ledger table recording applied migrations
    #[serde(default = "default_table_name")]
    pub table_name: String,

    /// Database connection configuration
    #[serde(default)]
    pub database: DatabaseConfig,

    /// How many migrations a forward/reverse run may process
    #[serde(skip)]
    pub steps: StepLimit,

    /// Echo executed SQL and hook output
    #[serde(skip)]
    pub debug: bool,
}

/// Supported database backends
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Dialect {
    /// MySQL / MariaDB
    Mysql,
    /// PostgreSQL
    Postgres,
    /// SQLite (file path in `database.name`)
    Sqlite,
    /// DuckDB (file path in `database.name`, default)
    #[default]
    DuckDb,
}

impl Dialect {
    /// All supported dialects, for help and error messages
    pub const ALL: [Dialect; 4] = [
        Dialect::Mysql,
        Dialect::Postgres,
        Dialect::Sqlite,
        Dialect::DuckDb,
    ];

    /// Lowercase name used in config files and on the command line
    pub fn as_str(&self) -> &'static str {
        match self {
            Dialect::Mysql => "mysql",
            Dialect::Postgres => "postgres",
            Dialect::Sqlite => "sqlite",
            Dialect::DuckDb => "duckdb",
        }
    }
}

impl std::fmt::Display for Dialect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Dialect {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lowered = s.trim().to_ascii_lowercase();
        Dialect::ALL
            .into_iter()
            .find(|d| d.as_str() == lowered)
            .ok_or_else(|| CoreError::ConfigInvalid {
                message: format!(
                    "unsupported database type: '{}' (expected one of: {})",
                    s,
                    Dialect::ALL.map(|d| d.as_str()).join(", ")
                ),
            })
    }
}

/// Database connection configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DatabaseConfig {
    /// Database type
    #[serde(rename = "type", default)]
    pub dialect: Dialect,

    /// Server host (mysql, postgres)
    #[serde(default)]
    pub host: Option<String>,

    /// Server port (mysql, postgres); the dialect's default when unset
    #[serde(default)]
    pub port: Option<u16>,

    /// Login user (mysql, postgres)
    #[serde(default)]
    pub user: Option<String>,

    /// Login password (mysql, postgres)
    #[serde(default)]
    pub password: Option<String>,

    /// Database name, or file path for sqlite/duckdb (`:memory:` allowed)
    #[serde(default)]
    pub name: Option<String>,
}

fn default_migration_path() -> PathBuf {
    PathBuf::from("migrations")
}

fn default_table_name() -> String {
    DEFAULT_TABLE_NAME.to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            migration_path: default_migration_path(),
            table_name: default_table_name(),
            database: DatabaseConfig::default(),
            steps: StepLimit::default(),
            debug: false,
        }
    }
}

impl Config {
    /// Load configuration from a file path
    pub fn load(path: &Path) -> CoreResult<Self> {
        if !path.exists() {
            return Err(CoreError::ConfigNotFound {
                path: path.display().to_string(),
            });
        }

        let content = std::fs::read_to_string(path).map_err(|e| CoreError::io(path, e))?;
        let config: Config =
            serde_yaml::from_str(&content).map_err(|e| CoreError::ConfigParseError {
                path: path.display().to_string(),
                source: e,
            })?;
        Ok(config)
    }

    /// Load `strata.yml` / `strata.yaml` from `dir`, falling back to defaults
    /// when neither exists.
    pub fn discover(dir: &Path) -> CoreResult<Self> {
        for name in CONFIG_FILE_NAMES {
            let path = dir.join(name);
            if path.exists() {
                log::debug!("Loading configuration from {}", path.display());
                return Self::load(&path);
            }
        }
        Ok(Self::default())
    }

    /// Validate the configuration
    pub fn validate(&self) -> CoreResult<()> {
        if self.migration_path.as_os_str().is_empty() {
            return Err(CoreError::ConfigInvalid {
                message: "migration path cannot be empty".to_string(),
            });
        }

        // The table name is interpolated into DDL, so only plain identifiers
        // are accepted.
        if !is_plain_identifier(&self.table_name) {
            return Err(CoreError::ConfigInvalid {
                message: format!(
                    "invalid table name '{}': use letters, digits and '_' only, not starting with a digit",
                    self.table_name
                ),
            });
        }

        Ok(())
    }
}

/// `[A-Za-z_][A-Za-z0-9_]*`
fn is_plain_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
