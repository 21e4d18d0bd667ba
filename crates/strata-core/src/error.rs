//! Error types for strata-core

use thiserror::Error;

/// Core error type for Strata
#[derive(Error, Debug)]
pub enum CoreError {
    /// C001: Configuration file not found
    #[error("[C001] Config file not found: {path}")]
    ConfigNotFound { path: String },

    /// C002: Failed to parse configuration file
    #[error("[C002] Failed to parse config {path}: {source}")]
    ConfigParseError {
        path: String,
        source: serde_yaml::Error,
    },

    /// C003: Invalid configuration value (unsupported dialect, bad table name, ...)
    #[error("[C003] Invalid config: {message}")]
    ConfigInvalid { message: String },

    /// C004: Migration root directory not found
    #[error("[C004] Migration directory not found: {path}")]
    MigrationRootNotFound { path: String },

    /// C005: A migration is missing the SQL file required by the workflow
    #[error("[C005] Migration {id} is missing {file} ({path})")]
    MissingMigrationFile {
        id: String,
        file: &'static str,
        path: String,
    },

    /// C006: Migration directory already exists
    #[error("[C006] Migration already exists: {path}")]
    MigrationExists { path: String },

    /// C007: Name cannot be used as a file name
    #[error("[C007] Invalid name '{name}': {reason}")]
    InvalidName { name: String, reason: String },

    /// C008: IO error with file path context
    #[error("[C008] IO error on '{path}': {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
}

/// Result type alias for CoreError
pub type CoreResult<T> = Result<T, CoreError>;

impl CoreError {
    /// Wrap an IO error with the path that produced it.
    pub(crate) fn io(path: &std::path::Path, source: std::io::Error) -> Self {
        CoreError::Io {
            path: path.display().to_string(),
            source,
        }
    }
}
