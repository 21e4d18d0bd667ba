//! Error types for strata-engine

use crate::hooks::ScriptError;
use strata_core::{CoreError, MigrationId};
use strata_db::{DbError, ExecutionError};
use thiserror::Error;

/// Workflow errors; each one aborts the run
#[derive(Error, Debug)]
pub enum EngineError {
    /// Filesystem or configuration error (E001)
    #[error("[E001] {0}")]
    Core(#[from] CoreError),

    /// Database error outside a migration batch (E002)
    #[error("[E002] {0}")]
    Db(#[from] DbError),

    /// Forward SQL body failed (E003)
    #[error("[E003] Failed to apply migration {id}: {source}")]
    Apply {
        id: MigrationId,
        #[source]
        source: ExecutionError,
    },

    /// Reverse SQL body failed (E004)
    #[error("[E004] Failed to revert migration {id}: {source}")]
    Revert {
        id: MigrationId,
        #[source]
        source: ExecutionError,
    },

    /// Ledger insert failed (E005)
    #[error("[E005] Failed to record migration {id}: {source}")]
    Record {
        id: MigrationId,
        #[source]
        source: DbError,
    },

    /// Ledger delete failed (E006)
    #[error("[E006] Failed to remove migration {id} from history: {source}")]
    Unrecord {
        id: MigrationId,
        #[source]
        source: DbError,
    },

    /// Hook script failed (E007)
    #[error("[E007] {0}")]
    Script(#[from] ScriptError),
}

/// Result type alias for EngineError
pub type EngineResult<T> = Result<T, EngineError>;
