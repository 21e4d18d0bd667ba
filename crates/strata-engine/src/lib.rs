//! strata-engine - Reconciliation engine for Strata
//!
//! Compares the migration directory with the history ledger and drives the
//! forward (`up`) and reverse (`down`) workflows, running optional shell
//! hooks around each migration.

pub mod engine;
pub mod error;
pub mod hooks;

pub use engine::{Migrator, PendingMigration, RunOutcome};
pub use error::{EngineError, EngineResult};
pub use hooks::{BashRunner, ScriptError, ScriptOutput, ScriptRunner};
