//! strata-core - Core library for Strata
//!
//! This crate provides the shared types used across all Strata components:
//! configuration parsing, migration identifiers, migration discovery on disk,
//! SQL statement splitting, step-limit policy, and migration scaffolding.

pub mod config;
pub mod discovery;
pub mod error;
pub mod migration;
pub mod migration_id;
pub mod scaffold;
pub mod sql_utils;
pub mod steps;

pub use config::{Config, DatabaseConfig, Dialect};
pub use discovery::{list_candidates, pending};
pub use error::{CoreError, CoreResult};
pub use migration::{MigrationDir, MigrationRecord};
pub use migration_id::MigrationId;
pub use scaffold::{create_migration, ScaffoldOptions};
pub use sql_utils::split_statements;
pub use steps::StepLimit;
