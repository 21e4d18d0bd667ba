//! Migration records and on-disk migration directories.

use crate::error::{CoreError, CoreResult};
use crate::migration_id::MigrationId;
use chrono::NaiveDateTime;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Forward SQL body
pub const UP_SQL: &str = "up.sql";
/// Reverse SQL body
pub const DOWN_SQL: &str = "down.sql";
/// Hook run before the forward body
pub const UP_SCRIPT: &str = "up.sh";
/// Hook run after the reverse body
pub const DOWN_SCRIPT: &str = "down.sh";
/// Extension of the optional human-readable note
pub const DESCRIPTION_EXTENSION: &str = "txt";

/// Display format for `applied_at`
pub const APPLIED_AT_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// One row of the history ledger
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MigrationRecord {
    /// Applied migration
    pub id: MigrationId,
    /// When the forward body was recorded
    pub applied_at: NaiveDateTime,
}

impl MigrationRecord {
    /// `applied_at` rendered for listings
    pub fn applied_at_display(&self) -> String {
        self.applied_at.format(APPLIED_AT_FORMAT).to_string()
    }
}

/// Read-only view of one migration's directory.
///
/// Nothing here caches file contents; every accessor goes to disk.
#[derive(Debug, Clone)]
pub struct MigrationDir {
    id: MigrationId,
    path: PathBuf,
}

impl MigrationDir {
    /// The directory for `id` under the migration root
    pub fn new(root: &Path, id: &MigrationId) -> Self {
        Self {
            id: id.clone(),
            path: root.join(id.as_str()),
        }
    }

    /// Migration identifier
    pub fn id(&self) -> &MigrationId {
        &self.id
    }

    /// Directory path
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Contents of `up.sql`
    pub fn read_up(&self) -> CoreResult<String> {
        self.read_sql(UP_SQL)
    }

    /// Contents of `down.sql`
    pub fn read_down(&self) -> CoreResult<String> {
        self.read_sql(DOWN_SQL)
    }

    /// Path of `up.sh`, if the migration has one
    pub fn up_script(&self) -> Option<PathBuf> {
        self.existing(UP_SCRIPT)
    }

    /// Path of `down.sh`, if the migration has one
    pub fn down_script(&self) -> Option<PathBuf> {
        self.existing(DOWN_SCRIPT)
    }

    /// Text of the first `*.txt` note in the directory, without its `## `
    /// heading marker.
    pub fn description(&self) -> Option<String> {
        let entries = match fs::read_dir(&self.path) {
            Ok(entries) => entries,
            Err(e) => {
                log::warn!("Cannot read {}: {}", self.path.display(), e);
                return None;
            }
        };

        let mut notes: Vec<PathBuf> = entries
            .filter_map(|entry| entry.ok().map(|e| e.path()))
            .filter(|p| {
                p.is_file() && p.extension().and_then(|e| e.to_str()) == Some(DESCRIPTION_EXTENSION)
            })
            .collect();
        notes.sort();

        let note = notes.first()?;
        match fs::read_to_string(note) {
            Ok(text) => {
                let line = text.lines().next().unwrap_or_default();
                let line = line.trim_start_matches('#').trim();
                (!line.is_empty()).then(|| line.to_string())
            }
            Err(e) => {
                log::warn!("Cannot read {}: {}", note.display(), e);
                None
            }
        }
    }

    fn read_sql(&self, file: &'static str) -> CoreResult<String> {
        let path = self.path.join(file);
        if !path.is_file() {
            return Err(CoreError::MissingMigrationFile {
                id: self.id.to_string(),
                file,
                path: path.display().to_string(),
            });
        }
        fs::read_to_string(&path).map_err(|e| CoreError::io(&path, e))
    }

    fn existing(&self, file: &str) -> Option<PathBuf> {
        let path = self.path.join(file);
        path.is_file().then_some(path)
    }
}

#[cfg(test)]
#[path = "migration_test.rs"]
mod tests;
