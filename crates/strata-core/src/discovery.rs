//! Migration discovery on disk.
//!
//! Every immediate subdirectory of the migration root is a candidate
//! migration named by its directory. The filesystem is the source of truth:
//! nothing is cached between calls.

use crate::error::{CoreError, CoreResult};
use crate::migration_id::MigrationId;
use std::collections::HashSet;
use std::fs;
use std::path::Path;

/// List candidate migrations under `root`, sorted ascending.
///
/// Files and other non-directory entries are ignored.
pub fn list_candidates(root: &Path) -> CoreResult<Vec<MigrationId>> {
    if !root.is_dir() {
        return Err(CoreError::MigrationRootNotFound {
            path: root.display().to_string(),
        });
    }

    let mut ids = Vec::new();
    for entry in fs::read_dir(root).map_err(|e| CoreError::io(root, e))? {
        let entry = entry.map_err(|e| CoreError::io(root, e))?;
        let file_type = entry.file_type().map_err(|e| CoreError::io(&entry.path(), e))?;
        if !file_type.is_dir() {
            continue;
        }

        let name = entry.file_name();
        match name.to_str().and_then(|n| MigrationId::try_new(n)) {
            Some(id) => ids.push(id),
            None => log::warn!(
                "Skipping migration directory with a non UTF-8 name: {}",
                entry.path().display()
            ),
        }
    }

    ids.sort();
    Ok(ids)
}

/// Candidates under `root` that are not in `applied`, sorted ascending.
pub fn pending<'a, I>(root: &Path, applied: I) -> CoreResult<Vec<MigrationId>>
where
    I: IntoIterator<Item = &'a MigrationId>,
{
    let applied: HashSet<&str> = applied.into_iter().map(|id| id.as_str()).collect();
    let candidates = list_candidates(root)?;
    Ok(candidates
        .into_iter()
        .filter(|id| !applied.contains(id.as_str()))
        .collect())
}

#[cfg(test)]
#[path = "discovery_test.rs"]
mod tests;
