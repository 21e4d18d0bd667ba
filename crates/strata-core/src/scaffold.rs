//! Scaffolding of new, empty migration directories.

use crate::error::{CoreError, CoreResult};
use crate::migration::{MigrationDir, DOWN_SCRIPT, DOWN_SQL, UP_SCRIPT, UP_SQL};
use crate::migration_id::MigrationId;
use chrono::NaiveDateTime;
use std::fs;
use std::path::Path;

/// Format of generated migration identifiers
pub const ID_FORMAT: &str = "%Y%m%d%H%M%S";

/// What to put into a new migration directory
#[derive(Debug, Clone, Default)]
pub struct ScaffoldOptions {
    /// Optional human-readable description, stored as `<desc>.txt`
    pub description: Option<String>,
    /// Also create `up.sh` and `down.sh` hooks
    pub with_scripts: bool,
}

/// Create `<root>/<id>/` with template files, `id` being `now` formatted
/// as [`ID_FORMAT`].
pub fn create_migration(
    root: &Path,
    options: &ScaffoldOptions,
    now: NaiveDateTime,
) -> CoreResult<MigrationDir> {
    let id = MigrationId::new(now.format(ID_FORMAT).to_string());

    // Validate before touching the filesystem
    let note = match options.description.as_deref().map(str::trim) {
        Some(desc) if !desc.is_empty() => Some((description_file_name(desc)?, desc)),
        _ => None,
    };

    fs::create_dir_all(root).map_err(|e| CoreError::io(root, e))?;
    let migration = MigrationDir::new(root, &id);
    let dir = migration.path();
    if let Err(e) = fs::create_dir(dir) {
        if e.kind() == std::io::ErrorKind::AlreadyExists {
            return Err(CoreError::MigrationExists {
                path: dir.display().to_string(),
            });
        }
        return Err(CoreError::io(dir, e));
    }

    write_file(&dir.join(UP_SQL), "-- Write your 'up' SQL here\n")?;
    write_file(&dir.join(DOWN_SQL), "-- Write your 'down' SQL here\n")?;

    if options.with_scripts {
        for (file, direction) in [(UP_SCRIPT, "up"), (DOWN_SCRIPT, "down")] {
            let path = dir.join(file);
            write_file(
                &path,
                &format!("echo 'Migration: {id}, bash script {direction}'\n"),
            )?;
            make_executable(&path)?;
        }
    }

    if let Some((file_name, desc)) = note {
        write_file(&dir.join(file_name), &format!("## {desc}\n"))?;
    }

    log::debug!("Scaffolded migration {} at {}", id, dir.display());
    Ok(migration)
}

/// `add users table` → `add_users_table.txt`
fn description_file_name(desc: &str) -> CoreResult<String> {
    if desc.contains('/') || desc.contains('\\') || desc.contains("..") || desc.starts_with('.') {
        return Err(CoreError::InvalidName {
            name: desc.to_string(),
            reason: "must not contain '/', '\\', '..', or start with '.'".to_string(),
        });
    }
    Ok(format!("{}.txt", desc.replace(' ', "_")))
}

fn write_file(path: &Path, content: &str) -> CoreResult<()> {
    fs::write(path, content).map_err(|e| CoreError::io(path, e))
}

#[cfg(unix)]
fn make_executable(path: &Path) -> CoreResult<()> {
    use std::os::unix::fs::PermissionsExt;
    fs::set_permissions(path, fs::Permissions::from_mode(0o755)).map_err(|e| CoreError::io(path, e))
}

#[cfg(not(unix))]
fn make_executable(_path: &Path) -> CoreResult<()> {
    Ok(())
}

#[cfg(test)]
#[path = "scaffold_test.rs"]
mod tests;
