//! Moving exiftool backups according to the backup policy.

use super::{BackupPolicy, BackupPolicyResolver};
use crate::error::{CoreError, CoreResult};
use crate::utils::{absolute_path, format_run_timestamp};

use chrono::{DateTime, Local};
use log::{debug, warn};

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Creates the backups directory for `file` under `policy`.
///
/// Returns `None` for [`BackupPolicy::SameDir`]. The new directory gets the
/// permission bits of its parent: the edited file's directory for `sub_dir`,
/// the backups root for `abs_path`.
pub fn prepare_backups_dir(
    policy: &BackupPolicy,
    file: &Path,
    started_at: &DateTime<Local>,
) -> CoreResult<Option<PathBuf>> {
    let abs_file = absolute_path(file)?;
    let file_dir = abs_file.parent().unwrap_or(&abs_file);
    let timestamp = format_run_timestamp(started_at);

    let Some(backups_dir) = policy.backups_dir(file_dir, &timestamp) else {
        return Ok(None);
    };

    let mode_source = match policy {
        BackupPolicy::AbsPath { root } => root.as_path(),
        _ => file_dir,
    };

    create_dir_like(&backups_dir, mode_source).map_err(|source| CoreError::PrepareBackupsDir {
        path: backups_dir.clone(),
        source,
    })?;

    Ok(Some(backups_dir))
}

/// Moves exiftool's backup of `target` to wherever the backup policy says.
///
/// Returns the new backup location, or `None` when there was nothing to move
/// (no backup was written, e.g. because output went to a new file) or the
/// policy keeps backups in place.
pub fn relocate_backup(
    resolver: &mut BackupPolicyResolver,
    backup: &Path,
    target: &Path,
    started_at: &DateTime<Local>,
) -> CoreResult<Option<PathBuf>> {
    match fs::metadata(backup) {
        Ok(_) => {}
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            debug!("exiftool backup file '{}' does not exist; nothing to do", backup.display());
            return Ok(None);
        }
        Err(e) => {
            warn!("could not stat exiftool backup file '{}': {}", backup.display(), e);
            return Ok(None);
        }
    }

    let policy = resolver
        .resolve(target)
        .map_err(|e| CoreError::BackupPolicy(Box::new(e)))?;
    let Some(backups_dir) = prepare_backups_dir(&policy, target, started_at)? else {
        return Ok(None);
    };

    let file_name = target
        .file_name()
        .ok_or_else(|| CoreError::OperationFailed(format!("'{}' has no file name", target.display())))?;
    let destination = backups_dir.join(file_name);

    move_file(backup, &destination).map_err(|source| CoreError::MoveBackup {
        from: backup.to_path_buf(),
        to: destination.clone(),
        source,
    })?;

    debug!("Moved exiftool backup file '{}' to '{}'", backup.display(), destination.display());
    Ok(Some(destination))
}

/// Renames `from` to `to`, copying across filesystems when needed.
fn move_file(from: &Path, to: &Path) -> io::Result<()> {
    match fs::rename(from, to) {
        Err(e) if e.kind() == io::ErrorKind::CrossesDevices => {
            fs::copy(from, to)?;
            fs::remove_file(from)
        }
        result => result,
    }
}

#[cfg(unix)]
fn create_dir_like(path: &Path, mode_source: &Path) -> io::Result<()> {
    use std::os::unix::fs::{DirBuilderExt, PermissionsExt};

    let mode = fs::metadata(mode_source)?.permissions().mode() & 0o777;
    fs::DirBuilder::new().recursive(true).mode(mode).create(path)
}

#[cfg(not(unix))]
fn create_dir_like(path: &Path, mode_source: &Path) -> io::Result<()> {
    fs::metadata(mode_source)?;
    fs::create_dir_all(path)
}
