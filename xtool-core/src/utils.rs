//! Utility functions for timestamps and path handling.
//!
//! This module provides general-purpose helpers used throughout the
//! xtool-core library: run timestamp formatting, lexical absolute paths and
//! exiftool's backup file naming.

use chrono::{DateTime, TimeZone};

use std::ffi::OsString;
use std::io;
use std::path::{Component, Path, PathBuf};

/// Suffix exiftool appends to the copy of a file it edits in place.
pub const EXIFTOOL_BACKUP_SUFFIX: &str = "_original";

/// Formats a run start time for use in backup folder names
/// (e.g., 2024-06-01T12:30:45 -> "2024-06-01T12-30-45").
#[must_use]
pub fn format_run_timestamp<Tz: TimeZone>(time: &DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    time.format("%Y-%m-%dT%H-%M-%S").to_string()
}

/// Returns the absolute form of `path` with `.` and `..` resolved lexically.
///
/// Symlinks are not followed, so the result names the directory the user
/// referred to rather than its target.
pub fn absolute_path(path: &Path) -> io::Result<PathBuf> {
    let absolute = std::path::absolute(path)?;
    Ok(clean_path(&absolute))
}

/// Resolves `.` and `..` components without touching the filesystem.
#[must_use]
pub fn clean_path(path: &Path) -> PathBuf {
    let mut cleaned = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                if cleaned.file_name().is_some() {
                    cleaned.pop();
                } else if !cleaned.has_root() {
                    cleaned.push(component);
                }
                // `/..` is `/`
            }
            other => cleaned.push(other),
        }
    }
    cleaned
}

/// Path of the backup exiftool leaves next to `file` after an in-place edit.
#[must_use]
pub fn exiftool_backup_path(file: &Path) -> PathBuf {
    let mut name = OsString::from(file.as_os_str());
    name.push(EXIFTOOL_BACKUP_SUFFIX);
    PathBuf::from(name)
}
