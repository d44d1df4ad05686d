//! Backup policy handling for exiftool's `_original` files.
//!
//! When exiftool edits a file in place it leaves a copy of the original next
//! to it. A `.xtoolbak.json` marker file anywhere above the edited file
//! decides what happens to that copy:
//!
//! - `same_dir`: leave it where exiftool put it (the default)
//! - `sub_dir`: move it to `<backups_folder>_<timestamp>` next to the file
//! - `abs_path`: move it to `<backups_folder>/<timestamp> <source dir name>`
//!
//! Marker discovery and caching live in [`resolver`], the actual move in
//! [`relocate`].

pub mod relocate;
pub mod resolver;

use crate::error::{CoreError, CoreResult};

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{MAIN_SEPARATOR, Path, PathBuf};

pub use relocate::{prepare_backups_dir, relocate_backup};
pub use resolver::BackupPolicyResolver;

/// Name of the marker file holding a directory tree's backup policy.
pub const BACKUPS_CONFIG_NAME: &str = ".xtoolbak.json";

/// `backups_location` value for leaving backups in place.
pub const BACKUPS_LOC_SAME_DIR: &str = "same_dir";
/// `backups_location` value for per-run subdirectories.
pub const BACKUPS_LOC_SUB_DIR: &str = "sub_dir";
/// `backups_location` value for an external backups root.
pub const BACKUPS_LOC_ABS_PATH: &str = "abs_path";

/// On-disk shape of a `.xtoolbak.json` marker file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct BackupsConfigFile {
    /// One of `same_dir`, `sub_dir`, `abs_path`
    pub backups_location: String,

    /// Subdirectory name (`sub_dir`) or backups root (`abs_path`)
    #[serde(skip_serializing_if = "String::is_empty")]
    pub backups_folder: String,
}

/// A validated backup policy.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum BackupPolicy {
    /// Leave exiftool's backup next to the edited file.
    #[default]
    SameDir,
    /// Move backups into `<folder>_<timestamp>` next to the edited file.
    SubDir { folder: String },
    /// Move backups into `<root>/<timestamp> <source dir name>`.
    AbsPath { root: PathBuf },
}

impl BackupPolicy {
    /// Validates a parsed marker file.
    pub fn from_file(file: BackupsConfigFile) -> CoreResult<Self> {
        match file.backups_location.as_str() {
            BACKUPS_LOC_SAME_DIR => Ok(BackupPolicy::SameDir),
            BACKUPS_LOC_SUB_DIR => {
                if file.backups_folder.is_empty() {
                    return Err(CoreError::InvalidBackupsConfig(
                        "'backups_location: sub_dir' requires setting a backups_folder, to name the backups subdirectory".to_string(),
                    ));
                }
                if file.backups_folder.contains(MAIN_SEPARATOR) || file.backups_folder.contains('/') {
                    return Err(CoreError::InvalidBackupsConfig(
                        "backups_folder must be a simple directory name for 'backups_location: sub_dir'".to_string(),
                    ));
                }
                Ok(BackupPolicy::SubDir {
                    folder: file.backups_folder,
                })
            }
            BACKUPS_LOC_ABS_PATH => {
                if file.backups_folder.is_empty() {
                    return Err(CoreError::InvalidBackupsConfig(
                        "'backups_location: abs_path' requires setting backups_folder to an absolute path".to_string(),
                    ));
                }
                let root = PathBuf::from(&file.backups_folder);
                match fs::metadata(&root) {
                    Err(e) => Err(CoreError::InvalidBackupsConfig(format!(
                        "bad backups_folder '{}': {}",
                        root.display(),
                        e
                    ))),
                    Ok(meta) if !meta.is_dir() => Err(CoreError::InvalidBackupsConfig(format!(
                        "bad backups_folder '{}': is not a directory",
                        root.display()
                    ))),
                    Ok(_) => Ok(BackupPolicy::AbsPath { root }),
                }
            }
            other => Err(CoreError::InvalidBackupsConfig(format!(
                "backups_location must be one of (same_dir, sub_dir, abs_path); got '{other}'"
            ))),
        }
    }

    /// The `backups_location` string for this policy.
    pub fn location(&self) -> &'static str {
        match self {
            BackupPolicy::SameDir => BACKUPS_LOC_SAME_DIR,
            BackupPolicy::SubDir { .. } => BACKUPS_LOC_SUB_DIR,
            BackupPolicy::AbsPath { .. } => BACKUPS_LOC_ABS_PATH,
        }
    }

    /// Destination directory for backups of files in `file_dir`, or `None`
    /// when backups stay in place.
    pub fn backups_dir(&self, file_dir: &Path, timestamp: &str) -> Option<PathBuf> {
        match self {
            BackupPolicy::SameDir => None,
            BackupPolicy::SubDir { folder } => Some(file_dir.join(format!("{folder}_{timestamp}"))),
            BackupPolicy::AbsPath { root } => {
                let source_name = file_dir
                    .file_name()
                    .map(|name| name.to_string_lossy().into_owned())
                    .unwrap_or_else(|| file_dir.display().to_string());
                Some(root.join(format!("{timestamp} {source_name}")))
            }
        }
    }
}
