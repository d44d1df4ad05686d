//! Backup policy discovery.
//!
//! The search starts in the edited file's directory and walks upward one
//! directory at a time looking for [`BACKUPS_CONFIG_NAME`]. It stops at the
//! first of:
//!
//! - the user's home directory
//! - a filesystem or volume root
//! - a directory directly under one of [`MOUNT_ROOTS`] (a mounted volume)
//! - a directory holding the marker file
//!
//! The directory the walk stops in is the one whose marker is read, so a
//! marker in `~` or at a volume root applies to everything below it. When
//! there is no marker the policy is [`BackupPolicy::SameDir`].

use super::{BACKUPS_CONFIG_NAME, BackupPolicy, BackupsConfigFile};
use crate::error::{CoreError, CoreResult};
use crate::utils::absolute_path;

use log::debug;

use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Mount-point roots whose direct children are treated as volume roots.
pub const MOUNT_ROOTS: &[&str] = &["/Volumes", "/mnt", "/media", "/usb"];

/// Upper bound on directories visited during one search.
pub const MAX_SEARCH_DEPTH: usize = 128;

/// Finds, validates and caches backup policies.
///
/// One resolver lives for one invocation. Results are cached per queried
/// directory, so processing many files from the same folder only touches the
/// filesystem once.
#[derive(Debug)]
pub struct BackupPolicyResolver {
    home_dir: PathBuf,
    cache: HashMap<PathBuf, BackupPolicy>,
    marker_reads: usize,
}

impl BackupPolicyResolver {
    /// Creates a resolver whose searches stop at `home_dir`.
    pub fn new(home_dir: impl Into<PathBuf>) -> Self {
        Self {
            home_dir: home_dir.into(),
            cache: HashMap::new(),
            marker_reads: 0,
        }
    }

    /// Creates a resolver for the current user's home directory.
    pub fn from_env() -> CoreResult<Self> {
        let home = dirs::home_dir().ok_or(CoreError::HomeDirUnavailable)?;
        Ok(Self::new(absolute_path(&home)?))
    }

    /// Number of times a marker file has been read (or found absent) by
    /// this resolver. Cache hits do not count.
    pub fn marker_reads(&self) -> usize {
        self.marker_reads
    }

    /// Returns the backup policy governing `file`.
    pub fn resolve(&mut self, file: &Path) -> CoreResult<BackupPolicy> {
        let abs_file = absolute_path(file)?;
        let start_dir = abs_file
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| abs_file.clone());

        if let Some(policy) = self.cache.get(&start_dir) {
            debug!("Backups config cache hit for {}", start_dir.display());
            return Ok(policy.clone());
        }

        let config_dir = self.find_config_dir(file, &start_dir)?;
        let policy = self.read_policy(&config_dir)?;

        debug!(
            "Backups config for {}: {} (from {})",
            start_dir.display(),
            policy.location(),
            config_dir.display()
        );
        self.cache.insert(start_dir, policy.clone());
        Ok(policy)
    }

    /// Walks upward from `start_dir` to the directory whose marker applies.
    fn find_config_dir(&self, file: &Path, start_dir: &Path) -> CoreResult<PathBuf> {
        let mut dir = start_dir.to_path_buf();

        for _ in 0..MAX_SEARCH_DEPTH {
            if self.is_search_boundary(&dir) || dir.join(BACKUPS_CONFIG_NAME).exists() {
                return Ok(dir);
            }
            match dir.parent() {
                Some(parent) => dir = parent.to_path_buf(),
                None => return Ok(dir),
            }
        }

        Err(CoreError::BackupsSearchExhausted {
            path: file.to_path_buf(),
            limit: MAX_SEARCH_DEPTH,
        })
    }

    fn is_search_boundary(&self, dir: &Path) -> bool {
        if dir == self.home_dir {
            return true;
        }
        match dir.parent() {
            None => true,
            Some(parent) => MOUNT_ROOTS.iter().any(|root| parent == Path::new(root)),
        }
    }

    fn read_policy(&mut self, dir: &Path) -> CoreResult<BackupPolicy> {
        let path = dir.join(BACKUPS_CONFIG_NAME);
        self.marker_reads += 1;

        let contents = match fs::read_to_string(&path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(BackupPolicy::SameDir),
            Err(source) => return Err(CoreError::BackupsConfigRead { path, source }),
        };

        let file: BackupsConfigFile = serde_json::from_str(&contents)
            .map_err(|source| CoreError::BackupsConfigParse { path, source })?;

        BackupPolicy::from_file(file)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_boundaries() {
        let resolver = BackupPolicyResolver::new("/home/someone");
        assert!(resolver.is_search_boundary(Path::new("/home/someone")));
        assert!(resolver.is_search_boundary(Path::new("/")));
        assert!(resolver.is_search_boundary(Path::new("/Volumes/Photos")));
        assert!(resolver.is_search_boundary(Path::new("/mnt/card")));
        assert!(resolver.is_search_boundary(Path::new("/media/usb0")));
        assert!(resolver.is_search_boundary(Path::new("/usb/stick")));
        assert!(!resolver.is_search_boundary(Path::new("/home")));
        assert!(!resolver.is_search_boundary(Path::new("/home/someone/Pictures")));
        assert!(!resolver.is_search_boundary(Path::new("/Volumes/Photos/2024")));
    }
}
