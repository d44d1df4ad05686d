//! Executable lookup helpers
//!
//! `$PATH` search and the "is this file executable" check shared by every
//! external tool xtool drives.

use crate::error::{CoreError, CoreResult};

use std::env;
use std::ffi::OsStr;
use std::fs::{self, Metadata};
use std::path::{Path, PathBuf};

/// Searches `search_path` (a `$PATH`-style list) for an executable named `binary`.
pub fn find_in_path(binary: &str, search_path: Option<&OsStr>) -> Option<PathBuf> {
    let search_path = search_path?;

    env::split_paths(search_path)
        .filter(|dir| !dir.as_os_str().is_empty())
        .flat_map(|dir| candidate_names(binary).map(move |name| dir.join(name)))
        .find(|candidate| {
            fs::metadata(candidate)
                .map(|meta| meta.is_file() && is_executable(&meta))
                .unwrap_or(false)
        })
}

#[cfg(windows)]
fn candidate_names(binary: &str) -> impl Iterator<Item = String> {
    [binary.to_string(), format!("{binary}.exe")].into_iter()
}

#[cfg(not(windows))]
fn candidate_names(binary: &str) -> impl Iterator<Item = String> {
    std::iter::once(binary.to_string())
}

/// Whether any execute permission bit is set.
#[cfg(unix)]
pub fn is_executable(metadata: &Metadata) -> bool {
    use std::os::unix::fs::PermissionsExt;
    metadata.permissions().mode() & 0o111 != 0
}

/// Whether the file can be executed. Without unix permission bits any
/// regular file qualifies.
#[cfg(not(unix))]
pub fn is_executable(metadata: &Metadata) -> bool {
    metadata.is_file()
}

/// Checks that `path` exists and is executable, naming `tool` in the error.
pub fn validate_executable(tool: &str, path: &Path) -> CoreResult<()> {
    let metadata = fs::metadata(path).map_err(|source| CoreError::BadBinaryPath {
        tool: tool.to_string(),
        path: path.to_path_buf(),
        source,
    })?;

    if metadata.is_dir() || !is_executable(&metadata) {
        return Err(CoreError::NotExecutable {
            tool: tool.to_string(),
            path: path.to_path_buf(),
        });
    }

    Ok(())
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use std::ffi::OsString;
    use std::os::unix::fs::PermissionsExt;
    use tempfile::tempdir;

    fn write_file(path: &Path, mode: u32) {
        fs::write(path, "#!/bin/sh\n").unwrap();
        fs::set_permissions(path, fs::Permissions::from_mode(mode)).unwrap();
    }

    #[test]
    fn test_find_in_path_skips_non_executables() {
        let first = tempdir().unwrap();
        let second = tempdir().unwrap();
        write_file(&first.path().join("exiftool"), 0o644);
        write_file(&second.path().join("exiftool"), 0o755);

        let search = env::join_paths([first.path(), second.path()]).unwrap();
        let found = find_in_path("exiftool", Some(search.as_os_str()));
        assert_eq!(found, Some(second.path().join("exiftool")));
    }

    #[test]
    fn test_find_in_path_missing() {
        let dir = tempdir().unwrap();
        let search = OsString::from(dir.path());
        assert_eq!(find_in_path("exiftool", Some(search.as_os_str())), None);
        assert_eq!(find_in_path("exiftool", None), None);
    }

    #[test]
    fn test_validate_executable() {
        let dir = tempdir().unwrap();
        let exec = dir.path().join("tool");
        let plain = dir.path().join("plain");
        write_file(&exec, 0o700);
        write_file(&plain, 0o600);

        assert!(validate_executable("tool", &exec).is_ok());
        assert!(matches!(
            validate_executable("tool", &plain),
            Err(CoreError::NotExecutable { .. })
        ));
        assert!(matches!(
            validate_executable("tool", &dir.path().join("missing")),
            Err(CoreError::BadBinaryPath { .. })
        ));
        assert!(matches!(
            validate_executable("tool", dir.path()),
            Err(CoreError::NotExecutable { .. })
        ));
    }
}
