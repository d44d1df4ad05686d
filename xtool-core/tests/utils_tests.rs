// xtool-core/tests/utils_tests.rs

use xtool_core::utils::{absolute_path, clean_path, exiftool_backup_path, format_run_timestamp};

use chrono::{Local, TimeZone};
use std::path::{Path, PathBuf};

#[test]
fn test_format_run_timestamp_uses_given_time() {
    let time = Local.with_ymd_and_hms(2023, 12, 31, 23, 5, 9).unwrap();
    assert_eq!(format_run_timestamp(&time), "2023-12-31T23-05-09");
}

#[test]
fn test_clean_path() {
    assert_eq!(clean_path(Path::new("/a/./b/../c")), PathBuf::from("/a/c"));
    assert_eq!(clean_path(Path::new("/../a")), PathBuf::from("/a"));
    assert_eq!(clean_path(Path::new("a/../../b")), PathBuf::from("../b"));
    assert_eq!(clean_path(Path::new("/a/b/")), PathBuf::from("/a/b"));
}

#[test]
fn test_absolute_path_is_rooted_and_clean() {
    let abs = absolute_path(Path::new("photos/../photo.jpg")).unwrap();
    assert!(abs.is_absolute());
    assert!(abs.ends_with("photo.jpg"));
    assert!(!abs.to_string_lossy().contains(".."));
}

#[test]
fn test_exiftool_backup_path() {
    assert_eq!(
        exiftool_backup_path(Path::new("/x/y/photo.jpg")),
        PathBuf::from("/x/y/photo.jpg_original")
    );
    assert_eq!(exiftool_backup_path(Path::new("IMG 1.RAF")), PathBuf::from("IMG 1.RAF_original"));
}
