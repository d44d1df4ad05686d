// xtool-core/tests/backups_tests.rs

use xtool_core::backups::{BACKUPS_CONFIG_NAME, BackupPolicy, BackupPolicyResolver, relocate_backup};
use xtool_core::error::CoreError;
use xtool_core::utils::exiftool_backup_path;

use chrono::{DateTime, Local, TimeZone};
use std::error::Error;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::tempdir;

const TIMESTAMP: &str = "2024-06-01T12-30-45";

fn started_at() -> DateTime<Local> {
    Local.with_ymd_and_hms(2024, 6, 1, 12, 30, 45).unwrap()
}

fn write_marker(dir: &Path, json: &str) -> Result<(), Box<dyn Error>> {
    fs::create_dir_all(dir)?;
    fs::write(dir.join(BACKUPS_CONFIG_NAME), json)?;
    Ok(())
}

fn sub_dir(folder: &str) -> String {
    format!(r#"{{"backups_location": "sub_dir", "backups_folder": "{folder}"}}"#)
}

/// Creates `file` and the `_original` exiftool would leave next to it.
fn edited_photo(file: &Path) -> Result<PathBuf, Box<dyn Error>> {
    fs::create_dir_all(file.parent().ok_or("no parent")?)?;
    fs::write(file, "edited")?;
    let backup = exiftool_backup_path(file);
    fs::write(&backup, "original")?;
    Ok(backup)
}

#[test]
fn test_nearest_marker_wins() -> Result<(), Box<dyn Error>> {
    let home = tempdir()?;
    write_marker(&home.path().join("a"), &sub_dir("outer"))?;
    write_marker(&home.path().join("a/b"), &sub_dir("inner"))?;
    fs::create_dir_all(home.path().join("a/b/c"))?;

    let mut resolver = BackupPolicyResolver::new(home.path());
    let policy = resolver.resolve(&home.path().join("a/b/c/photo.jpg"))?;
    assert_eq!(
        policy,
        BackupPolicy::SubDir {
            folder: "inner".to_string()
        }
    );

    let policy = resolver.resolve(&home.path().join("a/photo.jpg"))?;
    assert_eq!(
        policy,
        BackupPolicy::SubDir {
            folder: "outer".to_string()
        }
    );
    Ok(())
}

#[test]
fn test_default_is_same_dir() -> Result<(), Box<dyn Error>> {
    let home = tempdir()?;
    fs::create_dir_all(home.path().join("photos/2024"))?;

    let mut resolver = BackupPolicyResolver::new(home.path());
    assert_eq!(
        resolver.resolve(&home.path().join("photos/2024/photo.jpg"))?,
        BackupPolicy::SameDir
    );
    Ok(())
}

#[test]
fn test_marker_in_home_applies_below_it() -> Result<(), Box<dyn Error>> {
    let home = tempdir()?;
    write_marker(home.path(), &sub_dir("bak"))?;
    fs::create_dir_all(home.path().join("photos"))?;

    let mut resolver = BackupPolicyResolver::new(home.path());
    assert_eq!(
        resolver.resolve(&home.path().join("photos/photo.jpg"))?,
        BackupPolicy::SubDir {
            folder: "bak".to_string()
        }
    );
    Ok(())
}

#[test]
fn test_search_stops_at_home() -> Result<(), Box<dyn Error>> {
    let outer = tempdir()?;
    write_marker(outer.path(), &sub_dir("above-home"))?;
    let home = outer.path().join("home");
    fs::create_dir_all(home.join("photos"))?;

    let mut resolver = BackupPolicyResolver::new(&home);
    assert_eq!(resolver.resolve(&home.join("photos/photo.jpg"))?, BackupPolicy::SameDir);
    Ok(())
}

#[test]
fn test_results_are_cached_per_directory() -> Result<(), Box<dyn Error>> {
    let home = tempdir()?;
    let photos = home.path().join("photos");
    write_marker(&photos, &sub_dir("bak"))?;

    let mut resolver = BackupPolicyResolver::new(home.path());
    let first = resolver.resolve(&photos.join("a.jpg"))?;
    assert_eq!(resolver.marker_reads(), 1);

    // A cache hit must not touch the filesystem.
    fs::remove_file(photos.join(BACKUPS_CONFIG_NAME))?;
    let second = resolver.resolve(&photos.join("b.jpg"))?;
    assert_eq!(first, second);
    assert_eq!(resolver.marker_reads(), 1);
    Ok(())
}

#[test]
fn test_invalid_marker_is_an_error() -> Result<(), Box<dyn Error>> {
    let home = tempdir()?;
    let photos = home.path().join("photos");
    write_marker(&photos, r#"{"backups_location": "sub_dir"}"#)?;

    let mut resolver = BackupPolicyResolver::new(home.path());
    let err = resolver.resolve(&photos.join("a.jpg")).unwrap_err();
    assert!(matches!(err, CoreError::InvalidBackupsConfig(_)));

    write_marker(&photos, "{ nope")?;
    let mut resolver = BackupPolicyResolver::new(home.path());
    let err = resolver.resolve(&photos.join("a.jpg")).unwrap_err();
    assert!(matches!(err, CoreError::BackupsConfigParse { .. }));
    Ok(())
}

#[test]
fn test_deep_chain_without_boundary_fails() -> Result<(), Box<dyn Error>> {
    let root = tempdir()?;
    let unrelated_home = tempdir()?;

    let mut deepest = root.path().to_path_buf();
    for _ in 0..130 {
        deepest.push("d");
    }
    fs::create_dir_all(&deepest)?;

    let mut resolver = BackupPolicyResolver::new(unrelated_home.path());
    let err = resolver.resolve(&deepest.join("photo.jpg")).unwrap_err();
    assert!(matches!(err, CoreError::BackupsSearchExhausted { limit: 128, .. }));
    Ok(())
}

#[test]
fn test_sub_dir_relocation() -> Result<(), Box<dyn Error>> {
    let home = tempdir()?;
    let photos = home.path().join("photos");
    write_marker(&photos, &sub_dir("backups"))?;
    let file = photos.join("photo.jpg");
    let backup = edited_photo(&file)?;

    let mut resolver = BackupPolicyResolver::new(home.path());
    let moved_to = relocate_backup(&mut resolver, &backup, &file, &started_at())?;

    let expected = photos.join(format!("backups_{TIMESTAMP}")).join("photo.jpg");
    assert_eq!(moved_to.as_deref(), Some(expected.as_path()));
    assert_eq!(fs::read_to_string(&expected)?, "original");
    assert!(!backup.exists());
    assert_eq!(fs::read_to_string(&file)?, "edited");
    Ok(())
}

#[test]
fn test_abs_path_relocation() -> Result<(), Box<dyn Error>> {
    let home = tempdir()?;
    let archive = tempdir()?;
    let y = home.path().join("x/y");
    write_marker(
        &y,
        &format!(
            r#"{{"backups_location": "abs_path", "backups_folder": "{}"}}"#,
            archive.path().display()
        ),
    )?;
    let file = y.join("photo.jpg");
    let backup = edited_photo(&file)?;

    let mut resolver = BackupPolicyResolver::new(home.path());
    let moved_to = relocate_backup(&mut resolver, &backup, &file, &started_at())?;

    let expected = archive.path().join(format!("{TIMESTAMP} y")).join("photo.jpg");
    assert_eq!(moved_to.as_deref(), Some(expected.as_path()));
    assert!(expected.is_file());
    assert!(!backup.exists());
    Ok(())
}

#[test]
fn test_same_dir_leaves_backup_in_place() -> Result<(), Box<dyn Error>> {
    let home = tempdir()?;
    let file = home.path().join("photos/photo.jpg");
    let backup = edited_photo(&file)?;

    let mut resolver = BackupPolicyResolver::new(home.path());
    assert_eq!(relocate_backup(&mut resolver, &backup, &file, &started_at())?, None);
    assert!(backup.is_file());
    Ok(())
}

#[test]
fn test_missing_backup_is_a_silent_no_op() -> Result<(), Box<dyn Error>> {
    let home = tempdir()?;
    let photos = home.path().join("photos");
    write_marker(&photos, &sub_dir("backups"))?;
    let file = photos.join("photo.jpg");
    fs::write(&file, "edited")?;

    let mut resolver = BackupPolicyResolver::new(home.path());
    let result = relocate_backup(&mut resolver, &exiftool_backup_path(&file), &file, &started_at())?;
    assert_eq!(result, None);

    let entries: Vec<_> = fs::read_dir(&photos)?.collect::<Result<_, _>>()?;
    assert_eq!(entries.len(), 2, "only the photo and the marker should exist");
    // the policy was never consulted
    assert_eq!(resolver.marker_reads(), 0);
    Ok(())
}

#[test]
fn test_policy_errors_are_wrapped() -> Result<(), Box<dyn Error>> {
    let home = tempdir()?;
    let photos = home.path().join("photos");
    write_marker(&photos, r#"{"backups_location": "elsewhere"}"#)?;
    let file = photos.join("photo.jpg");
    let backup = edited_photo(&file)?;

    let mut resolver = BackupPolicyResolver::new(home.path());
    let err = relocate_backup(&mut resolver, &backup, &file, &started_at()).unwrap_err();
    assert!(matches!(err, CoreError::BackupPolicy(_)));
    assert!(err.to_string().starts_with("failed to get backups config: backups_location must be one of"));
    assert!(backup.is_file());
    Ok(())
}
