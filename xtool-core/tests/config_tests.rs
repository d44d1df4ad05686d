// xtool-core/tests/config_tests.rs
//
// Config file discovery and tool resolution against a temporary home
// directory. Fake tools are shell scripts, so these only run on unix.

#![cfg(unix)]

use xtool_core::config::ConfigResolver;
use xtool_core::error::CoreError;

use std::error::Error;
use std::ffi::OsString;
use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use tempfile::tempdir;

fn write_tool(path: &Path) -> Result<(), Box<dyn Error>> {
    fs::write(path, "#!/bin/sh\nexit 0\n")?;
    fs::set_permissions(path, fs::Permissions::from_mode(0o755))?;
    Ok(())
}

fn write_config(path: &Path, json: &str) -> Result<(), Box<dyn Error>> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, json)?;
    Ok(())
}

fn exiftool_config(bin: &Path) -> String {
    format!(r#"{{"exiftool_bin": "{}"}}"#, bin.display())
}

#[test]
fn test_first_existing_candidate_wins() -> Result<(), Box<dyn Error>> {
    let home = tempdir()?;
    let primary_tool = home.path().join("exiftool-primary");
    let legacy_tool = home.path().join("exiftool-legacy");
    write_tool(&primary_tool)?;
    write_tool(&legacy_tool)?;

    let primary = home.path().join(".config/xtoolconfig.json");
    write_config(&primary, &exiftool_config(&primary_tool))?;
    write_config(
        &home.path().join(".xtoolconfig.json"),
        &format!(
            r#"{{"exiftool_bin": "{}", "camswap_aliases": {{"gfx": "GFX 50S"}}}}"#,
            legacy_tool.display()
        ),
    )?;

    let config = ConfigResolver::new(home.path()).with_search_path(None).resolve()?;
    assert_eq!(config.exiftool_bin, primary_tool);
    assert_eq!(config.source, Some(primary));
    // files are not merged
    assert!(config.camswap_aliases.is_empty());
    Ok(())
}

#[test]
fn test_legacy_location_used_when_primary_missing() -> Result<(), Box<dyn Error>> {
    let home = tempdir()?;
    let tool = home.path().join("exiftool");
    write_tool(&tool)?;
    write_config(
        &home.path().join(".xtoolconfig.json"),
        &format!(
            r#"{{"exiftool_bin": "{}", "camswap_aliases": {{"gfx": "GFX 50S"}}}}"#,
            tool.display()
        ),
    )?;

    let config = ConfigResolver::new(home.path()).with_search_path(None).resolve()?;
    assert_eq!(config.exiftool_bin, tool);
    assert_eq!(config.resolve_camera_alias("gfx"), "GFX 50S");
    assert_eq!(config.resolve_camera_alias("X-T3"), "X-T3");
    Ok(())
}

#[test]
fn test_path_fallback_without_config() -> Result<(), Box<dyn Error>> {
    let home = tempdir()?;
    let bin = tempdir()?;
    let tool = bin.path().join("exiftool");
    write_tool(&tool)?;

    let config = ConfigResolver::new(home.path())
        .with_search_path(Some(OsString::from(bin.path())))
        .resolve()?;
    assert_eq!(config.exiftool_bin, tool);
    assert_eq!(config.source, None);
    Ok(())
}

#[test]
fn test_empty_exiftool_bin_falls_back_to_path() -> Result<(), Box<dyn Error>> {
    let home = tempdir()?;
    let bin = tempdir()?;
    let tool = bin.path().join("exiftool");
    write_tool(&tool)?;
    write_config(&home.path().join(".config/xtoolconfig.json"), r#"{"exiftool_bin": ""}"#)?;

    let config = ConfigResolver::new(home.path())
        .with_search_path(Some(OsString::from(bin.path())))
        .resolve()?;
    assert_eq!(config.exiftool_bin, tool);
    Ok(())
}

#[test]
fn test_missing_exiftool_is_fatal() -> Result<(), Box<dyn Error>> {
    let home = tempdir()?;
    let empty_bin = tempdir()?;

    let err = ConfigResolver::new(home.path())
        .with_search_path(Some(OsString::from(empty_bin.path())))
        .resolve()
        .unwrap_err();
    assert!(matches!(err, CoreError::BinaryNotFound { .. }));
    assert!(err.to_string().contains("exiftool_bin was not specified in config"));
    Ok(())
}

#[test]
fn test_bad_binary_paths_name_the_path() -> Result<(), Box<dyn Error>> {
    let home = tempdir()?;
    let missing = home.path().join("nope/exiftool");
    write_config(&home.path().join(".config/xtoolconfig.json"), &exiftool_config(&missing))?;

    let err = ConfigResolver::new(home.path()).with_search_path(None).resolve().unwrap_err();
    assert!(matches!(err, CoreError::BadBinaryPath { .. }));
    assert!(err.to_string().contains(&missing.display().to_string()));

    let not_executable = home.path().join("exiftool.txt");
    fs::write(&not_executable, "plain file")?;
    fs::set_permissions(&not_executable, fs::Permissions::from_mode(0o644))?;
    write_config(&home.path().join(".config/xtoolconfig.json"), &exiftool_config(&not_executable))?;

    let err = ConfigResolver::new(home.path()).with_search_path(None).resolve().unwrap_err();
    assert!(matches!(err, CoreError::NotExecutable { .. }));
    Ok(())
}

#[test]
fn test_malformed_primary_is_fatal_even_with_valid_legacy() -> Result<(), Box<dyn Error>> {
    let home = tempdir()?;
    let tool = home.path().join("exiftool");
    write_tool(&tool)?;
    let primary = home.path().join(".config/xtoolconfig.json");
    write_config(&primary, "{ not json")?;
    write_config(&home.path().join(".xtoolconfig.json"), &exiftool_config(&tool))?;

    let err = ConfigResolver::new(home.path()).with_search_path(None).resolve().unwrap_err();
    match err {
        CoreError::ConfigParse { path, .. } => assert_eq!(path, primary),
        other => panic!("unexpected error: {other:?}"),
    }
    Ok(())
}

#[test]
fn test_secondary_tools_resolve_lazily() -> Result<(), Box<dyn Error>> {
    let home = tempdir()?;
    let bin = tempdir()?;
    let exiftool = bin.path().join("exiftool");
    let x3f = home.path().join("x3f_extract-legacy");
    write_tool(&exiftool)?;
    write_tool(&x3f)?;
    write_config(
        &home.path().join(".config/xtoolconfig.json"),
        &format!(r#"{{"x3f_bin": "{}"}}"#, x3f.display()),
    )?;

    let config = ConfigResolver::new(home.path())
        .with_search_path(Some(OsString::from(bin.path())))
        .resolve()?;
    assert_eq!(config.x3f_extract_bin()?, x3f);

    let err = config.neat_image_bin().unwrap_err();
    assert!(err.to_string().contains("neat_image.neat_image_bin was not specified in config"));

    let neat = bin.path().join("NeatImage9CL");
    write_tool(&neat)?;
    assert_eq!(config.neat_image_bin()?, PathBuf::from(&neat));
    Ok(())
}
