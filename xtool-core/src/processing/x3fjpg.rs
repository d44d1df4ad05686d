//! Embedded JPEG extraction from Sigma X3F files.

use super::session::{BatchOutcome, Session, Verbosity};
use crate::error::{CoreError, CoreResult};
use crate::external::ToolRunner;
use crate::messages::Operation;

use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct X3fJpgOptions {
    pub out_dir: Option<PathBuf>,
}

/// `-jpg [-o DIR]`, then `-q` unless the user asked for output, or `-v`
/// when they asked for commands too.
pub fn x3fjpg_args(options: &X3fJpgOptions, verbosity: Verbosity) -> Vec<OsString> {
    let mut args = vec![OsString::from("-jpg")];
    if let Some(dir) = &options.out_dir {
        args.push(OsString::from("-o"));
        args.push(dir.as_os_str().to_os_string());
    }
    match verbosity {
        Verbosity::Quiet => args.push(OsString::from("-q")),
        Verbosity::Output => {}
        Verbosity::Commands => args.push(OsString::from("-v")),
    }
    args
}

/// Extracts the embedded JPEG from every file.
pub fn x3fjpg<R: ToolRunner>(
    session: &mut Session<R>,
    options: &X3fJpgOptions,
    files: &[PathBuf],
) -> CoreResult<BatchOutcome> {
    let binary = session.config().x3f_extract_bin()?;

    if let Some(dir) = &options.out_dir {
        fs::create_dir_all(dir).map_err(|e| {
            CoreError::OperationFailed(format!("failed to ensure '{}' exists: {e}", dir.display()))
        })?;
    }

    let base_args = x3fjpg_args(options, session.verbosity());
    session.run_batch(Operation::X3fJpg, &binary, files, false, |file: &Path| {
        let mut args = base_args.clone();
        args.push(file.as_os_str().to_os_string());
        args
    })
}
