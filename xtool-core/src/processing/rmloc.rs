//! GPS metadata removal.

use super::session::{BatchOutcome, Session};
use crate::error::CoreResult;
use crate::external::ToolRunner;
use crate::external::exiftool::OutputTarget;
use crate::messages::Operation;

use std::ffi::OsString;
use std::path::{Path, PathBuf};

/// File name suffix used for copies written with `-s`.
pub const RMLOC_SUFFIX: &str = "noGPS";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RmlocOptions {
    pub suffix: bool,
    pub out_dir: Option<PathBuf>,
}

pub fn rmloc_args(options: &RmlocOptions) -> Vec<OsString> {
    let mut args = vec![OsString::from("-gps*=")];
    let target = OutputTarget {
        dir: options.out_dir.as_deref(),
        suffix: options.suffix.then_some(RMLOC_SUFFIX),
    };
    args.extend(target.args());
    args
}

/// Strips GPS tags from every file.
pub fn rmloc<R: ToolRunner>(
    session: &mut Session<R>,
    options: &RmlocOptions,
    files: &[PathBuf],
) -> CoreResult<BatchOutcome> {
    let base_args = rmloc_args(options);
    let exiftool = session.config().exiftool_bin.clone();

    session.run_batch(Operation::Rmloc, &exiftool, files, true, |file: &Path| {
        let mut args = base_args.clone();
        args.push(file.as_os_str().to_os_string());
        args
    })
}
