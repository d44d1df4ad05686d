//! Camera model swap and restore.
//!
//! A swap copies `Model` into the custom XMP tag and writes the new model;
//! a restore copies it back and clears the tag. exiftool's `-if` guards make
//! both idempotent: a file that is already swapped (or has nothing to
//! restore) fails with "failed condition" and is left untouched.

use super::session::{BatchOutcome, Session};
use crate::error::{CoreError, CoreResult};
use crate::external::ToolRunner;
use crate::external::exiftool::{ExiftoolTagConfig, OutputTarget, suffix_safe};
use crate::messages::Operation;

use log::debug;

use std::ffi::OsString;
use std::path::{Path, PathBuf};

/// File name suffix used for restored copies.
pub const RESTORE_SUFFIX: &str = "unswap";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CamswapMode {
    /// Swap in this camera model or `camswap_aliases` key.
    Swap { model: String },
    /// Restore the original model.
    Restore,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CamswapOptions {
    pub mode: CamswapMode,
    /// Write to new files with a suffix instead of editing in place
    pub suffix: bool,
    pub out_dir: Option<PathBuf>,
}

impl CamswapOptions {
    pub fn operation(&self) -> Operation {
        match self.mode {
            CamswapMode::Swap { .. } => Operation::CamswapSwap,
            CamswapMode::Restore => Operation::CamswapRestore,
        }
    }
}

/// Builds the exiftool arguments shared by every file in the batch.
///
/// `resolved_model` is the model written for a swap, after alias lookup.
/// The suffix is derived from what the user typed, not the resolved model.
pub fn camswap_args(
    options: &CamswapOptions,
    resolved_model: Option<&str>,
    tag_config: &ExiftoolTagConfig,
) -> Vec<OsString> {
    let mut args = tag_config.args();

    let suffix = match &options.mode {
        CamswapMode::Swap { model } => {
            let new_model = resolved_model.unwrap_or(model);
            args.extend(
                [
                    "-XtoolOriginalCameraModel<Model".to_string(),
                    format!("-Model={new_model}"),
                    "-if".to_string(),
                    "not $XtoolOriginalCameraModel".to_string(),
                ]
                .map(OsString::from),
            );
            suffix_safe(model)
        }
        CamswapMode::Restore => {
            args.extend(
                [
                    "-Model<XtoolOriginalCameraModel",
                    "-XtoolOriginalCameraModel=",
                    "-if",
                    "$XtoolOriginalCameraModel",
                ]
                .map(OsString::from),
            );
            RESTORE_SUFFIX.to_string()
        }
    };

    let target = OutputTarget {
        dir: options.out_dir.as_deref(),
        suffix: options.suffix.then_some(suffix.as_str()),
    };
    args.extend(target.args());
    args
}

/// Runs a camswap batch.
pub fn camswap<R: ToolRunner>(
    session: &mut Session<R>,
    options: &CamswapOptions,
    files: &[PathBuf],
) -> CoreResult<BatchOutcome> {
    let resolved_model = match &options.mode {
        CamswapMode::Swap { model } if model.is_empty() => {
            return Err(CoreError::InvalidArgument("camera model must not be empty".to_string()));
        }
        CamswapMode::Swap { model } => {
            let resolved = session.config().resolve_camera_alias(model).to_string();
            if &resolved != model {
                debug!("Camera alias '{model}' resolves to '{resolved}'");
            }
            Some(resolved)
        }
        CamswapMode::Restore => None,
    };

    // Removed from disk when this function returns.
    let tag_config = ExiftoolTagConfig::create()?;
    let base_args = camswap_args(options, resolved_model.as_deref(), &tag_config);
    let exiftool = session.config().exiftool_bin.clone();

    session.run_batch(options.operation(), &exiftool, files, true, |file: &Path| {
        let mut args = base_args.clone();
        args.push(file.as_os_str().to_os_string());
        args
    })
}
