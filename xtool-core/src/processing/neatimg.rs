//! Neat Image denoising.
//!
//! The Neat Image CLI takes the input image first, followed by options. It
//! never overwrites its input, so there is no backup to relocate.

use super::session::{BatchOutcome, Session};
use crate::config::NeatImageConfig;
use crate::error::{CoreError, CoreResult};
use crate::external::ToolRunner;
use crate::messages::Operation;
use crate::utils::absolute_path;

use std::ffi::OsString;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NeatImageOptions {
    /// JPEG quality, 1-100; 0 means "use the configured default"
    pub quality: u8,
    pub out_dir: Option<PathBuf>,
}

/// Output format flag for an input file, chosen by extension.
pub fn output_format(file: &Path) -> Option<&'static str> {
    let ext = file.extension()?.to_string_lossy().to_ascii_lowercase();
    match ext.as_str() {
        "jpg" | "jpeg" => Some("JPG"),
        "tif" | "tiff" => Some("TIF"),
        "png" => Some("PNG"),
        _ => None,
    }
}

/// Options shared by every file: Smart Profile, no overwrite, metadata kept.
pub fn neatimg_base_args(config: &NeatImageConfig, options: &NeatImageOptions) -> CoreResult<Vec<OsString>> {
    let mut args: Vec<OsString> = ["--smart-profile", "--no-overwrite", "--preserve-meta", "--output-bitdepth=M"]
        .map(OsString::from)
        .into();

    if let Some(profiles) = config.profiles_folder.as_deref().filter(|p| !p.as_os_str().is_empty()) {
        let profiles = absolute_path(profiles).map_err(|e| {
            CoreError::OperationFailed(format!(
                "could not get path to profiles folder '{}': {e}",
                profiles.display()
            ))
        })?;
        let mut arg = OsString::from("--profile-folder=");
        arg.push(profiles);
        args.push(arg);
    }

    match &options.out_dir {
        Some(dir) => {
            let mut arg = OsString::from("--output-folder=");
            arg.push(dir);
            args.push(arg);
        }
        None => args.push(OsString::from("--output-to-input-folder")),
    }

    Ok(args)
}

/// Full argument list for one file.
pub fn neatimg_file_args(file: &Path, base_args: &[OsString], jpg_quality: u8) -> Vec<OsString> {
    let mut args = Vec::with_capacity(base_args.len() + 3);
    args.push(file.as_os_str().to_os_string());
    args.extend_from_slice(base_args);

    if let Some(format) = output_format(file) {
        args.push(OsString::from(format!("--output-format={format}")));
        if format == "JPG" {
            args.push(OsString::from(format!("--jpeg-quality={jpg_quality}")));
        }
    }
    args
}

/// Denoises every file.
pub fn neatimg<R: ToolRunner>(
    session: &mut Session<R>,
    options: &NeatImageOptions,
    files: &[PathBuf],
) -> CoreResult<BatchOutcome> {
    if options.quality > 100 {
        return Err(CoreError::InvalidArgument(format!("invalid -q: '{}'", options.quality)));
    }

    let config = session.config();
    let binary = config.neat_image_bin()?;
    let jpg_quality = config.neat_image.effective_jpg_quality(options.quality);
    let base_args = neatimg_base_args(&config.neat_image, options)?;

    session.run_batch(Operation::NeatImage, &binary, files, false, |file: &Path| {
        neatimg_file_args(file, &base_args, jpg_quality)
    })
}
