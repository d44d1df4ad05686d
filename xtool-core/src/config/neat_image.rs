//! Neat Image configuration
//!
//! Settings for the Neat Image command-line denoiser, read from the
//! `neat_image` section of the config file.

use log::warn;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// JPEG quality used when neither the command line nor the config sets one.
pub const DEFAULT_JPG_QUALITY: u8 = 80;

/// Neat Image CLI settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct NeatImageConfig {
    /// Path to the Neat Image CLI binary
    #[serde(skip_serializing_if = "Option::is_none")]
    pub neat_image_bin: Option<PathBuf>,

    /// Folder holding Neat Image noise profiles
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profiles_folder: Option<PathBuf>,

    /// JPEG quality used when `-q` is not given (0 = unset)
    pub default_jpg_quality: i64,
}

impl NeatImageConfig {
    /// Picks the JPEG quality for a run.
    ///
    /// A non-zero `requested` value wins, then a valid configured default,
    /// then [`DEFAULT_JPG_QUALITY`]. An out-of-range configured default is
    /// reported and ignored.
    pub fn effective_jpg_quality(&self, requested: u8) -> u8 {
        if requested != 0 {
            return requested;
        }

        match self.default_jpg_quality {
            0 => DEFAULT_JPG_QUALITY,
            q @ 1..=100 => q as u8,
            q => {
                warn!("invalid neat_image.default_jpg_quality '{q}'");
                DEFAULT_JPG_QUALITY
            }
        }
    }
}
