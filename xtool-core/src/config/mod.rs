//! Configuration structures and resolution for the xtool core library.
//!
//! The user-level configuration is a small JSON document holding tool paths,
//! camera-model aliases and Neat Image defaults. It is looked up in a fixed
//! list of home-relative locations; the first file that exists wins and files
//! are never merged. Binary paths that are not configured fall back to a
//! `$PATH` search.

mod neat_image;
mod search;

use crate::error::{CoreError, CoreResult};

use log::debug;
use serde::{Deserialize, Serialize};

use std::collections::HashMap;
use std::env;
use std::ffi::OsString;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

pub use neat_image::{DEFAULT_JPG_QUALITY, NeatImageConfig};
pub use search::{find_in_path, is_executable, validate_executable};

/// File name of the primary config file, under `~/.config`.
pub const CONFIG_FILE_NAME: &str = "xtoolconfig.json";

/// File name of the fallback config file, directly under `~`.
pub const LEGACY_CONFIG_FILE_NAME: &str = ".xtoolconfig.json";

/// Default exiftool binary name searched for on `$PATH`.
pub const DEFAULT_EXIFTOOL_NAME: &str = "exiftool";

/// Default Neat Image CLI binary name searched for on `$PATH`.
pub const DEFAULT_NEAT_IMAGE_NAME: &str = "NeatImage9CL";

/// Default X3F extraction binary name searched for on `$PATH`.
pub const DEFAULT_X3F_EXTRACT_NAME: &str = "x3f_extract";

/// On-disk shape of the xtool configuration file.
///
/// Every key is optional. Empty strings are treated the same as missing
/// keys, which matches how hand-edited config files tend to look.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ConfigFile {
    /// Absolute path to exiftool
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exiftool_bin: Option<PathBuf>,

    /// Short name -> camera model string, used by `camswap -c`
    #[serde(skip_serializing_if = "HashMap::is_empty")]
    pub camswap_aliases: HashMap<String, String>,

    /// Neat Image CLI settings
    pub neat_image: NeatImageConfig,

    /// Path to x3f_extract
    #[serde(skip_serializing_if = "Option::is_none")]
    pub x3f_extract_bin: Option<PathBuf>,

    /// Deprecated spelling of `x3f_extract_bin`, still honored as a fallback
    #[serde(rename = "x3f_bin", skip_serializing_if = "Option::is_none")]
    pub deprecated_x3f_bin: Option<PathBuf>,
}

/// Resolved application configuration.
///
/// Produced once per invocation by [`ConfigResolver::resolve`] and never
/// mutated afterwards. The exiftool path has already been validated; the
/// other tools are resolved lazily by the subcommands that need them.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Validated path to the exiftool binary
    pub exiftool_bin: PathBuf,

    /// Camera model aliases for `camswap`
    pub camswap_aliases: HashMap<String, String>,

    /// Neat Image CLI settings
    pub neat_image: NeatImageConfig,

    /// The config file that was loaded, if any
    pub source: Option<PathBuf>,

    x3f_extract_bin: Option<PathBuf>,
    search_path: Option<OsString>,
}

impl AppConfig {
    /// Resolves a camswap alias to the full camera model string.
    ///
    /// Names without an alias entry are returned unchanged.
    pub fn resolve_camera_alias<'a>(&'a self, name: &'a str) -> &'a str {
        match self.camswap_aliases.get(name) {
            Some(model) if !model.is_empty() => model.as_str(),
            _ => name,
        }
    }

    /// Returns the configured X3F extractor path, honoring the deprecated
    /// `x3f_bin` key.
    pub fn configured_x3f_extract_bin(&self) -> Option<&Path> {
        self.x3f_extract_bin.as_deref()
    }

    /// Resolves and validates the Neat Image CLI binary.
    pub fn neat_image_bin(&self) -> CoreResult<PathBuf> {
        resolve_tool(
            self.neat_image.neat_image_bin.as_deref(),
            "neat_image.neat_image_bin",
            DEFAULT_NEAT_IMAGE_NAME,
            self.search_path.as_deref(),
        )
    }

    /// Resolves and validates the X3F extraction binary.
    pub fn x3f_extract_bin(&self) -> CoreResult<PathBuf> {
        resolve_tool(
            self.configured_x3f_extract_bin(),
            "x3f_extract_bin",
            DEFAULT_X3F_EXTRACT_NAME,
            self.search_path.as_deref(),
        )
    }
}

/// Locates, parses and validates the xtool configuration.
#[derive(Debug, Clone)]
pub struct ConfigResolver {
    home_dir: PathBuf,
    search_path: Option<OsString>,
}

impl ConfigResolver {
    /// Creates a resolver rooted at `home_dir` that searches the process `$PATH`.
    pub fn new(home_dir: impl Into<PathBuf>) -> Self {
        Self {
            home_dir: home_dir.into(),
            search_path: env::var_os("PATH"),
        }
    }

    /// Creates a resolver for the current user's home directory.
    pub fn from_env() -> CoreResult<Self> {
        let home = dirs::home_dir().ok_or(CoreError::HomeDirUnavailable)?;
        Ok(Self::new(home))
    }

    /// Overrides the executable search path used for fallbacks.
    pub fn with_search_path(mut self, search_path: Option<OsString>) -> Self {
        self.search_path = search_path;
        self
    }

    /// Candidate config file locations, highest priority first.
    pub fn candidate_paths(&self) -> Vec<PathBuf> {
        vec![
            self.home_dir.join(".config").join(CONFIG_FILE_NAME),
            self.home_dir.join(LEGACY_CONFIG_FILE_NAME),
        ]
    }

    /// Reads the first existing candidate file.
    ///
    /// Returns the default (empty) config and `None` when no candidate exists.
    pub fn load_file(&self) -> CoreResult<(ConfigFile, Option<PathBuf>)> {
        for path in self.candidate_paths() {
            let contents = match fs::read_to_string(&path) {
                Ok(contents) => contents,
                Err(e) if e.kind() == io::ErrorKind::NotFound => continue,
                Err(source) => return Err(CoreError::ConfigRead { path, source }),
            };

            let file: ConfigFile = serde_json::from_str(&contents)
                .map_err(|source| CoreError::ConfigParse {
                    path: path.clone(),
                    source,
                })?;

            debug!("Loaded config from {}", path.display());
            return Ok((file, Some(path)));
        }

        debug!("No xtool config file found; using defaults");
        Ok((ConfigFile::default(), None))
    }

    /// Loads the config file and validates the exiftool binary.
    pub fn resolve(&self) -> CoreResult<AppConfig> {
        let (file, source) = self.load_file()?;

        let exiftool_bin = resolve_tool(
            file.exiftool_bin.as_deref(),
            "exiftool_bin",
            DEFAULT_EXIFTOOL_NAME,
            self.search_path.as_deref(),
        )?;

        let x3f_extract_bin = non_empty(file.x3f_extract_bin)
            .or_else(|| non_empty(file.deprecated_x3f_bin));

        Ok(AppConfig {
            exiftool_bin,
            camswap_aliases: file.camswap_aliases,
            neat_image: file.neat_image,
            source,
            x3f_extract_bin,
            search_path: self.search_path.clone(),
        })
    }
}

/// Resolves the application config for the current user.
pub fn resolve_config() -> CoreResult<AppConfig> {
    ConfigResolver::from_env()?.resolve()
}

/// Picks the configured binary or falls back to `$PATH`, then validates it.
fn resolve_tool(
    configured: Option<&Path>,
    key: &str,
    default_name: &str,
    search_path: Option<&std::ffi::OsStr>,
) -> CoreResult<PathBuf> {
    let path = match configured.filter(|p| !p.as_os_str().is_empty()) {
        Some(path) => path.to_path_buf(),
        None => find_in_path(default_name, search_path).ok_or_else(|| {
            CoreError::BinaryNotFound {
                key: key.to_string(),
                binary: default_name.to_string(),
            }
        })?,
    };

    validate_executable(default_name, &path)?;
    debug!("Using {} at {}", default_name, path.display());
    Ok(path)
}

fn non_empty(path: Option<PathBuf>) -> Option<PathBuf> {
    path.filter(|p| !p.as_os_str().is_empty())
}
