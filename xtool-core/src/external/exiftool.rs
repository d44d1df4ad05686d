// ============================================================================
// xtool-core/src/external/exiftool.rs
// ============================================================================
//
// EXIFTOOL: Argument helpers for the exiftool-based operations
//
// camswap records the original camera model in a custom XMP tag. exiftool
// only knows about user-defined tags through a `-config` file, so this
// module writes one to a temporary location that lives as long as the
// returned handle.

use crate::error::{CoreError, CoreResult};

use log::debug;
use tempfile::NamedTempFile;

use std::ffi::OsString;
use std::io::Write;
use std::path::{MAIN_SEPARATOR, Path};

/// Name of the XMP tag that stores the original camera model.
pub const ORIGINAL_MODEL_TAG: &str = "XtoolOriginalCameraModel";

/// exiftool user-defined tag config declaring [`ORIGINAL_MODEL_TAG`].
pub const XMP_TAG_CONFIG: &str = r#"
%Image::ExifTool::UserDefined = (
    'Image::ExifTool::XMP::xmp' => {
        XtoolOriginalCameraModel => { },
    },
);

1;
"#;

/// Temporary exiftool config file; removed from disk when dropped.
#[derive(Debug)]
pub struct ExiftoolTagConfig {
    file: NamedTempFile,
}

impl ExiftoolTagConfig {
    /// Writes [`XMP_TAG_CONFIG`] to a new temporary file.
    pub fn create() -> CoreResult<Self> {
        let mut file = tempfile::Builder::new()
            .prefix("xtool_xmp")
            .tempfile()
            .map_err(CoreError::ExiftoolConfig)?;
        file.write_all(XMP_TAG_CONFIG.as_bytes())
            .and_then(|()| file.flush())
            .map_err(CoreError::ExiftoolConfig)?;

        debug!("Wrote exiftool XMP config to {}", file.path().display());
        Ok(Self { file })
    }

    pub fn path(&self) -> &Path {
        self.file.path()
    }

    /// The `-config <file>` argument pair. exiftool requires it first.
    pub fn args(&self) -> Vec<OsString> {
        vec![OsString::from("-config"), self.path().as_os_str().to_os_string()]
    }
}

/// Where exiftool should write modified images.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OutputTarget<'a> {
    /// Output directory (`-d`)
    pub dir: Option<&'a Path>,
    /// Suffix for new file names (`-s`); `None` edits in place
    pub suffix: Option<&'a str>,
}

impl OutputTarget<'_> {
    /// Builds the `-o` argument pair, or nothing for in-place edits.
    ///
    /// | dir | suffix | template               |
    /// |-----|--------|------------------------|
    /// | yes | yes    | `DIR/%f_<suffix>.%e`   |
    /// | no  | yes    | `%d%f_<suffix>.%e`     |
    /// | yes | no     | `DIR/`                 |
    pub fn args(&self) -> Vec<OsString> {
        let template = match (self.dir, self.suffix) {
            (Some(dir), Some(suffix)) => {
                let mut template = dir_prefix(dir);
                template.push(format!("%f_{suffix}.%e"));
                template
            }
            (None, Some(suffix)) => OsString::from(format!("%d%f_{suffix}.%e")),
            (Some(dir), None) => dir_prefix(dir),
            (None, None) => return Vec::new(),
        };
        vec![OsString::from("-o"), template]
    }
}

/// `dir` with exactly one trailing separator. exiftool treats a trailing
/// separator as "write into this directory".
fn dir_prefix(dir: &Path) -> OsString {
    let mut prefix = dir.as_os_str().to_os_string();
    if !prefix.to_string_lossy().ends_with(MAIN_SEPARATOR) {
        prefix.push(MAIN_SEPARATOR.to_string());
    }
    prefix
}

/// Makes a camera name safe for use in a file name suffix.
pub fn suffix_safe(name: &str) -> String {
    name.replace(' ', "-")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn strings(args: Vec<OsString>) -> Vec<String> {
        args.into_iter().map(|a| a.to_string_lossy().into_owned()).collect()
    }

    #[test]
    fn test_tag_config_written_and_removed() {
        let config = ExiftoolTagConfig::create().unwrap();
        let path = config.path().to_path_buf();
        let contents = fs::read_to_string(&path).unwrap();
        assert!(contents.contains("XtoolOriginalCameraModel => { }"));
        assert_eq!(strings(config.args())[0], "-config");

        drop(config);
        assert!(!path.exists());
    }

    #[cfg(unix)]
    #[test]
    fn test_output_templates() {
        let out = Path::new("/tmp/out");
        assert!(OutputTarget::default().args().is_empty());
        assert_eq!(
            strings(OutputTarget { dir: Some(out), suffix: Some("noGPS") }.args()),
            vec!["-o", "/tmp/out/%f_noGPS.%e"]
        );
        assert_eq!(
            strings(OutputTarget { dir: None, suffix: Some("unswap") }.args()),
            vec!["-o", "%d%f_unswap.%e"]
        );
        assert_eq!(
            strings(OutputTarget { dir: Some(Path::new("/tmp/out/")), suffix: None }.args()),
            vec!["-o", "/tmp/out/"]
        );
    }

    #[test]
    fn test_suffix_safe() {
        assert_eq!(suffix_safe("GFX 50S II"), "GFX-50S-II");
        assert_eq!(suffix_safe("gfx"), "gfx");
    }
}
