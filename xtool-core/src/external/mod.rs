// ============================================================================
// xtool-core/src/external/mod.rs
// ============================================================================
//
// EXTERNAL TOOLS: Running exiftool, Neat Image and x3f_extract
//
// This module encapsulates process execution for the external command-line
// tools xtool drives. Execution goes through the `ToolRunner` trait so that
// batch processing can be exercised with recording or scripted runners in
// tests, while production code uses `SystemToolRunner`.
//
// KEY COMPONENTS:
// - ToolRunner: trait for running a binary with an argument list
// - SystemToolRunner: std::process implementation
// - ToolOutput: captured output and exit status
// - run_tool: runs a tool and classifies failures
// - exiftool: exiftool-specific helpers (XMP tag config, output templates)

// ---- Internal crate imports ----
use crate::error::{CoreError, CoreResult};

// ---- External crate imports ----
use log::debug;

// ---- Standard library imports ----
use std::ffi::OsString;
use std::io;
use std::path::Path;
use std::process::{Command, Stdio};

// ============================================================================
// SUBMODULES
// ============================================================================

/// exiftool argument helpers and the temporary XMP tag config file
pub mod exiftool;

// ============================================================================
// TOOL OUTPUT
// ============================================================================

/// Captured result of running an external tool.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ToolOutput {
    /// Exit code, `None` if the process was terminated by a signal
    pub exit_code: Option<i32>,
    /// Captured standard output
    pub stdout: String,
    /// Captured standard error
    pub stderr: String,
}

impl ToolOutput {
    /// Whether the tool exited cleanly with status zero.
    pub fn success(&self) -> bool {
        self.exit_code == Some(0)
    }

    /// Standard output followed by standard error, trimmed.
    pub fn combined(&self) -> String {
        let stdout = self.stdout.trim();
        let stderr = self.stderr.trim();
        match (stdout.is_empty(), stderr.is_empty()) {
            (_, true) => stdout.to_string(),
            (true, false) => stderr.to_string(),
            (false, false) => format!("{stdout}\n{stderr}"),
        }
    }
}

// ============================================================================
// TOOL RUNNER
// ============================================================================

/// Runs an external binary to completion.
///
/// Implementations return `Err` only when the process could not be started
/// or waited on. A non-zero exit is reported through [`ToolOutput`].
pub trait ToolRunner {
    fn run(&self, binary: &Path, args: &[OsString]) -> io::Result<ToolOutput>;
}

/// [`ToolRunner`] backed by `std::process::Command`.
///
/// Stdin is closed so a tool waiting for input fails instead of hanging.
/// There is no timeout.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemToolRunner;

impl ToolRunner for SystemToolRunner {
    fn run(&self, binary: &Path, args: &[OsString]) -> io::Result<ToolOutput> {
        let output = Command::new(binary)
            .args(args)
            .stdin(Stdio::null())
            .output()?;

        Ok(ToolOutput {
            exit_code: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }
}

impl<R: ToolRunner + ?Sized> ToolRunner for &R {
    fn run(&self, binary: &Path, args: &[OsString]) -> io::Result<ToolOutput> {
        (**self).run(binary, args)
    }
}

// ============================================================================
// EXECUTION
// ============================================================================

/// Name used for a tool in messages: the binary's file name.
pub fn tool_name(binary: &Path) -> String {
    binary
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| binary.display().to_string())
}

/// Formats a command line for display.
pub fn format_command(binary: &Path, args: &[OsString]) -> String {
    let mut line = binary.display().to_string();
    for arg in args {
        line.push(' ');
        line.push_str(&arg.to_string_lossy());
    }
    line
}

/// Runs `binary` and classifies the result.
///
/// * `Ok(output)` - the tool exited with status zero
/// * `Err(CoreError::ToolFailed)` - non-zero exit; the message is the
///   trimmed captured output
/// * `Err(CoreError::ToolLaunch)` - the process could not be run at all
pub fn run_tool<R: ToolRunner + ?Sized>(
    runner: &R,
    binary: &Path,
    args: &[OsString],
) -> CoreResult<ToolOutput> {
    let output = runner.run(binary, args).map_err(|source| CoreError::ToolLaunch {
        tool: tool_name(binary),
        source,
    })?;

    if !output.success() {
        debug!("{} exited with {:?}", tool_name(binary), output.exit_code);
        return Err(CoreError::ToolFailed {
            tool: tool_name(binary),
            message: output.combined(),
        });
    }

    Ok(output)
}
