//! Camera swap and GPS metadata reports.
//!
//! Each query runs exiftool with `-j`, which prints a JSON array holding one
//! object per input file. Only stdout is parsed; exiftool writes warnings to
//! stderr.

use super::session::{BatchOutcome, Session};
use crate::error::{CoreError, CoreResult};
use crate::external::ToolRunner;
use crate::external::exiftool::{ExiftoolTagConfig, ORIGINAL_MODEL_TAG};
use crate::messages::{Operation, describe_failure};
use crate::terminal;

use serde_json::{Map, Value};

use std::collections::BTreeMap;
use std::ffi::OsString;
use std::path::{Path, PathBuf};

/// Tags exiftool includes in every `-gps*` answer that say nothing about
/// the photo's location.
const IGNORED_GPS_TAGS: &[&str] = &["GPSVersionID", "SourceFile"];

/// Which reports to produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InspectOptions {
    pub location: bool,
    pub swap: bool,
}

impl InspectOptions {
    /// Asking for neither report means both.
    pub fn new(location: bool, swap: bool) -> Self {
        if !location && !swap {
            Self {
                location: true,
                swap: true,
            }
        } else {
            Self { location, swap }
        }
    }
}

/// Camera swap state of one file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SwapReport {
    Swapped {
        original_model: String,
        model: Option<String>,
    },
    NotSwapped {
        model: Option<String>,
    },
}

/// GPS tags found in one file, sorted by tag name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LocationReport {
    pub tags: BTreeMap<String, String>,
}

impl LocationReport {
    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }
}

/// `-j -f -Model -XtoolOriginalCameraModel`; `-f` makes exiftool print `-`
/// for a missing tag.
pub fn swap_query_args(tag_config: &ExiftoolTagConfig, file: &Path) -> Vec<OsString> {
    let mut args = tag_config.args();
    args.extend(["-j", "-f", "-Model"].map(OsString::from));
    args.push(OsString::from(format!("-{ORIGINAL_MODEL_TAG}")));
    args.push(file.as_os_str().to_os_string());
    args
}

pub fn location_query_args(file: &Path) -> Vec<OsString> {
    let mut args: Vec<OsString> = ["-j", "-gps*"].map(OsString::from).into();
    args.push(file.as_os_str().to_os_string());
    args
}

/// Parses exiftool `-j` output for exactly one file.
fn parse_single_object(stdout: &str) -> CoreResult<Map<String, Value>> {
    let mut items: Vec<Map<String, Value>> = serde_json::from_str(stdout).map_err(|e| CoreError::ToolOutput {
        tool: "exiftool".to_string(),
        message: format!("failed to parse exiftool result as JSON: {e}"),
    })?;

    if items.len() != 1 {
        return Err(CoreError::ToolOutput {
            tool: "exiftool".to_string(),
            message: format!("expected 1 item, got {}", items.len()),
        });
    }
    Ok(items.remove(0))
}

fn value_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

pub fn parse_swap_report(stdout: &str) -> CoreResult<SwapReport> {
    let metadata = parse_single_object(stdout)?;
    let model = metadata.get("Model").map(value_text);

    match metadata.get(ORIGINAL_MODEL_TAG).map(value_text) {
        Some(original_model) if original_model != "-" => Ok(SwapReport::Swapped { original_model, model }),
        _ => Ok(SwapReport::NotSwapped { model }),
    }
}

pub fn parse_location_report(stdout: &str) -> CoreResult<LocationReport> {
    let metadata = parse_single_object(stdout)?;
    let tags = metadata
        .iter()
        .filter(|(tag, _)| !IGNORED_GPS_TAGS.contains(&tag.as_str()))
        .map(|(tag, value)| (tag.clone(), value_text(value)))
        .collect();
    Ok(LocationReport { tags })
}

const ORIGINAL_MODEL_LABEL: &str = "Original Camera Model";
const SWAPPED_MODEL_LABEL: &str = "Swapped Camera Model";

fn print_swap_report(report: &SwapReport) {
    match report {
        SwapReport::Swapped { original_model, model } => {
            let width = terminal::label_width([ORIGINAL_MODEL_LABEL, SWAPPED_MODEL_LABEL]);
            terminal::print_status(ORIGINAL_MODEL_LABEL, original_model, width);
            if let Some(model) = model {
                terminal::print_status(SWAPPED_MODEL_LABEL, model, width);
            }
        }
        SwapReport::NotSwapped { model } => {
            terminal::print_success("No camera swap metadata.");
            if let Some(model) = model {
                terminal::print_status("Camera Model", model, 0);
            }
        }
    }
    terminal::print_blank();
}

fn print_location_report(report: &LocationReport) {
    if report.is_empty() {
        terminal::print_success("No GPS metadata.");
    } else {
        let width = terminal::label_width(report.tags.keys().map(String::as_str));
        for (tag, value) in &report.tags {
            terminal::print_status(tag, value, width);
        }
    }
    terminal::print_blank();
}

/// Prints the requested reports for every file.
///
/// A file whose query fails is recorded as a failure and its remaining
/// reports are skipped.
pub fn inspect<R: ToolRunner>(
    session: &mut Session<R>,
    options: InspectOptions,
    files: &[PathBuf],
) -> CoreResult<BatchOutcome> {
    let tag_config = if options.swap {
        Some(ExiftoolTagConfig::create()?)
    } else {
        None
    };
    let exiftool = session.config().exiftool_bin.clone();
    let mut outcome = BatchOutcome::new(Operation::Inspect);

    terminal::print_blank();
    for file in files {
        terminal::print_file_start(file);

        let result = inspect_file(session, &exiftool, tag_config.as_ref(), options, file);
        match result {
            Ok(()) => outcome.record_success(file),
            Err(e) if e.is_fatal() => return Err(e),
            Err(e) => {
                terminal::print_file_error(&describe_failure(Operation::Inspect, &e));
                terminal::print_blank();
                outcome.record_failure(file, e);
            }
        }
    }

    Ok(outcome)
}

fn inspect_file<R: ToolRunner>(
    session: &Session<R>,
    exiftool: &Path,
    tag_config: Option<&ExiftoolTagConfig>,
    options: InspectOptions,
    file: &Path,
) -> CoreResult<()> {
    if let Some(tag_config) = tag_config {
        let output = session.run_tool(exiftool, &swap_query_args(tag_config, file))?;
        print_swap_report(&parse_swap_report(&output.stdout)?);
    }

    if options.location {
        let output = session.run_tool(exiftool, &location_query_args(file))?;
        print_location_report(&parse_location_report(&output.stdout)?);
    }

    Ok(())
}
