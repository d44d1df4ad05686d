//! Terminal output and styling for xtool.
//!
//! Everything the user is meant to read goes through here and is emitted with
//! `log::info!`, so the logger configured by the CLI decides where it lands.
//! Styling is used only when stdout is a color-capable terminal and
//! `NO_COLOR` is unset.

use console::style;
use log::info;
use owo_colors::OwoColorize;
use unicode_width::UnicodeWidthStr;

use std::ffi::OsStr;
use std::path::Path;

/// Represents the visual hierarchy levels in the CLI output
#[derive(Debug, Clone, Copy)]
pub enum OutputLevel {
    /// Level 1: file headers and summaries
    Section,
    /// Level 2: per-file details
    Detail,
}

impl OutputLevel {
    fn indent(&self) -> &'static str {
        match self {
            OutputLevel::Section => "",
            OutputLevel::Detail => "    ",
        }
    }
}

/// Whether output should be styled. Shared with the CLI's logger so both
/// agree when stdout is piped.
pub fn should_use_color() -> bool {
    color_allowed(std::env::var_os("NO_COLOR").as_deref(), console::colors_enabled())
}

fn color_allowed(no_color: Option<&OsStr>, terminal_supports_color: bool) -> bool {
    no_color.is_none() && terminal_supports_color
}

/// Display width of the widest label, for use with [`print_status`].
pub fn label_width<'a, I>(labels: I) -> usize
where
    I: IntoIterator<Item = &'a str>,
{
    labels.into_iter().map(UnicodeWidthStr::width).max().unwrap_or(0)
}

fn label_padding(label: &str, label_width: usize) -> String {
    " ".repeat(label_width.saturating_sub(label.width()))
}

/// Print the "<file> ..." line that starts work on a file
pub fn print_file_start(file: &Path) {
    let text = format!("{} ...", file.display());
    if should_use_color() {
        info!("{}", style(text).bold());
    } else {
        info!("{text}");
    }
}

/// Print the command about to run (`-vv`)
pub fn print_command(command_line: &str) {
    if should_use_color() {
        info!("{}", command_line.dimmed());
    } else {
        info!("{command_line}");
    }
}

/// Print captured tool output (`-v`)
pub fn print_tool_output(output: &str) {
    if !output.is_empty() {
        info!("{output}");
    }
}

/// Print an error as soon as a file fails
pub fn print_file_error(message: &str) {
    if should_use_color() {
        info!("{}", message.red());
    } else {
        info!("{message}");
    }
}

/// Print a check-marked line under the current file
pub fn print_success(message: &str) {
    let indent = OutputLevel::Detail.indent();
    if should_use_color() {
        info!("{indent}{}", format!("✔ {message}").green());
    } else {
        info!("{indent}✔ {message}");
    }
}

/// Print a label/value pair under the current file. Values line up for
/// labels no wider than `label_width` columns.
pub fn print_status(label: &str, value: &str, label_width: usize) {
    let padding = label_padding(label, label_width);
    let label = format!("{label}:");
    let indent = OutputLevel::Detail.indent();

    if should_use_color() {
        info!("{indent}{}{padding} {value}", label.magenta());
    } else {
        info!("{indent}{label}{padding} {value}");
    }
}

/// Print an empty line
pub fn print_blank() {
    info!("");
}

/// Print the end-of-run summary: success count, then one line per failure.
pub fn print_summary<'a, I>(command: &str, verb: &str, successes: usize, failures: I)
where
    I: IntoIterator<Item = (&'a Path, String)>,
{
    let headline = format!("{command}: successfully {verb} {successes} images.");
    info!("");
    if should_use_color() {
        info!("{}", style(headline).bold().white());
    } else {
        info!("{headline}");
    }

    let mut failures = failures.into_iter().peekable();
    if failures.peek().is_none() {
        return;
    }

    if should_use_color() {
        info!("{}", "Errors:".red().bold());
    } else {
        info!("Errors:");
    }
    for (file, message) in failures {
        let name = format!("{}:", file.display());
        if should_use_color() {
            info!("- {} {message}", name.magenta());
        } else {
            info!("- {name} {message}");
        }
    }
}

/// Print a fatal error with an optional suggestion
pub fn print_error(title: &str, message: &str, suggestion: Option<&str>) {
    if should_use_color() {
        info!("✗ {}", title.red().bold());
    } else {
        info!("✗ {title}");
    }

    info!("");
    info!("  Message:  {message}");

    if let Some(suggestion_text) = suggestion {
        info!("");
        info!("  Suggestion: {suggestion_text}");
    }

    info!("");
}
