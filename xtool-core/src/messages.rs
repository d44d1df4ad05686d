//! Operation names and the friendly-message table.
//!
//! exiftool reports a failed `-if` condition as "failed condition", which
//! means different things depending on what was being attempted. The table
//! below maps raw tool text to what the user actually needs to know. It is
//! matched by substring, so it depends on exiftool's exact wording.

use crate::error::CoreError;

/// The operation a batch was run for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    /// `camswap -c`
    CamswapSwap,
    /// `camswap -r`
    CamswapRestore,
    Rmloc,
    Inspect,
    NeatImage,
    X3fJpg,
}

impl Operation {
    /// Subcommand name shown in summaries.
    pub fn command_name(self) -> &'static str {
        match self {
            Operation::CamswapSwap | Operation::CamswapRestore => "camswap",
            Operation::Rmloc => "rmloc",
            Operation::Inspect => "inspect",
            Operation::NeatImage => "neatimg",
            Operation::X3fJpg => "x3fjpg",
        }
    }

    /// Past-tense verb used in the summary line.
    pub fn summary_verb(self) -> &'static str {
        match self {
            Operation::X3fJpg => "extracted",
            _ => "processed",
        }
    }
}

/// (operation, raw substring, friendly message)
const FRIENDLY_MESSAGES: &[(Operation, &str, &str)] = &[
    (Operation::CamswapSwap, "failed condition", "has already been camswapped"),
    (Operation::CamswapRestore, "failed condition", "no camera swap metadata attached"),
];

/// Looks up a friendlier replacement for raw tool output.
pub fn friendly_message(operation: Operation, raw: &str) -> Option<&'static str> {
    FRIENDLY_MESSAGES
        .iter()
        .find(|(op, needle, _)| *op == operation && raw.contains(needle))
        .map(|(_, _, message)| *message)
}

/// The message shown for a failed file.
pub fn describe_failure(operation: Operation, error: &CoreError) -> String {
    let raw = error.to_string();
    match friendly_message(operation, &raw) {
        Some(message) => message.to_string(),
        None => raw,
    }
}
