// ============================================================================
// xtool-cli/src/error.rs
// ============================================================================
//
// CLI ERROR HANDLING
//
// Handlers return xtool-core's error type directly; main maps it to an exit
// status. The only CLI-specific piece is naming which setup step failed.

use xtool_core::{CoreError, CoreResult};

use std::fmt;

/// Result type returned by the subcommand handlers.
pub type CliResult<T> = CoreResult<T>;

/// Prefixes an error with the setup step that produced it.
pub trait CliErrorContext<T> {
    fn cli_context<C: fmt::Display>(self, step: C) -> CliResult<T>;
}

impl<T, E> CliErrorContext<T> for Result<T, E>
where
    E: Into<CoreError>,
{
    fn cli_context<C: fmt::Display>(self, step: C) -> CliResult<T> {
        self.map_err(|e| CoreError::OperationFailed(format!("{step}: {}", e.into())))
    }
}
