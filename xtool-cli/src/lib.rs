//! Library component for the xtool CLI application.
//!
//! This contains the argument definitions and command logic that the binary
//! uses, split out so they can be exercised from tests.

/// Command-line interface definitions using clap
pub mod cli;

/// Command implementations for each subcommand
pub mod commands;

/// Error handling utilities for the CLI
pub mod error;

/// Logger setup
pub mod logging;

// Re-exports for convenience
pub use cli::{Cli, Commands, parse_cli, parse_cli_from};
pub use commands::run;
