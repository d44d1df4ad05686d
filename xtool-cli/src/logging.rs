// ============================================================================
// xtool-cli/src/logging.rs
// ============================================================================
//
// LOGGING SETUP: env_logger Configuration for the xtool CLI
//
// All user-facing output is emitted through the `log` macros (see
// xtool_core::terminal), so the logger doubles as the console printer:
// info lines are written as-is to stdout, warnings and errors get a
// prefix.
//
// USAGE:
// - default: Info
// - -vv: Debug (backup policy lookups, cache hits, tool exit codes)
// - RUST_LOG overrides both, e.g. RUST_LOG=xtool_core=trace

use env_logger::{Env, Target};
use log::{Level, LevelFilter, debug};
use owo_colors::OwoColorize;
use xtool_core::terminal;

use std::io::Write;

/// Log level for a `-v` count.
pub fn level_for_verbosity(verbose: u8) -> LevelFilter {
    if verbose >= 2 {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    }
}

/// Initializes env_logger with a message-only console format.
pub fn init(level: LevelFilter) {
    let use_color = terminal::should_use_color();

    env_logger::Builder::from_env(Env::default().default_filter_or(level.as_str()))
        .target(Target::Stdout)
        .format(move |buf, record| match record.level() {
            Level::Info => writeln!(buf, "{}", record.args()),
            Level::Error if use_color => writeln!(buf, "{} {}", "error:".red().bold(), record.args()),
            Level::Warn if use_color => writeln!(buf, "{} {}", "warning:".yellow().bold(), record.args()),
            Level::Error => writeln!(buf, "error: {}", record.args()),
            Level::Warn => writeln!(buf, "warning: {}", record.args()),
            Level::Debug | Level::Trace => writeln!(buf, "[{}] {}", record.target(), record.args()),
        })
        .init();

    debug!("Logger initialized with level: {level}");
}
