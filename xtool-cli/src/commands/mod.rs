//! Subcommand handlers.
//!
//! Each handler turns its parsed arguments into core options, runs the
//! batch and prints the summary. Handlers return `Ok(true)` when every file
//! succeeded and `Ok(false)` when at least one failed; `Err` is reserved for
//! problems that stopped the run outright.

pub mod camswap;
pub mod inspect;
pub mod neatimg;
pub mod rmloc;
pub mod version;
pub mod x3fjpg;

use crate::cli::Commands;
use crate::error::{CliErrorContext, CliResult};

use xtool_core::backups::BackupPolicyResolver;
use xtool_core::config::ConfigResolver;
use xtool_core::external::SystemToolRunner;
use xtool_core::processing::{BatchOutcome, Session, Verbosity};

/// Dispatches to the handler for `command`.
pub fn run(command: Commands) -> CliResult<bool> {
    match command {
        Commands::Camswap(args) => camswap::run_camswap(&args),
        Commands::Rmloc(args) => rmloc::run_rmloc(&args),
        Commands::Inspect(args) => inspect::run_inspect(&args),
        Commands::Neatimg(args) => neatimg::run_neatimg(&args),
        Commands::X3fjpg(args) => x3fjpg::run_x3fjpg(&args),
        Commands::Version => {
            version::run_version();
            Ok(true)
        }
    }
}

/// Loads the config and sets up a session for the current user.
pub fn build_session(verbose: u8) -> CliResult<Session<SystemToolRunner>> {
    let config = ConfigResolver::from_env()
        .and_then(|resolver| resolver.resolve())
        .cli_context("invalid xtool configuration")?;
    let backups = BackupPolicyResolver::from_env()?;

    Ok(Session::new(config, SystemToolRunner, backups, Verbosity::from_count(verbose)))
}

/// Prints the batch summary and reports whether the batch fully succeeded.
pub fn finish(outcome: &BatchOutcome) -> bool {
    outcome.print_summary();
    outcome.is_success()
}
