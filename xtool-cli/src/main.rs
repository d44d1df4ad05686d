//! Main entry point for the xtool CLI application.
//!
//! Parses arguments, sets up logging and dispatches to the subcommand
//! handlers. Exit status: 0 when every file succeeded, 1 when any file
//! failed or the run could not proceed, 2 for usage errors (reported by
//! clap before anything else happens).

use std::process::ExitCode;

use xtool_cli::logging;
use xtool_cli::{parse_cli, run};
use xtool_core::terminal;

fn main() -> ExitCode {
    let cli_args = parse_cli();

    logging::init(logging::level_for_verbosity(cli_args.command.verbose()));

    match run(cli_args.command) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            let suggestion = if e.is_fatal() {
                Some("check that the tool is installed and the path in your xtool config is correct")
            } else {
                None
            };
            terminal::print_error("xtool failed", &e.to_string(), suggestion);
            ExitCode::FAILURE
        }
    }
}
