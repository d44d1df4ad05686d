//! Implementation of the 'inspect' subcommand.
//!
//! Reports are printed per file as they are produced. There is no summary
//! line, but a file whose query failed still makes the run exit non-zero.

use super::build_session;
use crate::cli::InspectArgs;
use crate::error::CliResult;

use xtool_core::processing::{InspectOptions, inspect};

pub fn run_inspect(args: &InspectArgs) -> CliResult<bool> {
    let options = InspectOptions::new(args.location, args.swap);

    let mut session = build_session(0)?;
    let outcome = inspect(&mut session, options, &args.files)?;
    Ok(outcome.is_success())
}
