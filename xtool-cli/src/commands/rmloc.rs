//! Implementation of the 'rmloc' subcommand.

use super::{build_session, finish};
use crate::cli::RmlocArgs;
use crate::error::CliResult;

use xtool_core::processing::{RmlocOptions, rmloc};

pub fn run_rmloc(args: &RmlocArgs) -> CliResult<bool> {
    let options = RmlocOptions {
        suffix: args.output.suffix,
        out_dir: args.output.out_dir.clone(),
    };

    let mut session = build_session(args.verbose)?;
    let outcome = rmloc(&mut session, &options, &args.files)?;
    Ok(finish(&outcome))
}
