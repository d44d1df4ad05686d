//! Implementation of the 'x3fjpg' subcommand.

use super::{build_session, finish};
use crate::cli::X3fjpgArgs;
use crate::error::CliResult;

use xtool_core::processing::{X3fJpgOptions, x3fjpg};

pub fn run_x3fjpg(args: &X3fjpgArgs) -> CliResult<bool> {
    let options = X3fJpgOptions {
        out_dir: args.out_dir.clone(),
    };

    let mut session = build_session(args.verbose)?;
    let outcome = x3fjpg(&mut session, &options, &args.files)?;
    Ok(finish(&outcome))
}
