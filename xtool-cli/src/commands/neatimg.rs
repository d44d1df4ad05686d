//! Implementation of the 'neatimg' subcommand.

use super::{build_session, finish};
use crate::cli::NeatimgArgs;
use crate::error::CliResult;

use xtool_core::processing::{NeatImageOptions, neatimg};

pub fn run_neatimg(args: &NeatimgArgs) -> CliResult<bool> {
    let options = NeatImageOptions {
        quality: args.quality,
        out_dir: args.out_dir.clone(),
    };

    let mut session = build_session(args.verbose)?;
    let outcome = neatimg(&mut session, &options, &args.files)?;
    Ok(finish(&outcome))
}
