//! Implementation of the 'camswap' subcommand.

use super::{build_session, finish};
use crate::cli::CamswapArgs;
use crate::error::CliResult;

use xtool_core::processing::{CamswapMode, CamswapOptions, camswap};

/// Converts parsed arguments into core options.
pub fn camswap_options(args: &CamswapArgs) -> CamswapOptions {
    let mode = match &args.camera {
        Some(model) if !args.restore => CamswapMode::Swap { model: model.clone() },
        _ => CamswapMode::Restore,
    };
    CamswapOptions {
        mode,
        suffix: args.output.suffix,
        out_dir: args.output.out_dir.clone(),
    }
}

pub fn run_camswap(args: &CamswapArgs) -> CliResult<bool> {
    let mut session = build_session(args.verbose)?;
    let outcome = camswap(&mut session, &camswap_options(args), &args.files)?;
    Ok(finish(&outcome))
}
