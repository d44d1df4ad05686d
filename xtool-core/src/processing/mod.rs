//! Per-operation argument construction and batch processing.
//!
//! Every operation follows the same shape: build an argument list from the
//! options and config, run the tool once per file in input order, record
//! each file as a success or a failure, and for in-place exiftool edits move
//! the `_original` backup according to the backup policy. The shared loop
//! lives in [`session`]; the other submodules hold the operation-specific
//! argument builders.

/// Per-invocation context and the shared per-file loop
pub mod session;

/// Camera model swap and restore
pub mod camswap;

/// GPS metadata removal
pub mod rmloc;

/// Camera swap and GPS metadata reports
pub mod inspect;

/// Neat Image denoising
pub mod neatimg;

/// Embedded JPEG extraction from Sigma X3F files
pub mod x3fjpg;

pub use camswap::{CamswapMode, CamswapOptions, camswap};
pub use inspect::{InspectOptions, LocationReport, SwapReport, inspect};
pub use neatimg::{NeatImageOptions, neatimg};
pub use rmloc::{RmlocOptions, rmloc};
pub use session::{BatchOutcome, Session, Verbosity};
pub use x3fjpg::{X3fJpgOptions, x3fjpg};
