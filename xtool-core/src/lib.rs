//! Core library for the xtool photo workflow tool.
//!
//! xtool drives three external programs: exiftool for metadata edits, the
//! Neat Image CLI for denoising and `x3f_extract` for Sigma X3F previews.
//! This crate resolves their configuration, runs them once per file, keeps
//! track of per-file outcomes and moves exiftool's `_original` backups to
//! where the user's backup policy wants them.
//!
//! ## Usage Example
//!
//! ```rust,no_run
//! use xtool_core::backups::BackupPolicyResolver;
//! use xtool_core::external::SystemToolRunner;
//! use xtool_core::processing::{RmlocOptions, Session, Verbosity, rmloc};
//! use std::path::PathBuf;
//!
//! let config = xtool_core::resolve_config().unwrap();
//! let backups = BackupPolicyResolver::from_env().unwrap();
//! let mut session = Session::new(config, SystemToolRunner, backups, Verbosity::Quiet);
//!
//! let files = vec![PathBuf::from("photo.jpg")];
//! let outcome = rmloc(&mut session, &RmlocOptions::default(), &files).unwrap();
//! outcome.print_summary();
//! ```

pub mod backups;
pub mod config;
pub mod error;
pub mod external;
pub mod messages;
pub mod processing;
pub mod terminal;
pub mod utils;

// Re-exports for public API
pub use backups::{BackupPolicy, BackupPolicyResolver};
pub use config::{AppConfig, ConfigResolver, resolve_config};
pub use error::{CoreError, CoreResult};
pub use external::{SystemToolRunner, ToolOutput, ToolRunner};
pub use messages::Operation;
pub use processing::{BatchOutcome, Session, Verbosity};
