// ============================================================================
// xtool-core/src/error.rs
// ============================================================================
//
// ERROR HANDLING: Error Types for the xtool Core Library
//
// A single error enum covers configuration, backup policy, external tool
// and filesystem failures. Variants carry the offending path or tool name so
// that messages shown to the user can stand on their own.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Errors produced by the xtool core library.
#[derive(Error, Debug)]
pub enum CoreError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("failed to read xtoolconfig file '{}': {source}", path.display())]
    ConfigRead { path: PathBuf, source: io::Error },

    #[error("failed to parse '{}' as JSON: {source}", path.display())]
    ConfigParse {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("{key} was not specified in config and {binary} is missing from $PATH")]
    BinaryNotFound { key: String, binary: String },

    #[error("bad path to {tool} binary '{}': {source}", path.display())]
    BadBinaryPath {
        tool: String,
        path: PathBuf,
        source: io::Error,
    },

    #[error("{tool} at '{}' is not executable", path.display())]
    NotExecutable { tool: String, path: PathBuf },

    #[error("could not determine the user's home directory")]
    HomeDirUnavailable,

    #[error("failed to read '{}': {source}", path.display())]
    BackupsConfigRead { path: PathBuf, source: io::Error },

    #[error("failed to parse '{}' as JSON: {source}", path.display())]
    BackupsConfigParse {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("{0}")]
    InvalidBackupsConfig(String),

    #[error("failed to find a backups config for '{}' in {limit} iterations", path.display())]
    BackupsSearchExhausted { path: PathBuf, limit: usize },

    #[error("failed to get backups config: {0}")]
    BackupPolicy(#[source] Box<CoreError>),

    #[error("failed to prepare backups folder '{}': {source}", path.display())]
    PrepareBackupsDir { path: PathBuf, source: io::Error },

    #[error("failed to move backup file '{}' to the backups folder: {source}", from.display())]
    MoveBackup {
        from: PathBuf,
        to: PathBuf,
        source: io::Error,
    },

    #[error("failed to run {tool}: {source}")]
    ToolLaunch { tool: String, source: io::Error },

    #[error("{tool} error: {message}")]
    ToolFailed { tool: String, message: String },

    #[error("unexpected {tool} output: {message}")]
    ToolOutput { tool: String, message: String },

    #[error("failed to create exiftool XMP config file: {0}")]
    ExiftoolConfig(io::Error),

    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("{0}")]
    OperationFailed(String),
}

/// Result alias used throughout the core library.
pub type CoreResult<T> = Result<T, CoreError>;

impl CoreError {
    /// Whether this error should stop the whole invocation rather than be
    /// recorded against a single file.
    pub fn is_fatal(&self) -> bool {
        matches!(self, CoreError::ToolLaunch { .. })
    }
}
