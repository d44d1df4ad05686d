// ============================================================================
// xtool-core/src/processing/session.rs
// ============================================================================
//
// SESSION: Per-Invocation Processing Context
//
// A Session bundles everything one xtool invocation needs while it works
// through its file list: the resolved config, the tool runner, the backup
// policy resolver (and with it the per-directory policy cache), the output
// verbosity and the run start time used to name backup folders.
//
// WORKFLOW (run_batch):
// 1. For each file, in input order:
//    a. Build the tool's argument list
//    b. Run the tool, echoing the command and output as verbosity asks
//    c. For in-place exiftool edits, relocate the `_original` backup
//    d. Record success, or record the error and move on
// 2. A launch failure stops the batch immediately

// ---- Internal crate imports ----
use crate::backups::{BackupPolicyResolver, relocate_backup};
use crate::config::AppConfig;
use crate::error::{CoreError, CoreResult};
use crate::external::{ToolOutput, ToolRunner, format_command, run_tool};
use crate::messages::{Operation, describe_failure};
use crate::terminal;
use crate::utils::exiftool_backup_path;

// ---- External crate imports ----
use chrono::{DateTime, Local};
use indexmap::IndexMap;
use log::debug;

// ---- Standard library imports ----
use std::ffi::OsString;
use std::path::{Path, PathBuf};

// ============================================================================
// VERBOSITY
// ============================================================================

/// How much of each tool run is echoed to the user.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord)]
pub enum Verbosity {
    /// Progress and errors only
    #[default]
    Quiet,
    /// Also print each tool's output (`-v`)
    Output,
    /// Also print each command before running it (`-vv`)
    Commands,
}

impl Verbosity {
    /// Maps a repeated `-v` flag count to a verbosity.
    pub fn from_count(count: u8) -> Self {
        match count {
            0 => Verbosity::Quiet,
            1 => Verbosity::Output,
            _ => Verbosity::Commands,
        }
    }

    pub fn shows_output(self) -> bool {
        self >= Verbosity::Output
    }

    pub fn shows_commands(self) -> bool {
        self >= Verbosity::Commands
    }
}

// ============================================================================
// BATCH OUTCOME
// ============================================================================

/// Per-file results of one batch.
#[derive(Debug)]
pub struct BatchOutcome {
    pub operation: Operation,
    /// Files that were fully processed, in input order
    pub successes: Vec<PathBuf>,
    /// Files that failed, in input order
    pub failures: IndexMap<PathBuf, CoreError>,
}

impl BatchOutcome {
    pub fn new(operation: Operation) -> Self {
        Self {
            operation,
            successes: Vec::new(),
            failures: IndexMap::new(),
        }
    }

    /// True when no file failed.
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }

    pub fn record_success(&mut self, file: &Path) {
        self.successes.push(file.to_path_buf());
    }

    pub fn record_failure(&mut self, file: &Path, error: CoreError) {
        self.failures.insert(file.to_path_buf(), error);
    }

    /// Failures paired with the message to show for each.
    pub fn failure_messages(&self) -> impl Iterator<Item = (&Path, String)> + '_ {
        self.failures
            .iter()
            .map(|(file, error)| (file.as_path(), describe_failure(self.operation, error)))
    }

    /// Prints the summary line and the error list.
    pub fn print_summary(&self) {
        terminal::print_summary(
            self.operation.command_name(),
            self.operation.summary_verb(),
            self.successes.len(),
            self.failure_messages(),
        );
    }
}

// ============================================================================
// SESSION
// ============================================================================

/// Context for one xtool invocation.
#[derive(Debug)]
pub struct Session<R: ToolRunner> {
    config: AppConfig,
    runner: R,
    backups: BackupPolicyResolver,
    verbosity: Verbosity,
    started_at: DateTime<Local>,
}

impl<R: ToolRunner> Session<R> {
    /// Creates a session that starts now.
    pub fn new(config: AppConfig, runner: R, backups: BackupPolicyResolver, verbosity: Verbosity) -> Self {
        Self {
            config,
            runner,
            backups,
            verbosity,
            started_at: Local::now(),
        }
    }

    /// Overrides the run start time used for backup folder names.
    pub fn with_started_at(mut self, started_at: DateTime<Local>) -> Self {
        self.started_at = started_at;
        self
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn runner(&self) -> &R {
        &self.runner
    }

    pub fn backups(&self) -> &BackupPolicyResolver {
        &self.backups
    }

    pub fn verbosity(&self) -> Verbosity {
        self.verbosity
    }

    pub fn started_at(&self) -> &DateTime<Local> {
        &self.started_at
    }

    /// Runs one tool invocation, echoing it as the verbosity asks.
    pub fn run_tool(&self, binary: &Path, args: &[OsString]) -> CoreResult<ToolOutput> {
        if self.verbosity.shows_commands() {
            terminal::print_command(&format_command(binary, args));
        }
        let output = run_tool(&self.runner, binary, args)?;
        if self.verbosity.shows_output() {
            terminal::print_tool_output(&output.combined());
        }
        Ok(output)
    }

    /// Runs `binary` once per file.
    ///
    /// `build_args` produces the full argument list for a file. When
    /// `relocate_backups` is set, a successful run is followed by moving
    /// exiftool's `_original` backup per the backup policy; a failure there
    /// fails the file even though the edit itself took effect.
    ///
    /// Returns `Err` only for a fatal error, which ends the batch.
    pub fn run_batch<F>(
        &mut self,
        operation: Operation,
        binary: &Path,
        files: &[PathBuf],
        relocate_backups: bool,
        mut build_args: F,
    ) -> CoreResult<BatchOutcome>
    where
        F: FnMut(&Path) -> Vec<OsString>,
    {
        let mut outcome = BatchOutcome::new(operation);

        for file in files {
            terminal::print_file_start(file);

            let args = build_args(file);
            let result = self.run_tool(binary, &args).and_then(|_| {
                if relocate_backups {
                    self.relocate_backup(file)
                } else {
                    Ok(())
                }
            });

            match result {
                Ok(()) => outcome.record_success(file),
                Err(e) if e.is_fatal() => return Err(e),
                Err(e) => {
                    terminal::print_file_error(&describe_failure(operation, &e));
                    outcome.record_failure(file, e);
                }
            }
        }

        Ok(outcome)
    }

    fn relocate_backup(&mut self, file: &Path) -> CoreResult<()> {
        let backup = exiftool_backup_path(file);
        if let Some(moved_to) = relocate_backup(&mut self.backups, &backup, file, &self.started_at)? {
            debug!("Backup of {} is now at {}", file.display(), moved_to.display());
        }
        Ok(())
    }
}
