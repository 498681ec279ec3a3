//! Outcome, report and plan types for a build-and-stage run.

use std::fmt;
use std::path::PathBuf;

use serde::Serialize;

use crate::consts::SIGNAL_EXIT_CODE;
use crate::stage::copy::CopyStats;
use crate::util::hash::ContentHash;

/// Lifecycle of a single run: `Idle → Building → {Staged | Failed}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BuildState {
  Idle,
  Building,
  Staged,
  Failed,
}

impl BuildState {
  pub fn is_terminal(self) -> bool {
    matches!(self, BuildState::Staged | BuildState::Failed)
  }
}

impl fmt::Display for BuildState {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let s = match self {
      BuildState::Idle => "idle",
      BuildState::Building => "building",
      BuildState::Staged => "staged",
      BuildState::Failed => "failed",
    };
    f.write_str(s)
  }
}

/// The toolchain ran and exited unsuccessfully.
#[derive(Debug, Clone, Serialize)]
pub struct BuildFailure {
  /// The toolchain command line, for the failure notice.
  pub command: String,
  /// Exit code, `None` if killed by a signal.
  pub code: Option<i32>,
  pub build_duration_ms: u64,
  /// Captured stderr, if output was captured.
  #[serde(skip_serializing_if = "String::is_empty")]
  pub stderr: String,
}

/// What a successful run staged.
#[derive(Debug, Clone, Serialize)]
pub struct StageReport {
  pub output_dir: PathBuf,
  pub executable: PathBuf,
  pub resources: PathBuf,
  #[serde(flatten)]
  pub stats: CopyStats,
  pub executable_hash: ContentHash,
  pub resources_hash: ContentHash,
  pub build_duration_ms: u64,
}

/// Result of [`crate::stage::run_build`].
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum BuildOutcome {
  Staged(StageReport),
  Failed(BuildFailure),
}

impl BuildOutcome {
  pub fn state(&self) -> BuildState {
    match self {
      BuildOutcome::Staged(_) => BuildState::Staged,
      BuildOutcome::Failed(_) => BuildState::Failed,
    }
  }

  pub fn is_staged(&self) -> bool {
    matches!(self, BuildOutcome::Staged(_))
  }

  /// Process exit code for this outcome.
  ///
  /// `0` when staged; otherwise the toolchain's own code, or
  /// [`SIGNAL_EXIT_CODE`] if it had none.
  pub fn exit_code(&self) -> i32 {
    match self {
      BuildOutcome::Staged(_) => 0,
      BuildOutcome::Failed(failure) => match failure.code {
        Some(code) if code != 0 => code,
        _ => SIGNAL_EXIT_CODE,
      },
    }
  }
}

/// One artifact's move from build tree to output directory.
#[derive(Debug, Clone, Serialize)]
pub struct PlannedCopy {
  pub source: PathBuf,
  pub destination: PathBuf,
}

/// What staging would do, computed without running the toolchain or writing anything.
#[derive(Debug, Clone, Serialize)]
pub struct StagePlan {
  pub output_dir: PathBuf,
  pub executable: PlannedCopy,
  pub resources: PlannedCopy,
  /// Files that would be written, the executable included.
  pub files: usize,
  pub bytes: u64,
  /// Destination files that already exist and would be overwritten.
  pub overwrites: Vec<PathBuf>,
}
