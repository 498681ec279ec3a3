//! Build orchestration: compile, then stage.

use tracing::{debug, info, warn};

use crate::config::StageConfig;
use crate::error::StageError;
use crate::stage::artifacts::ArtifactSet;
use crate::stage::copy::{copy_file_into, copy_tree};
use crate::stage::types::{BuildFailure, BuildOutcome, BuildState, StageReport};
use crate::toolchain::{OutputMode, run_toolchain};
use crate::util::hash::{hash_directory, hash_file};

/// Drives one build-and-stage run.
///
/// [`Orchestrator::run`] consumes the orchestrator, so a run enters
/// `Building` exactly once and ends in `Staged`, `Failed`, or an error.
#[derive(Debug)]
pub struct Orchestrator {
  config: StageConfig,
  state: BuildState,
}

impl Orchestrator {
  pub fn new(config: StageConfig) -> Self {
    Self {
      config,
      state: BuildState::Idle,
    }
  }

  pub fn state(&self) -> BuildState {
    self.state
  }

  fn transition(&mut self, next: BuildState) {
    debug!(from = %self.state, to = %next, "build state");
    self.state = next;
  }

  /// Run the toolchain and, if it succeeds, stage its artifacts.
  ///
  /// A non-zero toolchain exit is returned as [`BuildOutcome::Failed`] and
  /// leaves the output directory untouched. Missing artifacts are checked
  /// before anything is copied.
  pub fn run(mut self) -> Result<BuildOutcome, StageError> {
    self.config.validate()?;

    self.transition(BuildState::Building);
    let mode = OutputMode::from_capture(self.config.capture_output);
    let output = run_toolchain(&self.config.toolchain, &self.config.working_dir, mode)?;
    let build_duration_ms = output.duration.as_millis() as u64;

    if !output.success {
      self.transition(BuildState::Failed);
      warn!(
        cmd = %self.config.toolchain.display(),
        code = ?output.code,
        "build failed, nothing staged"
      );
      return Ok(BuildOutcome::Failed(BuildFailure {
        command: self.config.toolchain.display(),
        code: output.code,
        build_duration_ms,
        stderr: output.stderr,
      }));
    }

    let artifacts = ArtifactSet::from_config(&self.config);
    artifacts.verify()?;

    let report = self.stage(&artifacts, build_duration_ms)?;
    self.transition(BuildState::Staged);

    info!(
      output = %report.output_dir.display(),
      files = report.stats.files_copied,
      bytes = report.stats.bytes_copied,
      "staged build"
    );

    Ok(BuildOutcome::Staged(report))
  }

  fn stage(&self, artifacts: &ArtifactSet, build_duration_ms: u64) -> Result<StageReport, StageError> {
    let output_dir = self.config.output_path();
    let staged_resources = self.config.staged_resources_path();
    let staged_executable = self.config.staged_executable_path();

    let mut stats = copy_tree(&artifacts.resources, &staged_resources)?;
    stats.merge(copy_file_into(&artifacts.executable, &output_dir)?);

    let resources_hash =
      hash_directory(&artifacts.resources).map_err(|e| StageError::staging_io(&artifacts.resources, e))?;
    let executable_hash =
      hash_file(&staged_executable).map_err(|e| StageError::staging_io(&staged_executable, e))?;

    Ok(StageReport {
      output_dir: dunce::canonicalize(&output_dir).unwrap_or(output_dir),
      executable: dunce::canonicalize(&staged_executable).unwrap_or(staged_executable),
      resources: dunce::canonicalize(&staged_resources).unwrap_or(staged_resources),
      stats,
      executable_hash,
      resources_hash,
      build_duration_ms,
    })
  }
}

/// Run one build-and-stage sequence with `config`.
pub fn run_build(config: &StageConfig) -> Result<BuildOutcome, StageError> {
  Orchestrator::new(config.clone()).run()
}
