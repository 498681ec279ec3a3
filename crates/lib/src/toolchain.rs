//! Toolchain invocation.
//!
//! Runs the configured build command as a blocking child process and returns
//! a structured result. The exit status is never interpreted here; callers
//! decide what a non-zero exit means.

use std::path::Path;
use std::process::{Command, Stdio};
use std::time::{Duration, Instant};

use tracing::{debug, info};

use crate::config::ToolchainCommand;
use crate::error::StageError;

/// What to do with the toolchain's stdout and stderr.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputMode {
  /// Stream straight to this process's terminal.
  #[default]
  Inherit,
  /// Collect into [`ToolchainOutput`].
  Capture,
}

impl OutputMode {
  pub fn from_capture(capture: bool) -> Self {
    if capture {
      OutputMode::Capture
    } else {
      OutputMode::Inherit
    }
  }
}

/// Result of one toolchain run.
#[derive(Debug, Clone)]
pub struct ToolchainOutput {
  /// Exit code, or `None` if the process was terminated by a signal.
  pub code: Option<i32>,
  pub success: bool,
  /// Captured stdout. Empty in [`OutputMode::Inherit`].
  pub stdout: String,
  /// Captured stderr. Empty in [`OutputMode::Inherit`].
  pub stderr: String,
  pub duration: Duration,
}

/// Run the toolchain in `cwd` and wait for it to exit.
///
/// # Errors
///
/// * [`StageError::ToolchainNotFound`] if the program cannot be spawned
/// * [`StageError::ToolchainWait`] if waiting on the child fails
pub fn run_toolchain(toolchain: &ToolchainCommand, cwd: &Path, mode: OutputMode) -> Result<ToolchainOutput, StageError> {
  info!(cmd = %toolchain.display(), cwd = %cwd.display(), "invoking toolchain");

  let mut command = Command::new(&toolchain.program);
  command.args(&toolchain.args).current_dir(cwd).stdin(Stdio::null());

  match mode {
    OutputMode::Inherit => {
      command.stdout(Stdio::inherit()).stderr(Stdio::inherit());
    }
    OutputMode::Capture => {
      command.stdout(Stdio::piped()).stderr(Stdio::piped());
    }
  }

  let start = Instant::now();
  let child = command.spawn().map_err(|source| StageError::ToolchainNotFound {
    program: toolchain.program.clone(),
    source,
  })?;

  let output = child.wait_with_output().map_err(|source| StageError::ToolchainWait {
    program: toolchain.program.clone(),
    source,
  })?;
  let duration = start.elapsed();

  let stdout = String::from_utf8_lossy(&output.stdout).into_owned();
  let stderr = String::from_utf8_lossy(&output.stderr).into_owned();

  if !stderr.is_empty() {
    debug!(stderr = %stderr.trim_end(), "toolchain stderr");
  }
  if !stdout.is_empty() {
    debug!(stdout = %stdout.trim_end(), "toolchain stdout");
  }

  debug!(
    code = ?output.status.code(),
    elapsed_ms = duration.as_millis() as u64,
    "toolchain exited"
  );

  Ok(ToolchainOutput {
    code: output.status.code(),
    success: output.status.success(),
    stdout,
    stderr,
    duration,
  })
}
