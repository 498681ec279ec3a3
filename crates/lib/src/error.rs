//! Error types for building and staging.

use std::fmt;
use std::io;
use std::path::PathBuf;

use serde::Serialize;
use thiserror::Error;

use crate::config::ConfigError;

/// The two artifacts a successful build must leave behind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ArtifactKind {
  /// The compiled binary, expected to be a regular file.
  Executable,
  /// The resources tree, expected to be a directory.
  Resources,
}

impl fmt::Display for ArtifactKind {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      ArtifactKind::Executable => write!(f, "executable"),
      ArtifactKind::Resources => write!(f, "resources directory"),
    }
  }
}

/// Errors that abort a build-and-stage run.
///
/// A toolchain that runs and exits non-zero is not an error; it is reported
/// through [`crate::stage::BuildOutcome::Failed`].
#[derive(Debug, Error)]
pub enum StageError {
  /// The configuration could not be loaded or is inconsistent.
  #[error("invalid configuration")]
  InvalidConfig(#[from] ConfigError),

  /// The toolchain program could not be found or started.
  #[error("toolchain '{program}' could not be started")]
  ToolchainNotFound {
    program: String,
    #[source]
    source: io::Error,
  },

  /// The toolchain started but waiting on it failed.
  #[error("failed to wait for toolchain '{program}'")]
  ToolchainWait {
    program: String,
    #[source]
    source: io::Error,
  },

  /// The toolchain reported success but an artifact is not where it should be.
  #[error("build reported success but the {kind} is missing: {}", path.display())]
  ArtifactMissing { kind: ArtifactKind, path: PathBuf },

  /// Creating or copying into the output directory failed.
  #[error("staging failed at {}", path.display())]
  StagingIo {
    path: PathBuf,
    #[source]
    source: io::Error,
  },
}

impl StageError {
  pub(crate) fn staging_io(path: impl Into<PathBuf>, source: io::Error) -> Self {
    StageError::StagingIo {
      path: path.into(),
      source,
    }
  }
}
