//! The artifact pair a successful build leaves behind.

use std::path::PathBuf;

use tracing::debug;

use crate::config::StageConfig;
use crate::error::{ArtifactKind, StageError};

/// Resolved source locations of the executable and the resources tree.
///
/// These are fixed by configuration; nothing is searched for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactSet {
  pub executable: PathBuf,
  pub resources: PathBuf,
}

impl ArtifactSet {
  pub fn from_config(config: &StageConfig) -> Self {
    Self {
      executable: config.executable_path(),
      resources: config.resources_path(),
    }
  }

  /// Check both artifacts are present before anything is copied.
  ///
  /// The executable must be a regular file (or a symlink to one) and the
  /// resources path must be a directory.
  pub fn verify(&self) -> Result<(), StageError> {
    if !self.executable.is_file() {
      return Err(StageError::ArtifactMissing {
        kind: ArtifactKind::Executable,
        path: self.executable.clone(),
      });
    }

    if !self.resources.is_dir() {
      return Err(StageError::ArtifactMissing {
        kind: ArtifactKind::Resources,
        path: self.resources.clone(),
      });
    }

    debug!(
      executable = %self.executable.display(),
      resources = %self.resources.display(),
      "artifacts present"
    );
    Ok(())
  }
}
