//! Dry-run staging plan.

use std::io;

use walkdir::WalkDir;

use crate::config::StageConfig;
use crate::error::StageError;
use crate::stage::artifacts::ArtifactSet;
use crate::stage::types::{PlannedCopy, StagePlan};

/// Describe what staging the current build tree would do.
///
/// Never invokes the toolchain and never writes. Artifacts must already be
/// present, e.g. from an earlier build.
pub fn plan_stage(config: &StageConfig) -> Result<StagePlan, StageError> {
  config.validate()?;

  let artifacts = ArtifactSet::from_config(config);
  artifacts.verify()?;

  let staged_resources = config.staged_resources_path();
  let staged_executable = config.staged_executable_path();

  let mut files = 0usize;
  let mut bytes = 0u64;
  let mut overwrites = Vec::new();

  for entry in WalkDir::new(&artifacts.resources).follow_links(true).sort_by_file_name() {
    let entry = entry.map_err(|e| {
      let path = e.path().unwrap_or(&artifacts.resources).to_path_buf();
      StageError::staging_io(path, io::Error::from(e))
    })?;
    if !entry.file_type().is_file() {
      continue;
    }
    let Ok(rel) = entry.path().strip_prefix(&artifacts.resources) else {
      continue;
    };

    let destination = staged_resources.join(rel);
    if destination.is_file() {
      overwrites.push(destination);
    }
    files += 1;
    bytes += entry
      .metadata()
      .map_err(|e| StageError::staging_io(entry.path(), io::Error::from(e)))?
      .len();
  }

  let executable_len = artifacts
    .executable
    .metadata()
    .map_err(|e| StageError::staging_io(&artifacts.executable, e))?
    .len();
  if staged_executable.is_file() {
    overwrites.push(staged_executable.clone());
  }
  files += 1;
  bytes += executable_len;

  Ok(StagePlan {
    output_dir: config.output_path(),
    executable: PlannedCopy {
      source: artifacts.executable,
      destination: staged_executable,
    },
    resources: PlannedCopy {
      source: artifacts.resources,
      destination: staged_resources,
    },
    files,
    bytes,
    overwrites,
  })
}
