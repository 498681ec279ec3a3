//! Recursive merge-copy.
//!
//! Destinations are merged into, never cleared: existing files with the same
//! relative path are overwritten and everything else is left alone.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::{debug, warn};
use walkdir::WalkDir;

use crate::error::StageError;

/// Counters for a copy operation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CopyStats {
  pub files_copied: usize,
  pub dirs_created: usize,
  pub bytes_copied: u64,
}

impl CopyStats {
  pub fn merge(&mut self, other: CopyStats) {
    self.files_copied += other.files_copied;
    self.dirs_created += other.dirs_created;
    self.bytes_copied += other.bytes_copied;
  }
}

/// Copy the tree rooted at `src` into `dst`.
///
/// `dst` and any missing parents are created. Symlinks are followed and
/// their targets' contents copied. Special files are skipped. A `dst` at or
/// below `src` is rejected before anything is created.
pub fn copy_tree(src: &Path, dst: &Path) -> Result<CopyStats, StageError> {
  let mut stats = CopyStats::default();

  if let Ok(src_real) = dunce::canonicalize(src)
    && resolve_existing(dst).starts_with(&src_real)
  {
    return Err(StageError::staging_io(
      dst,
      io::Error::new(io::ErrorKind::InvalidInput, "destination is inside the source tree"),
    ));
  }

  create_dir(dst, &mut stats)?;

  for entry in WalkDir::new(src).follow_links(true).sort_by_file_name() {
    let entry = entry.map_err(|e| {
      let path = e.path().unwrap_or(src).to_path_buf();
      StageError::staging_io(path, io::Error::from(e))
    })?;

    let Ok(rel) = entry.path().strip_prefix(src) else {
      continue;
    };
    if rel.as_os_str().is_empty() {
      continue;
    }

    let target = dst.join(rel);
    let file_type = entry.file_type();

    if file_type.is_dir() {
      create_dir(&target, &mut stats)?;
    } else if file_type.is_file() {
      let bytes = copy_file(entry.path(), &target)?;
      stats.files_copied += 1;
      stats.bytes_copied += bytes;
    } else {
      warn!(path = %entry.path().display(), "skipping special file");
    }
  }

  debug!(
    src = %src.display(),
    dst = %dst.display(),
    files = stats.files_copied,
    bytes = stats.bytes_copied,
    "copied tree"
  );

  Ok(stats)
}

/// Copy the file at `src` into `dir`, keeping its file name.
///
/// `dir` is created if needed. Returns the number of bytes copied.
pub fn copy_file_into(src: &Path, dir: &Path) -> Result<CopyStats, StageError> {
  let mut stats = CopyStats::default();
  let name = src.file_name().ok_or_else(|| {
    StageError::staging_io(
      src,
      io::Error::new(io::ErrorKind::InvalidInput, "source path has no file name"),
    )
  })?;

  create_dir(dir, &mut stats)?;
  stats.bytes_copied = copy_file(src, &dir.join(name))?;
  stats.files_copied = 1;
  Ok(stats)
}

fn create_dir(path: &Path, stats: &mut CopyStats) -> Result<(), StageError> {
  if path.is_dir() {
    return Ok(());
  }
  fs::create_dir_all(path).map_err(|e| StageError::staging_io(path, e))?;
  stats.dirs_created += 1;
  Ok(())
}

/// Canonicalize `path` through its nearest existing ancestor, re-appending
/// the components that do not exist yet.
fn resolve_existing(path: &Path) -> PathBuf {
  let mut missing = Vec::new();
  let mut current = path;
  loop {
    if let Ok(real) = dunce::canonicalize(current) {
      return missing.iter().rev().fold(real, |acc, name| acc.join(name));
    }
    match (current.parent(), current.file_name()) {
      (Some(parent), Some(name)) => {
        missing.push(name.to_os_string());
        current = parent;
      }
      _ => return path.to_path_buf(),
    }
  }
}

/// Overwrites `dst`. Permissions travel with the contents.
fn copy_file(src: &Path, dst: &Path) -> Result<u64, StageError> {
  if dst.is_dir() {
    return Err(StageError::staging_io(
      dst,
      io::Error::new(io::ErrorKind::AlreadyExists, "a directory is in the way of a file"),
    ));
  }
  // fs::copy onto the source itself truncates it to zero bytes
  if let (Ok(src_real), Ok(dst_real)) = (dunce::canonicalize(src), dunce::canonicalize(dst))
    && src_real == dst_real
  {
    return Err(StageError::staging_io(
      dst,
      io::Error::new(io::ErrorKind::InvalidInput, "source and destination are the same file"),
    ));
  }
  fs::copy(src, dst).map_err(|e| StageError::staging_io(dst, e))
}
