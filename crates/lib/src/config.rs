//! Stage configuration.
//!
//! [`StageConfig`] names every path the pipeline touches. The defaults
//! reproduce the historical fixed layout; a JSON file can override any field.

use std::fs;
use std::io;
use std::path::{Component, Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::consts::{
  DEFAULT_EXECUTABLE_DIR, DEFAULT_EXECUTABLE_STEM, DEFAULT_OUTPUT_DIR, DEFAULT_RESOURCES_DIR, DEFAULT_TOOLCHAIN_ARGS,
  DEFAULT_TOOLCHAIN_PROGRAM,
};

#[derive(Debug, Error)]
pub enum ConfigError {
  #[error("failed to read config file {}", path.display())]
  Read {
    path: PathBuf,
    #[source]
    source: io::Error,
  },

  #[error("failed to parse config file {}", path.display())]
  Parse {
    path: PathBuf,
    #[source]
    source: serde_json::Error,
  },

  #[error("{0}")]
  Invalid(String),
}

/// The external command that produces the executable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolchainCommand {
  pub program: String,
  #[serde(default)]
  pub args: Vec<String>,
}

impl ToolchainCommand {
  pub fn new(program: impl Into<String>, args: impl IntoIterator<Item = impl Into<String>>) -> Self {
    Self {
      program: program.into(),
      args: args.into_iter().map(Into::into).collect(),
    }
  }

  /// Program and arguments joined with spaces, for display only.
  pub fn display(&self) -> String {
    std::iter::once(self.program.as_str())
      .chain(self.args.iter().map(String::as_str))
      .collect::<Vec<_>>()
      .join(" ")
  }
}

impl Default for ToolchainCommand {
  fn default() -> Self {
    Self::new(DEFAULT_TOOLCHAIN_PROGRAM, DEFAULT_TOOLCHAIN_ARGS.iter().copied())
  }
}

/// Everything a build-and-stage run needs to know.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StageConfig {
  /// Command that builds the executable.
  pub toolchain: ToolchainCommand,

  /// Resources tree. Must be relative; it is mirrored under `output_dir`.
  pub resources_dir: PathBuf,

  /// Path of the executable the toolchain produces.
  pub executable: PathBuf,

  /// Destination root for staged artifacts.
  pub output_dir: PathBuf,

  /// Capture toolchain stdout/stderr instead of streaming it to the terminal.
  pub capture_output: bool,

  /// Directory the toolchain runs in and relative paths resolve against.
  /// Set at runtime, never read from a config file.
  #[serde(skip)]
  pub working_dir: PathBuf,
}

impl Default for StageConfig {
  fn default() -> Self {
    Self {
      toolchain: ToolchainCommand::default(),
      resources_dir: PathBuf::from(DEFAULT_RESOURCES_DIR),
      executable: default_executable(),
      output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
      capture_output: false,
      working_dir: PathBuf::from("."),
    }
  }
}

/// Default executable path, with the platform's executable suffix.
pub fn default_executable() -> PathBuf {
  Path::new(DEFAULT_EXECUTABLE_DIR).join(format!("{}{}", DEFAULT_EXECUTABLE_STEM, std::env::consts::EXE_SUFFIX))
}

impl StageConfig {
  /// Load a config file. Fields missing from the file keep their defaults.
  pub fn load(path: &Path) -> Result<Self, ConfigError> {
    let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
      path: path.to_path_buf(),
      source,
    })?;
    let config: StageConfig = serde_json::from_str(&content).map_err(|source| ConfigError::Parse {
      path: path.to_path_buf(),
      source,
    })?;
    debug!(path = %path.display(), "loaded stage config");
    Ok(config)
  }

  pub fn with_working_dir(mut self, dir: impl Into<PathBuf>) -> Self {
    self.working_dir = dir.into();
    self
  }

  /// Check the invariants the orchestrator relies on.
  pub fn validate(&self) -> Result<(), ConfigError> {
    if self.toolchain.program.trim().is_empty() {
      return Err(ConfigError::Invalid("toolchain program is empty".to_string()));
    }

    if self.resources_dir.as_os_str().is_empty() {
      return Err(ConfigError::Invalid("resources_dir is empty".to_string()));
    }
    if !is_plain_relative(&self.resources_dir) {
      return Err(ConfigError::Invalid(format!(
        "resources_dir must be a relative path without '..': {}",
        self.resources_dir.display()
      )));
    }

    if self.executable.file_name().is_none() {
      return Err(ConfigError::Invalid(format!(
        "executable has no file name: {}",
        self.executable.display()
      )));
    }

    if self.output_dir.as_os_str().is_empty() {
      return Err(ConfigError::Invalid("output_dir is empty".to_string()));
    }

    if !self.working_dir.is_dir() {
      return Err(ConfigError::Invalid(format!(
        "working directory does not exist: {}",
        self.working_dir.display()
      )));
    }

    self.validate_layout()
  }

  /// Staged artifacts must never land on, or inside, their own sources.
  fn validate_layout(&self) -> Result<(), ConfigError> {
    let base = dunce::canonicalize(&self.working_dir).unwrap_or_else(|_| self.working_dir.clone());
    let resolve = |path: &Path| normalize(&base.join(path));

    let resources = resolve(&self.resources_dir);
    let staged_resources = normalize(&resolve(&self.output_dir).join(&self.resources_dir));
    if staged_resources.starts_with(&resources) || resources.starts_with(&staged_resources) {
      return Err(ConfigError::Invalid(format!(
        "output_dir {} overlaps resources_dir {}",
        self.output_dir.display(),
        self.resources_dir.display()
      )));
    }

    let output = resolve(&self.output_dir);
    if output.starts_with(&resources) {
      return Err(ConfigError::Invalid(format!(
        "output_dir {} is inside resources_dir {}",
        self.output_dir.display(),
        self.resources_dir.display()
      )));
    }

    let executable = resolve(&self.executable);
    if self.executable.file_name().map(|name| output.join(name)) == Some(executable) {
      return Err(ConfigError::Invalid(format!(
        "output_dir {} would stage the executable onto itself",
        self.output_dir.display()
      )));
    }

    Ok(())
  }

  fn resolve(&self, path: &Path) -> PathBuf {
    if path.is_absolute() {
      path.to_path_buf()
    } else {
      self.working_dir.join(path)
    }
  }

  /// Resources tree as produced by the build.
  pub fn resources_path(&self) -> PathBuf {
    self.resolve(&self.resources_dir)
  }

  /// Executable as produced by the build.
  pub fn executable_path(&self) -> PathBuf {
    self.resolve(&self.executable)
  }

  pub fn output_path(&self) -> PathBuf {
    self.resolve(&self.output_dir)
  }

  /// Where the resources tree lands: `<output>/<resources_dir>`.
  pub fn staged_resources_path(&self) -> PathBuf {
    self.output_path().join(&self.resources_dir)
  }

  /// Where the executable lands: `<output>/<executable file name>`.
  ///
  /// Falls back to the output root when the executable has no file name;
  /// [`StageConfig::validate`] rejects that case before any staging.
  pub fn staged_executable_path(&self) -> PathBuf {
    let output = self.output_path();
    match self.executable.file_name() {
      Some(name) => output.join(name),
      None => output,
    }
  }
}

/// Lexically fold `.` and `..` out of `path`.
fn normalize(path: &Path) -> PathBuf {
  let mut out = PathBuf::new();
  for component in path.components() {
    match component {
      Component::CurDir => {}
      Component::ParentDir => {
        if !out.pop() {
          out.push(component);
        }
      }
      other => out.push(other),
    }
  }
  out
}

/// Relative, and never steps outside its base.
fn is_plain_relative(path: &Path) -> bool {
  path
    .components()
    .all(|c| matches!(c, Component::Normal(_) | Component::CurDir))
}
