//! Test helpers for stagehand-lib.
//!
//! Tests never run a real compiler. A shell script stands in for the
//! toolchain and fabricates whatever artifacts the test needs.

use std::fs;
use std::path::Path;

use crate::config::{StageConfig, ToolchainCommand};

/// A toolchain that runs `script` with `/bin/sh -c`.
#[cfg(unix)]
pub fn shell_toolchain(script: &str) -> ToolchainCommand {
  ToolchainCommand::new("/bin/sh", ["-c", script])
}

#[cfg(windows)]
pub fn shell_toolchain(script: &str) -> ToolchainCommand {
  ToolchainCommand::new("cmd.exe", ["/C", script])
}

/// Config rooted at `dir` with a small, test-friendly layout:
/// resources in `res`, executable at `target/release/app`, output in `build`.
pub fn test_config(dir: &Path, script: &str) -> StageConfig {
  StageConfig {
    toolchain: shell_toolchain(script),
    executable: "target/release/app".into(),
    capture_output: true,
    ..Default::default()
  }
  .with_working_dir(dir)
}

/// Write a file, creating its parent directories.
pub fn write_file(path: &Path, content: &str) {
  if let Some(parent) = path.parent() {
    fs::create_dir_all(parent).unwrap();
  }
  fs::write(path, content).unwrap();
}

/// Populate `dir` with a prebuilt executable and a small resources tree.
pub fn seed_artifacts(dir: &Path) {
  write_file(&dir.join("target/release/app"), "#!binary v1");
  write_file(&dir.join("res/shaders/trace.wgsl"), "fn main() {}");
  write_file(&dir.join("res/scenes/cornell.json"), "{\"objects\": []}");
}
