//! Shared test helpers for CLI integration tests.

use std::path::PathBuf;

use assert_cmd::Command;
use assert_cmd::cargo::cargo_bin_cmd;
use tempfile::TempDir;

/// A stand-in toolchain that fabricates the executable and a resources tree.
pub const BUILD_SCRIPT: &str = "mkdir -p target/release res/shaders res/scenes \
                                && printf 'ELF' > target/release/app \
                                && printf 'fn main() {}' > res/shaders/trace.wgsl \
                                && printf '{}' > res/scenes/cornell.json";

/// Isolated project directory.
///
/// Each test gets its own temporary directory acting as the working directory
/// of the build, with a config file pointing the toolchain at `/bin/sh`.
pub struct TestEnv {
  pub temp: TempDir,
  pub config_path: PathBuf,
}

impl TestEnv {
  /// Create a project whose toolchain runs `script`.
  pub fn with_script(script: &str) -> Self {
    let temp = TempDir::new().unwrap();
    let config_path = temp.path().join("stagehand.json");
    let config = serde_json::json!({
      "toolchain": { "program": "/bin/sh", "args": ["-c", script] },
      "executable": "target/release/app",
    });
    std::fs::write(&config_path, serde_json::to_string_pretty(&config).unwrap()).unwrap();
    Self { temp, config_path }
  }

  /// Project directory, canonicalized.
  pub fn root(&self) -> PathBuf {
    dunce::canonicalize(self.temp.path()).unwrap_or_else(|_| self.temp.path().to_path_buf())
  }

  /// Write a file relative to the project directory.
  pub fn write_file(&self, relative_path: &str, content: &str) {
    let path = self.temp.path().join(relative_path);
    if let Some(parent) = path.parent() {
      std::fs::create_dir_all(parent).unwrap();
    }
    std::fs::write(&path, content).unwrap();
  }

  pub fn read_file(&self, relative_path: &str) -> String {
    std::fs::read_to_string(self.temp.path().join(relative_path)).unwrap()
  }

  pub fn exists(&self, relative_path: &str) -> bool {
    self.temp.path().join(relative_path).exists()
  }

  /// A Command for the stagehand binary, pointed at this project.
  pub fn stagehand_cmd(&self) -> Command {
    let mut cmd: Command = cargo_bin_cmd!("stagehand");
    cmd.arg("-C").arg(self.root()).arg("-c").arg(&self.config_path);
    cmd.env_remove("RUST_LOG");
    cmd
  }
}
