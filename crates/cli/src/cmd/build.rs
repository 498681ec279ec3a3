//! Implementation of the default `stagehand build` command.
//!
//! Runs the toolchain and, when it succeeds, stages the executable and the
//! resources tree into the output directory.

use std::time::Duration;

use anyhow::{Context, Result};

use stagehand_lib::{BuildOutcome, StageConfig, run_build};

use crate::output::{
  OutputFormat, format_bytes, format_duration, print_error, print_info, print_json, print_stat, print_success,
};

/// Execute the build command and return the process exit code.
///
/// Fatal errors (toolchain missing, artifacts missing, I/O) are returned as
/// `Err`. A failed build is not an error: the notice is printed and the
/// toolchain's exit code is returned.
pub fn cmd_build(config: &StageConfig, output: OutputFormat) -> Result<i32> {
  if !output.is_json() {
    print_info(&format!("Building with `{}`", config.toolchain.display()));
  }

  let outcome = run_build(config).context("Build and stage aborted")?;

  if output.is_json() {
    print_json(&outcome)?;
  }

  match &outcome {
    BuildOutcome::Staged(report) => {
      if !output.is_json() {
        println!();
        print_success("Build staged!");
        print_stat("Output", &report.output_dir.display().to_string());
        print_stat("Executable", &report.executable.display().to_string());
        print_stat("Resources", &report.resources.display().to_string());
        print_stat("Files copied", &report.stats.files_copied.to_string());
        print_stat("Size", &format_bytes(report.stats.bytes_copied));
        print_stat("Executable hash", report.executable_hash.short());
        print_stat("Build time", &format_duration(Duration::from_millis(report.build_duration_ms)));
      }
    }
    BuildOutcome::Failed(failure) => {
      let code = failure
        .code
        .map(|c| format!("exit code {}", c))
        .unwrap_or_else(|| "terminated by signal".to_string());
      print_error(&format!("Build failed ({}), nothing staged", code));
      if !failure.stderr.is_empty() && !output.is_json() {
        eprintln!("{}", failure.stderr.trim_end());
      }
    }
  }

  Ok(outcome.exit_code())
}
