//! Implementation of the `stagehand plan` command.
//!
//! Shows what staging the current build tree would copy and overwrite,
//! without running the toolchain.

use anyhow::{Context, Result};

use stagehand_lib::{StageConfig, plan_stage};

use crate::output::{OutputFormat, format_bytes, print_copy, print_info, print_json, print_overwrite, print_stat};

pub fn cmd_plan(config: &StageConfig, output: OutputFormat) -> Result<()> {
  let plan = plan_stage(config).context("Failed to plan staging")?;

  if output.is_json() {
    return print_json(&plan);
  }

  print_info(&format!("Staging into {}", plan.output_dir.display()));
  print_copy(
    &plan.executable.source.display().to_string(),
    &plan.executable.destination.display().to_string(),
  );
  print_copy(
    &plan.resources.source.display().to_string(),
    &plan.resources.destination.display().to_string(),
  );
  println!();
  print_stat("Files", &plan.files.to_string());
  print_stat("Size", &format_bytes(plan.bytes));
  print_stat("Overwrites", &plan.overwrites.len().to_string());

  for path in &plan.overwrites {
    print_overwrite(&path.display().to_string());
  }

  Ok(())
}
