mod cmd;
mod output;

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::debug;
use tracing_subscriber::EnvFilter;

use stagehand_lib::StageConfig;
use stagehand_lib::consts::FATAL_EXIT_CODE;

use crate::output::{OutputFormat, print_error};

/// stagehand - build a release binary and stage it with its resources
#[derive(Parser)]
#[command(name = "stagehand")]
#[command(author, version, about, long_about = None)]
struct Cli {
  /// Run as if started in this directory
  #[arg(short = 'C', long, global = true, default_value = ".")]
  directory: PathBuf,

  /// JSON file overriding the default toolchain and artifact paths
  #[arg(short, long, global = true)]
  config: Option<PathBuf>,

  /// Output format
  #[arg(short, long, global = true, value_enum, default_value_t = OutputFormat::Text)]
  output: OutputFormat,

  /// Enable debug logging
  #[arg(short, long, global = true)]
  verbose: bool,

  #[command(subcommand)]
  command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
  /// Build, then stage the executable and resources (default)
  Build,

  /// Show what would be staged, without building
  Plan,
}

fn init_tracing(verbose: bool) {
  let default = if verbose { "stagehand_lib=debug,stagehand=debug" } else { "warn" };
  let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

  tracing_subscriber::fmt()
    .with_env_filter(filter)
    .with_writer(std::io::stderr)
    .without_time()
    .init();
}

fn load_config(cli: &Cli) -> Result<StageConfig> {
  let config = match &cli.config {
    Some(path) => StageConfig::load(path).with_context(|| format!("Failed to load config: {}", path.display()))?,
    None => StageConfig::default(),
  };
  let config = config.with_working_dir(&cli.directory);
  debug!(working_dir = %config.working_dir.display(), toolchain = %config.toolchain.display(), "resolved config");
  Ok(config)
}

fn run(cli: Cli) -> Result<i32> {
  let mut config = load_config(&cli)?;
  // Toolchain output on stdout would corrupt the JSON document.
  if cli.output.is_json() {
    config.capture_output = true;
  }

  match cli.command.unwrap_or(Commands::Build) {
    Commands::Build => cmd::cmd_build(&config, cli.output),
    Commands::Plan => cmd::cmd_plan(&config, cli.output).map(|()| 0),
  }
}

fn main() -> ExitCode {
  let cli = Cli::parse();
  init_tracing(cli.verbose);

  match run(cli) {
    Ok(code) => ExitCode::from(u8::try_from(code).unwrap_or(1)),
    Err(err) => {
      print_error(&format!("{:#}", err));
      ExitCode::from(FATAL_EXIT_CODE)
    }
  }
}
