//! stagehand-lib: build a release binary and stage it for deployment.
//!
//! - `config`: where the toolchain, artifacts and output directory live
//! - `toolchain`: blocking child-process invocation
//! - `stage`: artifact checks, merge-copy, and the orchestrator
//! - `util`: content hashing

pub mod config;
pub mod consts;
pub mod error;
pub mod stage;
pub mod toolchain;
pub mod util;

pub use config::{ConfigError, StageConfig, ToolchainCommand};
pub use error::{ArtifactKind, StageError};
pub use stage::{BuildOutcome, BuildState, StagePlan, StageReport, plan_stage, run_build};
