//! Build-and-stage pipeline.
//!
//! Invoke the toolchain, check its exit status, and on success copy the
//! executable and resources tree into the output directory:
//!
//! ```text
//! <output-dir>/
//!   <resources-relative-path>/...
//!   <executable-name>
//! ```

pub mod artifacts;
pub mod copy;
pub mod plan;
pub mod run;
pub mod types;

pub use artifacts::ArtifactSet;
pub use copy::{CopyStats, copy_file_into, copy_tree};
pub use plan::plan_stage;
pub use run::{Orchestrator, run_build};
pub use types::{BuildFailure, BuildOutcome, BuildState, PlannedCopy, StagePlan, StageReport};
