//! Default layout of a staged build.
//!
//! These reproduce the fixed paths the pipeline has always used; every one of
//! them can be overridden through [`crate::config::StageConfig`].

/// Program used to build the release binary.
pub const DEFAULT_TOOLCHAIN_PROGRAM: &str = "cargo";

/// Arguments passed to [`DEFAULT_TOOLCHAIN_PROGRAM`].
pub const DEFAULT_TOOLCHAIN_ARGS: &[&str] = &["build", "--release"];

/// Resources tree, relative to the working directory. Mirrored under the output directory.
pub const DEFAULT_RESOURCES_DIR: &str = "res";

/// Directory the toolchain writes the release binary to.
pub const DEFAULT_EXECUTABLE_DIR: &str = "target/release";

/// File stem of the release binary; the platform suffix is appended at runtime.
pub const DEFAULT_EXECUTABLE_STEM: &str = "raytracer_wgpu";

/// Where staged artifacts end up.
pub const DEFAULT_OUTPUT_DIR: &str = "build";

/// Exit code for fatal errors (missing toolchain, missing artifacts, I/O).
pub const FATAL_EXIT_CODE: u8 = 2;

/// Exit code for a failed build whose toolchain did not report one (killed by a signal).
pub const SIGNAL_EXIT_CODE: i32 = 1;
