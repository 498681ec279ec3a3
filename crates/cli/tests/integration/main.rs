//! CLI integration tests. Stand-in toolchains are `/bin/sh` scripts.

#![cfg(unix)]

mod build_tests;
mod common;
mod plan_tests;
