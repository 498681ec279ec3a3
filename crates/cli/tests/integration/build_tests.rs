use predicates::prelude::*;

use super::common::{BUILD_SCRIPT, TestEnv};

#[test]
fn build_stages_artifacts() {
  let env = TestEnv::with_script(BUILD_SCRIPT);

  env
    .stagehand_cmd()
    .arg("build")
    .assert()
    .success()
    .stdout(predicate::str::contains("Build staged!"))
    .stdout(predicate::str::contains("Files copied: 3"));

  assert_eq!(env.read_file("build/app"), "ELF");
  assert_eq!(env.read_file("build/res/shaders/trace.wgsl"), "fn main() {}");
  assert_eq!(env.read_file("build/res/scenes/cornell.json"), "{}");
}

#[test]
fn build_is_the_default_command() {
  let env = TestEnv::with_script(BUILD_SCRIPT);

  env.stagehand_cmd().assert().success();

  assert!(env.exists("build/app"));
}

#[test]
fn failed_build_propagates_exit_code_and_stages_nothing() {
  let env = TestEnv::with_script("echo 'error: could not compile' >&2; exit 101");
  env.write_file("target/release/app", "old binary");
  env.write_file("res/shaders/trace.wgsl", "old shader");

  env
    .stagehand_cmd()
    .assert()
    .code(101)
    .stderr(predicate::str::contains("Build failed"));

  assert!(!env.exists("build"));
}

#[test]
fn missing_toolchain_is_fatal() {
  let env = TestEnv::with_script("true");
  let config = serde_json::json!({ "toolchain": { "program": "stagehand-no-such-toolchain" } });
  std::fs::write(&env.config_path, config.to_string()).unwrap();

  env
    .stagehand_cmd()
    .assert()
    .code(2)
    .stderr(predicate::str::contains("could not be started"));
}

#[test]
fn missing_resources_after_success_is_fatal() {
  let env = TestEnv::with_script("mkdir -p target/release && printf 'ELF' > target/release/app");

  env
    .stagehand_cmd()
    .assert()
    .code(2)
    .stderr(predicate::str::contains("resources directory is missing"));

  assert!(!env.exists("build"));
}

#[test]
fn unrelated_output_files_survive() {
  let env = TestEnv::with_script(BUILD_SCRIPT);
  env.write_file("build/CHANGELOG.md", "v1");
  env.write_file("build/app", "stale");

  env.stagehand_cmd().assert().success();

  assert_eq!(env.read_file("build/CHANGELOG.md"), "v1");
  assert_eq!(env.read_file("build/app"), "ELF");
}

#[test]
fn json_output_reports_staged_outcome() {
  let env = TestEnv::with_script(&format!("echo compiling; {}", BUILD_SCRIPT));

  let assert = env.stagehand_cmd().args(["-o", "json"]).assert().success();

  let stdout = String::from_utf8(assert.get_output().stdout.clone()).unwrap();
  let json: serde_json::Value = serde_json::from_str(&stdout).unwrap();
  assert_eq!(json["status"], "staged");
  assert_eq!(json["files_copied"], 3);
  assert_eq!(json["executable_hash"].as_str().unwrap().len(), 64);
}

#[test]
fn json_output_reports_failure() {
  let env = TestEnv::with_script("exit 4");

  let assert = env.stagehand_cmd().args(["-o", "json"]).assert().code(4);

  let stdout = String::from_utf8(assert.get_output().stdout.clone()).unwrap();
  let json: serde_json::Value = serde_json::from_str(&stdout).unwrap();
  assert_eq!(json["status"], "failed");
  assert_eq!(json["code"], 4);
}

#[test]
fn invalid_config_is_fatal() {
  let env = TestEnv::with_script("true");
  std::fs::write(&env.config_path, r#"{ "resources_dir": "../elsewhere" }"#).unwrap();

  env
    .stagehand_cmd()
    .assert()
    .code(2)
    .stderr(predicate::str::contains("resources_dir must be a relative path"));
}

#[test]
fn unparseable_config_is_fatal() {
  let env = TestEnv::with_script("true");
  std::fs::write(&env.config_path, "{ not json").unwrap();

  env
    .stagehand_cmd()
    .assert()
    .code(2)
    .stderr(predicate::str::contains("Failed to load config"));
}
