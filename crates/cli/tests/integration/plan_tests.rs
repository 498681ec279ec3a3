use predicates::prelude::*;

use super::common::TestEnv;

fn seeded_env() -> TestEnv {
  let env = TestEnv::with_script("touch toolchain-ran");
  env.write_file("target/release/app", "ELF");
  env.write_file("res/shaders/trace.wgsl", "fn main() {}");
  env
}

#[test]
fn plan_does_not_build_or_write() {
  let env = seeded_env();

  env
    .stagehand_cmd()
    .arg("plan")
    .assert()
    .success()
    .stdout(predicate::str::contains("Files: 2"))
    .stdout(predicate::str::contains("Overwrites: 0"));

  assert!(!env.exists("toolchain-ran"));
  assert!(!env.exists("build"));
}

#[test]
fn plan_lists_overwritten_files() {
  let env = seeded_env();
  env.write_file("build/app", "old");

  env
    .stagehand_cmd()
    .arg("plan")
    .assert()
    .success()
    .stdout(predicate::str::contains("Overwrites: 1"))
    .stdout(predicate::str::contains("build/app"));
}

#[test]
fn plan_json_output() {
  let env = seeded_env();

  let assert = env.stagehand_cmd().args(["plan", "-o", "json"]).assert().success();

  let stdout = String::from_utf8(assert.get_output().stdout.clone()).unwrap();
  let json: serde_json::Value = serde_json::from_str(&stdout).unwrap();
  assert_eq!(json["files"], 2);
  assert_eq!(json["bytes"], 15);
}

#[test]
fn plan_without_artifacts_fails() {
  let env = TestEnv::with_script("true");

  env
    .stagehand_cmd()
    .arg("plan")
    .assert()
    .code(2)
    .stderr(predicate::str::contains("executable is missing"));
}
