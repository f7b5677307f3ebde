//! Build and libpack command integration tests.

use std::fs;

use predicates::prelude::*;
use serde_json::json;

use super::common::TestEnv;

#[test]
fn build_writes_production_package() {
  let env = TestEnv::configured();

  env
    .ttpg_cmd()
    .arg("build")
    .assert()
    .success()
    .stdout(predicate::str::contains("Production build written"));

  let output = env.production_path();
  assert_eq!(
    env.read_json(&output.join("Manifest.json")),
    json!({ "Name": "My Mod", "Version": "1.0.0", "GUID": "ABC123" })
  );
  assert!(output.join("Scripts/main.js").is_file());
  assert!(output.join("Scripts/node_modules/left-pad/index.js").is_file());
  assert!(output.join("Sounds/sounds.txt").is_file());
  assert!(!env.project_path().join("build").exists());
}

#[test]
fn second_build_is_refused() {
  let env = TestEnv::configured();
  env.ttpg_cmd().arg("build").assert().success();
  let manifest = fs::read(env.production_path().join("Manifest.json")).unwrap();

  env
    .ttpg_cmd()
    .arg("build")
    .assert()
    .failure()
    .stderr(predicate::str::contains("already exists"));

  assert_eq!(fs::read(env.production_path().join("Manifest.json")).unwrap(), manifest);
}

#[test]
fn failing_transpiler_fails_the_build() {
  let env = TestEnv::configured();
  env.write_tool("tsc", "#!/bin/sh\necho 'error TS2304' >&2\nexit 2\n");

  env
    .ttpg_cmd()
    .arg("build")
    .assert()
    .failure()
    .stderr(predicate::str::contains("tsc exited with status 2"));

  assert!(env.production_path().is_dir());
  assert!(!env.production_path().join("Manifest.json").exists());
}

#[test]
fn libpack_bundles_referenced_scripts() {
  let env = TestEnv::configured();

  env
    .ttpg_cmd()
    .arg("libpack")
    .assert()
    .success()
    .stdout(predicate::str::contains("Bundled scripts: 1"));

  let scripts = env.production_path().join("Scripts");
  assert!(scripts.join("main.js").is_file());
  assert!(!scripts.join("node_modules").exists());
  let project = env.project_path();
  assert!(!project.join("build").exists());
  assert!(!project.join("lib").exists());
  assert!(!project.join("rollup.config.js").exists());
}

#[test]
fn relative_host_path_follows_project_not_working_directory() {
  let env = TestEnv::configured();
  env.write_file("project/ttpgcfg.local.json", r#"{ "ttpg_path": "../host" }"#);
  let elsewhere = env.temp.path().join("elsewhere/deeper");
  fs::create_dir_all(&elsewhere).unwrap();

  env
    .ttpg_cmd()
    .current_dir(&elsewhere)
    .arg("--project")
    .arg(env.project_path())
    .arg("build")
    .assert()
    .success();

  assert!(env.production_path().join("Manifest.json").is_file());
  assert!(!env.temp.path().join("elsewhere/host").exists());
}
