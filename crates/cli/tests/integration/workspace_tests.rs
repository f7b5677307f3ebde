//! Setup, status, clean and reset integration tests.

use std::fs;

use predicates::prelude::*;

use super::common::TestEnv;

#[test]
fn setup_reads_answers_from_stdin() {
  let env = TestEnv::unconfigured();
  let answers = format!("{}\nSpace Battle\n\n\n\n\njavascript\n", env.host_path().display());

  env
    .ttpg_cmd()
    .arg("setup")
    .write_stdin(answers)
    .assert()
    .success()
    .stdout(predicate::str::contains("Setup complete"));

  let project = env.project_config();
  assert_eq!(project["slug"], "space-battle");
  assert_eq!(project["version"], "0.0.1");
  assert_eq!(project["transpile"], false);
  assert_ne!(project["guid"]["dev"], project["guid"]["prd"]);
}

#[test]
fn no_command_runs_setup() {
  let env = TestEnv::configured();

  env
    .ttpg_cmd()
    .assert()
    .success()
    .stdout(predicate::str::contains("Project config found"));
}

#[test]
fn legacy_project_config_is_migrated() {
  let env = TestEnv::configured();
  env.write_file(
    "project/ttpgcfg.project.json",
    r#"{"name":"Old","slug":"my-mod","template":"javascript","guid":{"dev":"D","prd":"P"}}"#,
  );

  env.ttpg_cmd().arg("status").assert().success();

  let project = env.project_config();
  assert_eq!(project["transpile"], false);
  assert_eq!(project["version"], "0.0.1");
  assert!(project.get("template").is_none());
}

#[test]
fn status_prints_config_and_state() {
  let env = TestEnv::configured();

  env
    .ttpg_cmd()
    .arg("status")
    .assert()
    .success()
    .stdout(predicate::str::contains("My Mod v1.0.0"))
    .stdout(predicate::str::contains("ABC123"))
    .stdout(predicate::str::contains("unlinked"))
    .stdout(predicate::str::contains("run 'ttpg dev' or 'ttpg build'"));
}

#[test]
fn status_after_build_drops_the_next_step_hint() {
  let env = TestEnv::configured();
  env.ttpg_cmd().arg("build").assert().success();

  env
    .ttpg_cmd()
    .arg("status")
    .assert()
    .success()
    .stdout(predicate::str::contains("production-built"))
    .stdout(predicate::str::contains("run 'ttpg dev'").not());
}

#[test]
fn clean_removes_dev_and_build_only() {
  let env = TestEnv::configured();
  env.ttpg_cmd().arg("dev").assert().success();
  env.write_file("project/build/main.js", "stale");

  env.ttpg_cmd().arg("clean").assert().success();

  let project = env.project_path();
  assert!(!project.join("dev").exists());
  assert!(!project.join("build").exists());
  assert!(fs::symlink_metadata(env.host_path().join("my-mod_dev")).is_err());
  assert!(project.join("assets/Fonts/fonts.txt").is_file());
  assert!(project.join("ttpgcfg.local.json").is_file());
  assert!(project.join("ttpgcfg.project.json").is_file());
}

#[test]
fn reset_points_workspace_at_new_host() {
  let env = TestEnv::configured();
  env.ttpg_cmd().arg("dev").assert().success();
  let new_host = env.temp.path().join("other-host");

  env
    .ttpg_cmd()
    .arg("reset")
    .write_stdin(format!("{}\n", new_host.display()))
    .assert()
    .success();

  let local = env.read_json(&env.project_path().join("ttpgcfg.local.json"));
  assert_eq!(local["ttpg_path"], new_host.display().to_string());
  assert!(!env.project_path().join("dev").exists());
  assert!(fs::symlink_metadata(env.host_path().join("my-mod_dev")).is_err());
}
