//! Purge and postpublish command integration tests.

use predicates::prelude::*;

use super::common::TestEnv;

fn publish(env: &TestEnv, mod_id: &str) {
  env.ttpg_cmd().arg("build").assert().success();
  env.write_file(
    "host/my-mod/Manifest.json",
    &format!(
      r#"{{"Name":"My Mod","Version":"1.0.0","GUID":"ABC123","ModID":{}}}"#,
      mod_id
    ),
  );
}

#[test]
fn purge_yes_captures_mod_id() {
  let env = TestEnv::configured();
  publish(&env, "12345");

  env
    .ttpg_cmd()
    .args(["purge", "-y"])
    .assert()
    .success()
    .stdout(predicate::str::contains("ModID: 12345"));

  assert!(!env.production_path().exists());
  assert_eq!(env.project_config()["modId"], 12345);
}

#[test]
fn purge_then_build_writes_mod_id_into_manifest() {
  let env = TestEnv::configured();
  publish(&env, "\"678\"");
  env.ttpg_cmd().args(["purge", "--yes"]).assert().success();

  env.ttpg_cmd().arg("build").assert().success();

  let manifest = env.read_json(&env.production_path().join("Manifest.json"));
  assert_eq!(manifest["ModID"], 678);
}

#[test]
fn purge_without_build_only_warns() {
  let env = TestEnv::configured();

  env
    .ttpg_cmd()
    .args(["purge", "-y"])
    .assert()
    .success()
    .stderr(predicate::str::contains("no production build"));
}

#[test]
fn purge_refuses_to_prompt_without_terminal() {
  let env = TestEnv::configured();
  env.ttpg_cmd().arg("build").assert().success();

  env
    .ttpg_cmd()
    .arg("purge")
    .assert()
    .failure()
    .stderr(predicate::str::contains("--yes"));

  assert!(env.production_path().is_dir());
}

#[test]
fn postpublish_keeps_the_build() {
  let env = TestEnv::configured();
  publish(&env, "4242");

  env
    .ttpg_cmd()
    .arg("postpublish")
    .assert()
    .success()
    .stdout(predicate::str::contains("Saved ModID 4242"));

  assert!(env.production_path().join("Manifest.json").is_file());
  assert_eq!(env.project_config()["modId"], 4242);
}
