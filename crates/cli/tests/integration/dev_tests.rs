//! Dev command integration tests.

use std::fs;

use serde_json::json;

use super::common::{CATEGORIES, TestEnv};

#[test]
fn dev_links_project_into_host() {
  let env = TestEnv::configured();

  env.ttpg_cmd().arg("dev").assert().success();

  let host_link = env.host_path().join("my-mod_dev");
  let staging = env.project_path().join("dev").join("my-mod_dev");
  assert_eq!(fs::read_link(&host_link).unwrap(), staging);
  assert!(host_link.join("Textures/textures.txt").is_file());
  assert_eq!(
    env.read_json(&staging.join("Manifest.json")),
    json!({ "Name": "My Mod (Dev)", "Version": "1.0.0", "GUID": "DEV999" })
  );
  assert!(staging.join("Scripts/main.js").is_file());
  assert!(staging.join("Scripts/node_modules/left-pad").is_dir());
}

#[test]
fn dev_twice_keeps_exactly_seven_links() {
  let env = TestEnv::configured();

  env.ttpg_cmd().arg("dev").assert().success();
  env.ttpg_cmd().arg("dev").assert().success();

  let staging = env.project_path().join("dev").join("my-mod_dev");
  let mut links: Vec<String> = fs::read_dir(&staging)
    .unwrap()
    .map(|entry| entry.unwrap())
    .filter(|entry| entry.file_type().unwrap().is_symlink())
    .map(|entry| entry.file_name().into_string().unwrap())
    .collect();
  links.sort();
  assert_eq!(links, CATEGORIES.to_vec());
  assert_eq!(fs::read_dir(env.project_path().join("dev")).unwrap().count(), 1);
}

#[test]
fn dev_and_build_coexist() {
  let env = TestEnv::configured();

  env.ttpg_cmd().arg("dev").assert().success();
  env.ttpg_cmd().arg("build").assert().success();

  let output = env
    .ttpg_cmd()
    .args(["status", "--format", "json"])
    .output()
    .unwrap();
  let status: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
  assert_eq!(status["state"], json!({ "dev_linked": true, "production_built": true }));
}
