//! Shared test helpers for CLI integration tests.

use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};

use assert_cmd::Command;
use assert_cmd::cargo::cargo_bin_cmd;
use tempfile::TempDir;

pub const CATEGORIES: [&str; 7] = [
  "Fonts",
  "Models",
  "Sounds",
  "States",
  "Templates",
  "Textures",
  "Thumbnails",
];

const TSC: &str = r#"#!/bin/sh
mkdir -p "$2" && printf 'console.log("compiled");\n' > "$2/main.js"
"#;

const YARN: &str = r#"#!/bin/sh
mkdir -p "$3/left-pad" && printf 'module.exports = 1;\n' > "$3/left-pad/index.js"
"#;

const ROLLUP: &str = r#"#!/bin/sh
test -f "$2" && mkdir -p lib && cp build/main.js lib/main.js
"#;

/// Isolated test environment.
///
/// Each test gets its own temporary directory holding the project, a fake
/// TTPG package directory and the fake tools.
pub struct TestEnv {
  pub temp: TempDir,
}

impl TestEnv {
  /// A project with assets and sources but no config documents.
  pub fn unconfigured() -> Self {
    let temp = TempDir::new().unwrap();
    let env = Self { temp };

    for category in CATEGORIES {
      env.write_file(
        &format!("project/assets/{}/{}.txt", category, category.to_lowercase()),
        category,
      );
    }
    env.write_file(
      "project/assets/Templates/table.json",
      r#"{ "Name": "Table", "ScriptName": "table.js" }"#,
    );
    env.write_file("project/src/main.js", "console.log('source');\n");
    fs::create_dir_all(env.temp.path().join("host")).unwrap();

    env.write_tool("tsc", TSC);
    env.write_tool("yarn", YARN);
    env.write_tool("rollup", ROLLUP);
    env
  }

  /// A configured project: slug `my-mod`, `guid.prd` `ABC123`.
  pub fn configured() -> Self {
    let env = Self::unconfigured();
    env.write_file(
      "project/ttpgcfg.local.json",
      &serde_json::json!({ "ttpg_path": env.host_path() }).to_string(),
    );
    env.write_file(
      "project/ttpgcfg.project.json",
      r#"{
  "name": "My Mod",
  "slug": "my-mod",
  "version": "1.0.0",
  "transpile": true,
  "guid": { "dev": "DEV999", "prd": "ABC123" }
}"#,
    );
    env
  }

  /// Write a file relative to the temp directory.
  pub fn write_file(&self, relative_path: &str, content: &str) {
    let path = self.temp.path().join(relative_path);
    if let Some(parent) = path.parent() {
      fs::create_dir_all(parent).unwrap();
    }
    fs::write(&path, content).unwrap();
  }

  /// Replace a fake tool with `script`.
  pub fn write_tool(&self, name: &str, script: &str) {
    let path = self.tool_path(name);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(&path, script).unwrap();
    fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
  }

  pub fn tool_path(&self, name: &str) -> PathBuf {
    self.temp.path().join("tools").join(name)
  }

  pub fn project_path(&self) -> PathBuf {
    let p = self.temp.path().join("project");
    dunce::canonicalize(&p).unwrap_or(p)
  }

  /// The fake TTPG package directory.
  pub fn host_path(&self) -> PathBuf {
    let p = self.temp.path().join("host");
    dunce::canonicalize(&p).unwrap_or(p)
  }

  pub fn production_path(&self) -> PathBuf {
    self.host_path().join("my-mod")
  }

  pub fn read_json(&self, path: &Path) -> serde_json::Value {
    serde_json::from_str(&fs::read_to_string(path).unwrap()).unwrap()
  }

  pub fn project_config(&self) -> serde_json::Value {
    self.read_json(&self.project_path().join("ttpgcfg.project.json"))
  }

  /// Get a pre-configured Command for the ttpg binary.
  ///
  /// Runs in the project directory with `TTPG_TRANSPILER`,
  /// `TTPG_PACKAGE_MANAGER` and `TTPG_BUNDLER` pointing at the fake tools.
  pub fn ttpg_cmd(&self) -> Command {
    let mut cmd: Command = cargo_bin_cmd!("ttpg");
    cmd.current_dir(self.project_path());
    cmd.env("TTPG_TRANSPILER", self.tool_path("tsc"));
    cmd.env("TTPG_PACKAGE_MANAGER", self.tool_path("yarn"));
    cmd.env("TTPG_BUNDLER", self.tool_path("rollup"));
    cmd.env_remove("RUST_LOG");
    cmd
  }
}
