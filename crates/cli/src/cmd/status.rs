//! Status command implementation.
//!
//! Displays the resolved config and which packages exist under the TTPG path.

use std::path::Path;

use anyhow::Result;

use ttpgpack_lib::state::PackageState;

use super::{Workspace, runtime};
use crate::output::{OutputFormat, print_hint, print_json, print_path, print_stat, print_success};

pub fn cmd_status(project: Option<&Path>, format: OutputFormat) -> Result<()> {
  let workspace = Workspace::open(project)?;
  let config = workspace.store.load()?;
  let state = runtime()?.block_on(PackageState::detect(&config));

  if format.is_json() {
    print_json(&serde_json::json!({ "config": config, "state": state }))?;
    return Ok(());
  }

  let project = &config.project;
  print_success(&format!("{} v{}", project.name, project.version));
  print_stat("Slug", &project.slug);
  print_stat("Transpile", &project.transpile.to_string());
  print_stat("GUID (dev)", &project.guid.dev);
  print_stat("GUID (prd)", &project.guid.prd);
  print_stat(
    "ModID",
    &project.mod_id.map_or_else(|| "not published".to_string(), |id| id.to_string()),
  );
  print_path("TTPG path", &config.local.ttpg_path);
  println!();
  print_stat("State", state.describe());
  if state.is_unlinked() {
    print_hint("Nothing is linked or built yet, run 'ttpg dev' or 'ttpg build'");
  }
  Ok(())
}
