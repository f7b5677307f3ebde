//! Implementation of the `ttpg setup` command.

use std::path::Path;

use anyhow::Result;

use ttpgpack_lib::setup::run_setup;

use super::{Workspace, runtime};
use crate::output::{print_info, print_success};
use crate::prompts::StdinPrompter;
use crate::reporter::ConsoleReporter;

pub fn cmd_setup(project: Option<&Path>) -> Result<()> {
  let workspace = Workspace::open(project)?;
  let reporter = ConsoleReporter::new(false);
  let mut prompter = StdinPrompter;

  let rt = runtime()?;
  let outcome = rt.block_on(run_setup(&workspace.layout, &workspace.store, &mut prompter, &reporter))?;

  if outcome.asset_dirs_created {
    print_info(&format!("Created asset directories in {}", workspace.layout.assets().display()));
  }
  print_success("Setup complete");
  Ok(())
}
