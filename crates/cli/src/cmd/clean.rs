//! Implementation of the `ttpg clean` and `ttpg reset` commands.

use std::path::Path;

use anyhow::Result;

use ttpgpack_lib::reconcile::{CleanOutcome, Reconciler};

use super::{Workspace, runtime};
use crate::output::{print_info, print_success};
use crate::prompts::StdinPrompter;
use crate::reporter::ConsoleReporter;

pub fn cmd_clean(project: Option<&Path>) -> Result<()> {
  let workspace = Workspace::open(project)?;
  let reporter = ConsoleReporter::new(false);
  let reconciler = Reconciler::new(&workspace.layout, &workspace.store, &reporter);

  let outcome = runtime()?.block_on(reconciler.clean())?;

  print_removed(&outcome);
  print_success("Clean complete");
  Ok(())
}

pub fn cmd_reset(project: Option<&Path>) -> Result<()> {
  let workspace = Workspace::open(project)?;
  let reporter = ConsoleReporter::new(false);
  let reconciler = Reconciler::new(&workspace.layout, &workspace.store, &reporter);
  let mut prompter = StdinPrompter;

  let outcome = runtime()?.block_on(reconciler.reset(&mut prompter))?;

  print_removed(&outcome);
  print_success("Reset complete");
  Ok(())
}

fn print_removed(outcome: &CleanOutcome) {
  if outcome.removed.is_empty() {
    print_info("Nothing to remove");
  }
  for path in &outcome.removed {
    print_info(&format!("Removed {}", path.display()));
  }
}
