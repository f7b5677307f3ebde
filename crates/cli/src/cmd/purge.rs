//! Implementation of the `ttpg purge` and `ttpg postpublish` commands.

use std::path::Path;

use anyhow::Result;

use ttpgpack_lib::reconcile::Reconciler;

use super::{Workspace, runtime};
use crate::output::{print_path, print_stat};
use crate::prompts::StdinPrompter;
use crate::reporter::ConsoleReporter;

/// Delete the production package. `yes` skips every confirmation and
/// captures the ModID and thumbnail.
pub fn cmd_purge(project: Option<&Path>, yes: bool) -> Result<()> {
  let workspace = Workspace::open(project)?;
  let mut config = workspace.store.load()?;
  let reporter = ConsoleReporter::new(false);
  let reconciler = Reconciler::new(&workspace.layout, &workspace.store, &reporter);
  let mut prompter = StdinPrompter;

  let outcome = runtime()?.block_on(reconciler.purge(&mut config, &mut prompter, yes))?;

  if let Some(id) = outcome.mod_id {
    print_stat("ModID", &id.to_string());
  }
  if outcome.thumbnail_captured {
    print_path("Thumbnail", &workspace.layout.thumbnail());
  }
  Ok(())
}

pub fn cmd_postpublish(project: Option<&Path>) -> Result<()> {
  let workspace = Workspace::open(project)?;
  let mut config = workspace.store.load()?;
  let reporter = ConsoleReporter::new(false);
  let reconciler = Reconciler::new(&workspace.layout, &workspace.store, &reporter);

  runtime()?.block_on(reconciler.postpublish(&mut config))?;
  Ok(())
}
