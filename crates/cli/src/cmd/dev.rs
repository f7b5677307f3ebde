//! Implementation of the `ttpg dev` command.

use std::path::Path;

use anyhow::{Context, Result};

use ttpgpack_lib::pipeline::Pipeline;
use ttpgpack_lib::tools::Toolchain;

use super::{Workspace, runtime};
use crate::output::{print_path, print_stat};
use crate::reporter::ConsoleReporter;

pub fn cmd_dev(project: Option<&Path>, verbose: bool) -> Result<()> {
  let workspace = Workspace::open(project)?;
  let config = workspace.store.load()?;
  let tools = Toolchain::from_env();
  let reporter = ConsoleReporter::new(verbose);

  let pipeline = Pipeline::new(&workspace.layout, &config, &tools, &reporter);
  let outcome = runtime()?.block_on(pipeline.dev()).context("Dev link failed")?;

  print_path("Staging", &outcome.staging_dir);
  print_stat(
    "Asset links",
    &format!(
      "{} created, {} existing",
      outcome.asset_links.created, outcome.asset_links.existing
    ),
  );
  Ok(())
}
