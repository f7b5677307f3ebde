//! Implementation of the `ttpg build` and `ttpg libpack` commands.

use std::path::Path;
use std::time::Instant;

use anyhow::{Context, Result};

use ttpgpack_lib::pipeline::Pipeline;
use ttpgpack_lib::tools::Toolchain;

use super::{Workspace, runtime};
use crate::output::{format_duration, print_stat};
use crate::reporter::ConsoleReporter;

/// Build the production package. With `bundle`, only the scripts referenced
/// by templates are shipped, each bundled into one file.
pub fn cmd_build(project: Option<&Path>, bundle: bool, verbose: bool) -> Result<()> {
  let start = Instant::now();
  let workspace = Workspace::open(project)?;
  let config = workspace.store.load()?;
  let tools = Toolchain::from_env();
  let reporter = ConsoleReporter::new(verbose);

  let pipeline = Pipeline::new(&workspace.layout, &config, &tools, &reporter);
  let rt = runtime()?;
  let outcome = if bundle {
    rt.block_on(pipeline.libpack()).context("Library pack failed")?
  } else {
    rt.block_on(pipeline.build()).context("Build failed")?
  };

  print_stat("GUID", &outcome.manifest.guid);
  if bundle {
    print_stat("Bundled scripts", &outcome.bundled_scripts.len().to_string());
  }
  print_stat("Duration", &format_duration(start.elapsed()));
  Ok(())
}
