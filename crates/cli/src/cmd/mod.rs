mod build;
mod clean;
mod dev;
mod guid;
mod purge;
mod setup;
mod status;

use std::path::Path;

use anyhow::{Context, Result};
use tokio::runtime::Runtime;
use tracing::debug;

use ttpgpack_lib::config::ConfigStore;
use ttpgpack_lib::layout::ProjectLayout;

pub use build::cmd_build;
pub use clean::{cmd_clean, cmd_reset};
pub use dev::cmd_dev;
pub use guid::cmd_guid;
pub use purge::{cmd_postpublish, cmd_purge};
pub use setup::cmd_setup;
pub use status::cmd_status;

/// The project a command operates on.
pub struct Workspace {
  pub layout: ProjectLayout,
  pub store: ConfigStore,
}

impl Workspace {
  /// Open `project`, or the current directory when none is given.
  pub fn open(project: Option<&Path>) -> Result<Self> {
    let layout = match project {
      Some(dir) => ProjectLayout::new(dir)
        .with_context(|| format!("Cannot open project directory {}", dir.display()))?,
      None => ProjectLayout::current().context("Cannot resolve the current directory")?,
    };
    debug!(root = %layout.root().display(), "opened workspace");

    let store = ConfigStore::new(&layout);
    Ok(Self { layout, store })
  }
}

pub fn runtime() -> Result<Runtime> {
  Runtime::new().context("Failed to create async runtime")
}
