//! Which packages of a project are present under the host path.

use serde::Serialize;

use crate::config::Config;
use crate::fsops::path_exists;

/// Computed once per command from two independent existence checks.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct PackageState {
  /// `<ttpg_path>/<slug>_dev` exists.
  pub dev_linked: bool,
  /// `<ttpg_path>/<slug>` exists.
  pub production_built: bool,
}

impl PackageState {
  pub async fn detect(config: &Config) -> Self {
    Self {
      dev_linked: path_exists(&config.dev_link()).await,
      production_built: path_exists(&config.production_dir()).await,
    }
  }

  pub fn is_unlinked(&self) -> bool {
    !self.dev_linked && !self.production_built
  }

  pub fn describe(&self) -> &'static str {
    match (self.dev_linked, self.production_built) {
      (false, false) => "unlinked",
      (true, false) => "dev-linked",
      (false, true) => "production-built",
      (true, true) => "dev-linked, production-built",
    }
  }
}
