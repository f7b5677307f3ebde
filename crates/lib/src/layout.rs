//! Filesystem layout of a project workspace.
//!
//! ```text
//! <root>/
//! ├── ttpgcfg.local.json
//! ├── ttpgcfg.project.json
//! ├── assets/<Category>/...     # Fonts, Models, Sounds, States, Templates, Textures, Thumbnails
//! ├── src/                      # script sources
//! ├── build/                    # temporary, build and libpack only
//! ├── lib/                      # bundler output, libpack only
//! ├── rollup.config.js          # generated, libpack only
//! └── dev/<slug>_dev/           # dev staging, linked into the host
//!     ├── <Category> -> <root>/assets/<Category>
//!     ├── Scripts/
//!     └── Manifest.json
//! ```

use std::io;
use std::path::{Path, PathBuf};

use crate::consts::{
  ASSETS_DIR, BUILD_DIR, BUNDLE_DIR, BUNDLER_CONFIG_FILE, DEV_DIR, LOCAL_CONFIG_FILE,
  PROJECT_CONFIG_FILE, SCRIPTS_DIR, SOURCE_DIR, TEMPLATES_DIR, THUMBNAIL_FILE,
};

/// Absolute paths of everything inside a project root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectLayout {
  root: PathBuf,
}

impl ProjectLayout {
  /// Resolve `root` to an absolute path. The directory must exist.
  pub fn new(root: impl AsRef<Path>) -> io::Result<Self> {
    let root = dunce::canonicalize(root.as_ref())?;
    Ok(Self { root })
  }

  /// Layout rooted at the current working directory.
  pub fn current() -> io::Result<Self> {
    Self::new(std::env::current_dir()?)
  }

  pub fn root(&self) -> &Path {
    &self.root
  }

  pub fn local_config(&self) -> PathBuf {
    self.root.join(LOCAL_CONFIG_FILE)
  }

  pub fn project_config(&self) -> PathBuf {
    self.root.join(PROJECT_CONFIG_FILE)
  }

  pub fn assets(&self) -> PathBuf {
    self.root.join(ASSETS_DIR)
  }

  pub fn asset_category(&self, category: &str) -> PathBuf {
    self.assets().join(category)
  }

  pub fn templates(&self) -> PathBuf {
    self.asset_category(TEMPLATES_DIR)
  }

  pub fn sources(&self) -> PathBuf {
    self.root.join(SOURCE_DIR)
  }

  pub fn build_dir(&self) -> PathBuf {
    self.root.join(BUILD_DIR)
  }

  pub fn bundle_dir(&self) -> PathBuf {
    self.root.join(BUNDLE_DIR)
  }

  pub fn bundler_config(&self) -> PathBuf {
    self.root.join(BUNDLER_CONFIG_FILE)
  }

  pub fn dev_root(&self) -> PathBuf {
    self.root.join(DEV_DIR)
  }

  /// `./dev/<dev_name>`
  pub fn dev_staging(&self, dev_name: &str) -> PathBuf {
    self.dev_root().join(dev_name)
  }

  pub fn dev_scripts(&self, dev_name: &str) -> PathBuf {
    self.dev_staging(dev_name).join(SCRIPTS_DIR)
  }

  pub fn thumbnail(&self) -> PathBuf {
    self.root.join(THUMBNAIL_FILE)
  }
}
