//! Reading and writing config documents.
//!
//! Writes are atomic: the document is written to `<file>.tmp` and renamed over
//! the original, so a crash never leaves a half-written or missing document.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, info};

use super::ConfigError;
use super::types::{Config, LocalConfig, ProjectConfig, ProjectDocument};
use crate::error::PackError;
use crate::layout::ProjectLayout;

/// Loads and persists the local and project documents of one project.
#[derive(Debug, Clone)]
pub struct ConfigStore {
  root: PathBuf,
  local_path: PathBuf,
  project_path: PathBuf,
}

impl ConfigStore {
  pub fn new(layout: &ProjectLayout) -> Self {
    Self {
      root: layout.root().to_path_buf(),
      local_path: layout.local_config(),
      project_path: layout.project_config(),
    }
  }

  pub fn local_path(&self) -> &Path {
    &self.local_path
  }

  pub fn project_path(&self) -> &Path {
    &self.project_path
  }

  pub fn has_local(&self) -> bool {
    self.local_path.exists()
  }

  pub fn has_project(&self) -> bool {
    self.project_path.exists()
  }

  /// Load both documents.
  ///
  /// Fails with [`PackError::NotConfigured`] if either document is absent.
  pub fn load(&self) -> Result<Config, PackError> {
    let local = self.load_local()?;
    let project = self.load_project()?;
    Ok(Config { local, project })
  }

  /// Load the local document. A relative `ttpg_path` is taken relative to the
  /// project root, not the working directory.
  pub fn load_local(&self) -> Result<LocalConfig, PackError> {
    let mut local: LocalConfig =
      read_document(&self.local_path)?.ok_or_else(|| PackError::NotConfigured {
        path: self.local_path.clone(),
      })?;
    local.ttpg_path = self.resolve_host_path(&local.ttpg_path);
    Ok(local)
  }

  /// Anchor `path` at the project root unless it is already absolute.
  pub fn resolve_host_path(&self, path: &Path) -> PathBuf {
    if path.is_absolute() {
      path.to_path_buf()
    } else {
      self.root.join(path)
    }
  }

  /// Load the project document, migrating and persisting legacy documents.
  pub fn load_project(&self) -> Result<ProjectConfig, PackError> {
    let document: ProjectDocument =
      read_document(&self.project_path)?.ok_or_else(|| PackError::NotConfigured {
        path: self.project_path.clone(),
      })?;

    let legacy = document.needs_migration();
    let config = document.migrate()?;

    if legacy {
      self.save_project(&config)?;
      info!(
        path = %self.project_path.display(),
        transpile = config.transpile,
        "migrated legacy project config"
      );
    }

    Ok(config)
  }

  pub fn save_local(&self, config: &LocalConfig) -> Result<(), ConfigError> {
    write_document(&self.local_path, config)
  }

  pub fn save_project(&self, config: &ProjectConfig) -> Result<(), ConfigError> {
    config.validate()?;
    write_document(&self.project_path, config)
  }

  /// Delete the local document. Missing documents are not an error.
  pub fn remove_local(&self) -> Result<bool, ConfigError> {
    match fs::remove_file(&self.local_path) {
      Ok(()) => Ok(true),
      Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
      Err(source) => Err(ConfigError::Remove {
        path: self.local_path.clone(),
        source,
      }),
    }
  }
}

/// Read and parse a document. Returns `Ok(None)` if it doesn't exist.
fn read_document<T: DeserializeOwned>(path: &Path) -> Result<Option<T>, ConfigError> {
  let content = match fs::read_to_string(path) {
    Ok(content) => content,
    Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
    Err(source) => {
      return Err(ConfigError::Read {
        path: path.to_path_buf(),
        source,
      });
    }
  };

  serde_json::from_str(&content)
    .map(Some)
    .map_err(|source| ConfigError::Parse {
      path: path.to_path_buf(),
      source,
    })
}

fn write_document<T: Serialize>(path: &Path, value: &T) -> Result<(), ConfigError> {
  let mut content = serde_json::to_string_pretty(value).map_err(|source| ConfigError::Serialize {
    path: path.to_path_buf(),
    source,
  })?;
  content.push('\n');

  let mut temp_name = path.as_os_str().to_owned();
  temp_name.push(".tmp");
  let temp_path = PathBuf::from(temp_name);

  let write_err = |source| ConfigError::Write {
    path: path.to_path_buf(),
    source,
  };
  fs::write(&temp_path, content).map_err(write_err)?;
  fs::rename(&temp_path, path).map_err(write_err)?;

  debug!(path = %path.display(), "wrote config document");
  Ok(())
}
