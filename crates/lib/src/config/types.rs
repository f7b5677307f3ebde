use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use super::ConfigError;
use crate::consts::{DEFAULT_VERSION, DEV_SUFFIX};

/// Machine-local settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocalConfig {
  /// The host's package-discovery directory.
  pub ttpg_path: PathBuf,
}

/// Package identifiers for the development and production variants.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Guids {
  pub dev: String,
  pub prd: String,
}

/// Current-schema project settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectConfig {
  pub name: String,
  /// Directory name under the host path. Changing it orphans existing builds and links.
  pub slug: String,
  pub version: String,
  /// Whether sources are compiled before deployment.
  pub transpile: bool,
  pub guid: Guids,
  /// Mod registry id, known only after the first publish.
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub mod_id: Option<u64>,
}

impl ProjectConfig {
  /// Name of the development package directory.
  pub fn dev_name(&self) -> String {
    format!("{}{}", self.slug, DEV_SUFFIX)
  }

  pub fn validate(&self) -> Result<(), ConfigError> {
    if self.slug.is_empty() {
      return Err(ConfigError::Invalid("slug must not be empty".to_string()));
    }
    if self.slug.contains(['/', '\\']) || self.slug == "." || self.slug == ".." {
      return Err(ConfigError::Invalid(format!(
        "slug '{}' is not a valid directory name",
        self.slug
      )));
    }
    if self.guid.dev == self.guid.prd {
      return Err(ConfigError::Invalid(
        "guid.dev and guid.prd must be different".to_string(),
      ));
    }
    Ok(())
  }
}

/// Script language of a legacy project document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Template {
  Typescript,
  Javascript,
}

/// A project document as found on disk, in either the current or the legacy schema.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectDocument {
  pub name: String,
  pub slug: String,
  #[serde(default = "default_version")]
  pub version: String,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub transpile: Option<bool>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub template: Option<Template>,
  pub guid: Guids,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub mod_id: Option<u64>,
}

fn default_version() -> String {
  DEFAULT_VERSION.to_string()
}

impl ProjectDocument {
  /// True for legacy documents: `template` present, `transpile` absent.
  pub fn needs_migration(&self) -> bool {
    self.transpile.is_none() && self.template.is_some()
  }

  /// Upgrade to the current schema.
  ///
  /// Current documents pass through unchanged. Legacy documents get
  /// `transpile = (template == typescript)` and lose `template`.
  pub fn migrate(self) -> Result<ProjectConfig, ConfigError> {
    let transpile = match (self.transpile, self.template) {
      (Some(transpile), _) => transpile,
      (None, Some(template)) => template == Template::Typescript,
      (None, None) => {
        return Err(ConfigError::Invalid(
          "project config declares neither 'transpile' nor 'template'".to_string(),
        ));
      }
    };

    let config = ProjectConfig {
      name: self.name,
      slug: self.slug,
      version: self.version,
      transpile,
      guid: self.guid,
      mod_id: self.mod_id,
    };
    config.validate()?;
    Ok(config)
  }
}

impl From<ProjectConfig> for ProjectDocument {
  fn from(config: ProjectConfig) -> Self {
    Self {
      name: config.name,
      slug: config.slug,
      version: config.version,
      transpile: Some(config.transpile),
      template: None,
      guid: config.guid,
      mod_id: config.mod_id,
    }
  }
}

/// Both documents, resolved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Config {
  pub local: LocalConfig,
  pub project: ProjectConfig,
}

impl Config {
  /// `<ttpg_path>/<slug>`
  pub fn production_dir(&self) -> PathBuf {
    self.local.ttpg_path.join(&self.project.slug)
  }

  /// `<ttpg_path>/<slug>_dev`
  pub fn dev_link(&self) -> PathBuf {
    self.local.ttpg_path.join(self.project.dev_name())
  }
}
