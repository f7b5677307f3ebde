//! The `Manifest.json` document the host reads to identify a package.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Deserializer, Serialize};
use tracing::debug;

use crate::config::ProjectConfig;
use crate::consts::MANIFEST_FILE;
use crate::stage::StepError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Manifest {
  #[serde(rename = "Name")]
  pub name: String,
  #[serde(rename = "Version")]
  pub version: String,
  #[serde(rename = "GUID")]
  pub guid: String,
  /// Set by the mod registry on publish. Older hosts wrote it as a string.
  #[serde(
    rename = "ModID",
    default,
    skip_serializing_if = "Option::is_none",
    deserialize_with = "lenient_mod_id"
  )]
  pub mod_id: Option<u64>,
}

impl Manifest {
  /// Manifest of the production package: `guid.prd` and the mod id once known.
  pub fn production(project: &ProjectConfig) -> Self {
    Self {
      name: project.name.clone(),
      version: project.version.clone(),
      guid: project.guid.prd.clone(),
      mod_id: project.mod_id,
    }
  }

  /// Manifest of the dev package: `guid.dev`, a distinguishing name, never a mod id.
  pub fn development(project: &ProjectConfig) -> Self {
    Self {
      name: format!("{} (Dev)", project.name),
      version: project.version.clone(),
      guid: project.guid.dev.clone(),
      mod_id: None,
    }
  }

  pub fn path_in(dir: &Path) -> PathBuf {
    dir.join(MANIFEST_FILE)
  }

  /// Write `Manifest.json` into `dir`.
  pub async fn write(&self, dir: &Path) -> Result<PathBuf, StepError> {
    let path = Self::path_in(dir);
    let content = serde_json::to_string_pretty(self).map_err(|source| StepError::Json {
      path: path.clone(),
      source,
    })?;

    tokio::fs::write(&path, content)
      .await
      .map_err(StepError::io(&path))?;

    debug!(path = %path.display(), guid = %self.guid, "wrote manifest");
    Ok(path)
  }

  /// Read `Manifest.json` from `dir`.
  pub async fn read(dir: &Path) -> Result<Self, StepError> {
    let path = Self::path_in(dir);
    let content = tokio::fs::read_to_string(&path)
      .await
      .map_err(StepError::io(&path))?;

    serde_json::from_str(&content).map_err(|source| StepError::Json { path, source })
  }
}

fn lenient_mod_id<'de, D>(deserializer: D) -> Result<Option<u64>, D::Error>
where
  D: Deserializer<'de>,
{
  #[derive(Deserialize)]
  #[serde(untagged)]
  enum Raw {
    Number(u64),
    Text(String),
  }

  match Option::<Raw>::deserialize(deserializer)? {
    None => Ok(None),
    Some(Raw::Number(id)) => Ok(Some(id)),
    Some(Raw::Text(text)) => text
      .trim()
      .parse()
      .map(Some)
      .map_err(serde::de::Error::custom),
  }
}
