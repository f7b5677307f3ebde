//! Local and project configuration documents.
//!
//! Two JSON documents live at the project root:
//!
//! ```text
//! ttpgcfg.local.json    # { "ttpg_path": ... }   machine-local, not committed
//! ttpgcfg.project.json  # identity and build policy, committed
//! ```
//!
//! Legacy project documents carry `template` instead of `transpile`; they are
//! migrated and rewritten the first time they are loaded.

mod store;
mod types;

use std::io;
use std::path::PathBuf;

use thiserror::Error;

pub use store::ConfigStore;
pub use types::{Config, Guids, LocalConfig, ProjectConfig, ProjectDocument, Template};

/// Errors that can occur while reading or writing config documents.
#[derive(Debug, Error)]
pub enum ConfigError {
  #[error("failed to read {}: {source}", path.display())]
  Read {
    path: PathBuf,
    #[source]
    source: io::Error,
  },

  #[error("failed to parse {}: {source}", path.display())]
  Parse {
    path: PathBuf,
    #[source]
    source: serde_json::Error,
  },

  #[error("failed to serialize {}: {source}", path.display())]
  Serialize {
    path: PathBuf,
    #[source]
    source: serde_json::Error,
  },

  #[error("failed to write {}: {source}", path.display())]
  Write {
    path: PathBuf,
    #[source]
    source: io::Error,
  },

  #[error("failed to remove {}: {source}", path.display())]
  Remove {
    path: PathBuf,
    #[source]
    source: io::Error,
  },

  #[error("invalid project config: {0}")]
  Invalid(String),
}
