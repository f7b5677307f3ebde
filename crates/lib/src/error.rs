//! Error taxonomy shared by every workflow.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::config::ConfigError;
use crate::stage::Stage;

/// Errors surfaced by the pipeline and reconcile workflows.
///
/// Every variant except [`PackError::NoProductionBuild`] terminates the command.
#[derive(Debug, Error)]
pub enum PackError {
  /// A required config document is missing.
  #[error("workspace is not set up ({} is missing), run 'ttpg setup'", path.display())]
  NotConfigured { path: PathBuf },

  /// The production output directory already exists.
  #[error(
    "production build already exists at {}, run 'ttpg purge' if you'd like to delete it",
    path.display()
  )]
  AlreadyBuilt { path: PathBuf },

  /// An external tool could not be started or exited non-zero.
  #[error("{stage}: {tool} {}", describe_exit(code))]
  SubprocessFailed {
    stage: Stage,
    tool: String,
    code: Option<i32>,
  },

  /// A copy, mkdir, rm or link operation failed.
  #[error("{stage}: {}: {source}", path.display())]
  Filesystem {
    stage: Stage,
    path: PathBuf,
    #[source]
    source: io::Error,
  },

  /// A manifest or template document could not be parsed or written.
  #[error("{stage}: invalid document {}: {source}", path.display())]
  Document {
    stage: Stage,
    path: PathBuf,
    #[source]
    source: serde_json::Error,
  },

  /// There is no production build to act on.
  #[error("there is no production build at {}", path.display())]
  NoProductionBuild { path: PathBuf },

  #[error(transparent)]
  Config(#[from] ConfigError),

  /// A required setup answer was not given.
  #[error("setup aborted: {0}")]
  Setup(String),

  #[error("failed to read answer: {0}")]
  Prompt(#[source] io::Error),
}

impl PackError {
  /// Whether the error should fail the command.
  pub fn is_fatal(&self) -> bool {
    !matches!(self, PackError::NoProductionBuild { .. })
  }
}

fn describe_exit(code: &Option<i32>) -> String {
  match code {
    Some(code) => format!("exited with status {}", code),
    None => "could not be run to completion".to_string(),
  }
}
