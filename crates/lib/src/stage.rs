//! Named pipeline stages and the runner that sequences them.
//!
//! A workflow is a sequence of `runner.run(Stage::X, future).await?` calls.
//! Each stage body returns a [`StepError`]; the runner reports progress,
//! logs the failure once, attaches the stage name and stops the sequence
//! with a single [`PackError`].

use std::fmt;
use std::future::Future;
use std::io;
use std::path::PathBuf;

use thiserror::Error;
use tracing::{debug, error};

use crate::config::ConfigError;
use crate::error::PackError;
use crate::report::{Event, Reporter};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stage {
  CreateOutputDir,
  CopyAssets,
  CreateBuildDir,
  Transpile,
  CopySources,
  InstallDependencies,
  CollectScripts,
  WriteBundlerConfig,
  Bundle,
  CopyScripts,
  RemoveBuildDir,
  RemoveBundleDir,
  RemoveBundlerConfig,
  WriteManifest,
  CreateDevDir,
  LinkAssets,
  LinkHost,
  ReadManifest,
  CaptureModId,
  CaptureThumbnail,
  RemoveProduction,
  RemoveDevLink,
  RemoveDevDir,
  CreateAssetDirs,
}

impl Stage {
  pub fn as_str(&self) -> &'static str {
    match self {
      Stage::CreateOutputDir => "create production directory",
      Stage::CopyAssets => "copy assets",
      Stage::CreateBuildDir => "create temporary build directory",
      Stage::Transpile => "transpile sources",
      Stage::CopySources => "copy sources",
      Stage::InstallDependencies => "install production dependencies",
      Stage::CollectScripts => "collect referenced scripts",
      Stage::WriteBundlerConfig => "write bundler config",
      Stage::Bundle => "bundle scripts",
      Stage::CopyScripts => "copy scripts to package",
      Stage::RemoveBuildDir => "remove temporary build directory",
      Stage::RemoveBundleDir => "remove bundle output directory",
      Stage::RemoveBundlerConfig => "remove bundler config",
      Stage::WriteManifest => "write manifest",
      Stage::CreateDevDir => "create dev directory",
      Stage::LinkAssets => "link asset directories",
      Stage::LinkHost => "link dev package into host",
      Stage::ReadManifest => "read manifest",
      Stage::CaptureModId => "capture mod id",
      Stage::CaptureThumbnail => "capture thumbnail",
      Stage::RemoveProduction => "remove production build",
      Stage::RemoveDevLink => "remove host dev link",
      Stage::RemoveDevDir => "remove local directory",
      Stage::CreateAssetDirs => "create asset directories",
    }
  }
}

impl fmt::Display for Stage {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

/// Failure of a single stage body, before the stage name is attached.
#[derive(Debug, Error)]
pub enum StepError {
  #[error("{}: {source}", path.display())]
  Io {
    path: PathBuf,
    #[source]
    source: io::Error,
  },

  #[error("{}: {source}", path.display())]
  Json {
    path: PathBuf,
    #[source]
    source: serde_json::Error,
  },

  #[error("{tool} failed (exit code {code:?})")]
  Subprocess { tool: String, code: Option<i32> },

  #[error(transparent)]
  Config(#[from] ConfigError),
}

impl StepError {
  /// Adapter for `map_err` on I/O results touching `path`.
  pub fn io(path: impl Into<PathBuf>) -> impl FnOnce(io::Error) -> StepError {
    let path = path.into();
    move |source| StepError::Io { path, source }
  }

  pub fn at(self, stage: Stage) -> PackError {
    match self {
      StepError::Io { path, source } => PackError::Filesystem { stage, path, source },
      StepError::Json { path, source } => PackError::Document { stage, path, source },
      StepError::Subprocess { tool, code } => PackError::SubprocessFailed { stage, tool, code },
      StepError::Config(err) => PackError::Config(err),
    }
  }
}

/// Runs stages one at a time and reports each to the injected reporter.
#[derive(Clone, Copy)]
pub struct StageRunner<'a> {
  reporter: &'a dyn Reporter,
}

impl<'a> StageRunner<'a> {
  pub fn new(reporter: &'a dyn Reporter) -> Self {
    Self { reporter }
  }

  pub fn reporter(&self) -> &'a dyn Reporter {
    self.reporter
  }

  pub async fn run<T, F>(&self, stage: Stage, step: F) -> Result<T, PackError>
  where
    F: Future<Output = Result<T, StepError>>,
  {
    self.reporter.report(Event::StageStarted(stage));

    match step.await {
      Ok(value) => {
        debug!(stage = %stage, "stage complete");
        self.reporter.report(Event::StageCompleted(stage));
        Ok(value)
      }
      Err(err) => {
        let err = err.at(stage);
        error!(stage = %stage, error = %err, "stage failed");
        self.reporter.report(Event::StageFailed {
          stage,
          message: err.to_string(),
        });
        Err(err)
      }
    }
  }
}
