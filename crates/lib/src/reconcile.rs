//! The inverse workflows: `purge`, `postpublish`, `clean` and `reset`.
//!
//! These tear down what the pipeline created and carry the little state that
//! must survive a teardown (the registry `ModID` and the thumbnail) back into
//! the project.

use std::path::{Path, PathBuf};

use tracing::{info, warn};

use crate::config::{Config, ConfigStore};
use crate::consts::THUMBNAIL_FILE;
use crate::error::PackError;
use crate::fsops;
use crate::layout::ProjectLayout;
use crate::manifest::Manifest;
use crate::report::{Event, Reporter};
use crate::setup::{ensure_local_config, Prompter};
use crate::stage::{Stage, StageRunner, StepError};
use crate::state::PackageState;

/// Result of a `purge`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PurgeOutcome {
  /// The production directory was deleted.
  pub removed: bool,
  /// The `ModID` saved into the project config, if any.
  pub mod_id: Option<u64>,
  pub thumbnail_captured: bool,
}

/// Paths deleted by `clean` or `reset`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CleanOutcome {
  pub removed: Vec<PathBuf>,
}

/// What a production build holds that the project does not have yet.
#[derive(Debug, Default)]
struct Capture {
  mod_id: Option<u64>,
  thumbnail: Option<PathBuf>,
}

impl Capture {
  fn is_empty(&self) -> bool {
    self.mod_id.is_none() && self.thumbnail.is_none()
  }

  fn question(&self) -> String {
    match (self.mod_id, &self.thumbnail) {
      (Some(id), Some(_)) => format!("Save ModID {} and the thumbnail into the project", id),
      (Some(id), None) => format!("Save ModID {} into the project config", id),
      _ => "Copy the thumbnail into the project".to_string(),
    }
  }
}

pub struct Reconciler<'a> {
  layout: &'a ProjectLayout,
  store: &'a ConfigStore,
  runner: StageRunner<'a>,
}

impl<'a> Reconciler<'a> {
  pub fn new(layout: &'a ProjectLayout, store: &'a ConfigStore, reporter: &'a dyn Reporter) -> Self {
    Self {
      layout,
      store,
      runner: StageRunner::new(reporter),
    }
  }

  /// Delete the production build, first offering to capture its `ModID` and
  /// thumbnail. `assume_yes` answers every confirmation with yes.
  pub async fn purge(
    &self,
    config: &mut Config,
    prompter: &mut dyn Prompter,
    assume_yes: bool,
  ) -> Result<PurgeOutcome, PackError> {
    let output_dir = config.production_dir();
    let state = PackageState::detect(config).await;
    if !state.production_built {
      return Err(PackError::NoProductionBuild { path: output_dir });
    }

    let question = format!("Delete the production build at {}", output_dir.display());
    if !assume_yes && !prompter.confirm(&question)? {
      self.report(Event::Notice("Purge cancelled".to_string()));
      return Ok(PurgeOutcome::default());
    }

    let mut outcome = PurgeOutcome::default();
    let capture = self.plan_capture(config, &output_dir).await;
    if !capture.is_empty() && (assume_yes || prompter.confirm(&capture.question())?) {
      if let Some(id) = capture.mod_id {
        self.capture_mod_id(config, id).await?;
        outcome.mod_id = Some(id);
      }
      if let Some(source) = &capture.thumbnail {
        self
          .runner
          .run(Stage::CaptureThumbnail, fsops::copy_file(source, &self.layout.thumbnail()))
          .await?;
        outcome.thumbnail_captured = true;
      }
    }

    self
      .runner
      .run(Stage::RemoveProduction, fsops::remove_path(&output_dir))
      .await?;
    outcome.removed = true;

    info!(path = %output_dir.display(), mod_id = ?outcome.mod_id, "purged production build");
    self.report(Event::Success(format!("Removed {}", output_dir.display())));
    Ok(outcome)
  }

  /// Save the `ModID` the registry wrote into the production manifest,
  /// leaving the build in place.
  pub async fn postpublish(&self, config: &mut Config) -> Result<Option<u64>, PackError> {
    let output_dir = config.production_dir();
    let state = PackageState::detect(config).await;
    if !state.production_built {
      return Err(PackError::NoProductionBuild { path: output_dir });
    }

    let manifest = self
      .runner
      .run(Stage::ReadManifest, Manifest::read(&output_dir))
      .await?;

    match manifest.mod_id {
      Some(id) => {
        self.capture_mod_id(config, id).await?;
        self.report(Event::Success(format!("Saved ModID {} into the project config", id)));
        Ok(Some(id))
      }
      None => {
        self.report(Event::Warning(
          "The production manifest has no ModID yet, publish the package first".to_string(),
        ));
        Ok(None)
      }
    }
  }

  /// Remove local build residue and the host dev link. Never touches the
  /// production build.
  pub async fn clean(&self) -> Result<CleanOutcome, PackError> {
    let dev_link = self.dev_link();
    self.remove_artifacts(dev_link).await
  }

  /// `clean`, then forget the local config and ask for it again.
  pub async fn reset(&self, prompter: &mut dyn Prompter) -> Result<CleanOutcome, PackError> {
    let dev_link = self.dev_link();
    let mut outcome = self.remove_artifacts(dev_link).await?;

    if self.store.remove_local()? {
      outcome.removed.push(self.store.local_path().to_path_buf());
    }
    ensure_local_config(self.store, prompter, self.runner.reporter())?;
    Ok(outcome)
  }

  async fn remove_artifacts(&self, dev_link: Option<PathBuf>) -> Result<CleanOutcome, PackError> {
    let mut targets = Vec::new();
    if let Some(link) = dev_link {
      targets.push((Stage::RemoveDevLink, link));
    }
    targets.push((Stage::RemoveDevDir, self.layout.dev_root()));
    targets.push((Stage::RemoveBuildDir, self.layout.build_dir()));
    targets.push((Stage::RemoveBundleDir, self.layout.bundle_dir()));
    targets.push((Stage::RemoveBundlerConfig, self.layout.bundler_config()));

    let mut outcome = CleanOutcome::default();
    for (stage, path) in targets {
      if self.runner.run(stage, fsops::remove_path(&path)).await? {
        outcome.removed.push(path);
      }
    }

    info!(removed = outcome.removed.len(), "cleaned workspace");
    Ok(outcome)
  }

  /// The host dev link, when both config documents are present and readable
  /// enough to name it. An unreadable config only skips the link.
  fn dev_link(&self) -> Option<PathBuf> {
    if !self.store.has_local() || !self.store.has_project() {
      return None;
    }
    match self.store.load() {
      Ok(config) => Some(config.dev_link()),
      Err(err) => {
        warn!(error = %err, "config unreadable, leaving host dev link alone");
        self.report(Event::Warning(format!(
          "Skipping the host dev link, the config could not be read: {}",
          err
        )));
        None
      }
    }
  }

  async fn plan_capture(&self, config: &Config, output_dir: &Path) -> Capture {
    let mod_id = match Manifest::read(output_dir).await {
      Ok(manifest) => manifest.mod_id,
      Err(err) => {
        warn!(error = %err, "could not read production manifest");
        self.report(Event::Warning(format!("Skipping ModID capture: {}", err)));
        None
      }
    };

    let source = output_dir.join(THUMBNAIL_FILE);
    let missing_locally = !fsops::path_exists(&self.layout.thumbnail()).await;
    let thumbnail = if missing_locally && fsops::path_exists(&source).await {
      Some(source)
    } else {
      None
    };

    Capture {
      mod_id: mod_id.filter(|id| config.project.mod_id != Some(*id)),
      thumbnail,
    }
  }

  async fn capture_mod_id(&self, config: &mut Config, id: u64) -> Result<(), PackError> {
    let store = self.store;
    self
      .runner
      .run(Stage::CaptureModId, async {
        config.project.mod_id = Some(id);
        store.save_project(&config.project)?;
        Ok::<_, StepError>(())
      })
      .await
  }

  fn report(&self, event: Event) {
    self.runner.reporter().report(event);
  }
}
