//! The staged packaging workflows: `build`, `libpack` and `dev`.
//!
//! Every step runs through a [`StageRunner`], so a failure stops the workflow
//! at that stage and surfaces as one [`PackError`] naming it. Completed stages
//! are never rolled back; partial output is left for `purge` or `clean`.

use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::bundle;
use crate::config::Config;
use crate::consts::{ASSET_CATEGORIES, DEPENDENCIES_DIR, SCRIPTS_DIR};
use crate::error::PackError;
use crate::fsops;
use crate::layout::ProjectLayout;
use crate::link::{self, LinkOutcome, LinkSummary};
use crate::manifest::Manifest;
use crate::report::{Event, Reporter};
use crate::stage::{Stage, StageRunner};
use crate::state::PackageState;
use crate::tools::Toolchain;

/// Result of a production `build` or `libpack`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildOutcome {
  pub output_dir: PathBuf,
  pub manifest: Manifest,
  /// Scripts that were bundled. Always empty for a plain build.
  pub bundled_scripts: Vec<String>,
}

/// Result of a `dev` run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DevOutcome {
  pub staging_dir: PathBuf,
  pub host_link: PathBuf,
  pub asset_links: LinkSummary,
  pub host_link_created: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Packing {
  Plain,
  Bundled,
}

/// Drives the packaging workflows for one loaded project.
pub struct Pipeline<'a> {
  layout: &'a ProjectLayout,
  config: &'a Config,
  tools: &'a Toolchain,
  runner: StageRunner<'a>,
}

impl<'a> Pipeline<'a> {
  pub fn new(
    layout: &'a ProjectLayout,
    config: &'a Config,
    tools: &'a Toolchain,
    reporter: &'a dyn Reporter,
  ) -> Self {
    Self {
      layout,
      config,
      tools,
      runner: StageRunner::new(reporter),
    }
  }

  /// Assemble the production package under `<ttpg_path>/<slug>`.
  pub async fn build(&self) -> Result<BuildOutcome, PackError> {
    self.package(Packing::Plain).await
  }

  /// Like [`Pipeline::build`], but ship only the scripts templates reference,
  /// each bundled into a single file.
  pub async fn libpack(&self) -> Result<BuildOutcome, PackError> {
    self.package(Packing::Bundled).await
  }

  async fn package(&self, packing: Packing) -> Result<BuildOutcome, PackError> {
    let output_dir = self.config.production_dir();
    let state = PackageState::detect(self.config).await;
    if state.production_built {
      return Err(PackError::AlreadyBuilt { path: output_dir });
    }

    info!(
      slug = %self.config.project.slug,
      output = %output_dir.display(),
      bundled = packing == Packing::Bundled,
      "packaging production build"
    );

    let runner = self.runner;
    let build_dir = self.layout.build_dir();
    let scripts_dir = output_dir.join(SCRIPTS_DIR);

    runner.run(Stage::CreateOutputDir, fsops::create_dir(&output_dir)).await?;
    runner
      .run(Stage::CopyAssets, fsops::copy_tree(&self.layout.assets(), &output_dir))
      .await?;
    runner.run(Stage::CreateBuildDir, fsops::recreate_dir(&build_dir)).await?;
    self.stage_sources(&build_dir).await?;
    self.install_dependencies(&build_dir).await?;

    let bundled_scripts = match packing {
      Packing::Plain => {
        runner
          .run(Stage::CopyScripts, fsops::copy_tree(&build_dir, &scripts_dir))
          .await?;
        Vec::new()
      }
      Packing::Bundled => self.bundle_scripts(&scripts_dir).await?,
    };

    runner.run(Stage::RemoveBuildDir, fsops::remove_path(&build_dir)).await?;
    if packing == Packing::Bundled {
      runner
        .run(Stage::RemoveBundleDir, fsops::remove_path(&self.layout.bundle_dir()))
        .await?;
      runner
        .run(
          Stage::RemoveBundlerConfig,
          fsops::remove_path(&self.layout.bundler_config()),
        )
        .await?;
    }

    let manifest = Manifest::production(&self.config.project);
    runner.run(Stage::WriteManifest, manifest.write(&output_dir)).await?;

    runner.reporter().report(Event::Success(format!(
      "Production build written to {}",
      output_dir.display()
    )));
    Ok(BuildOutcome {
      output_dir,
      manifest,
      bundled_scripts,
    })
  }

  async fn bundle_scripts(&self, scripts_dir: &Path) -> Result<Vec<String>, PackError> {
    let runner = self.runner;
    let scripts = runner
      .run(Stage::CollectScripts, bundle::collect_script_names(&self.layout.templates()))
      .await?;

    if scripts.is_empty() {
      runner
        .reporter()
        .report(Event::Warning("No template references a script, nothing to bundle".to_string()));
      runner.run(Stage::CopyScripts, fsops::create_dir(scripts_dir)).await?;
      return Ok(Vec::new());
    }

    let config_file = self.layout.bundler_config();
    runner
      .run(Stage::WriteBundlerConfig, bundle::write_bundler_config(&config_file, &scripts))
      .await?;
    runner
      .run(Stage::Bundle, self.tools.bundle(self.layout.root(), &config_file))
      .await?;
    runner
      .run(Stage::CopyScripts, fsops::copy_tree(&self.layout.bundle_dir(), scripts_dir))
      .await?;

    Ok(scripts.into_iter().collect())
  }

  /// Expose the live project inside the host through `<ttpg_path>/<slug>_dev`.
  ///
  /// Safe to repeat: existing directories and links are kept, and only the
  /// manifest and the contents of `Scripts/` are refreshed.
  pub async fn dev(&self) -> Result<DevOutcome, PackError> {
    let runner = self.runner;
    let project = &self.config.project;
    let dev_name = project.dev_name();
    let staging_dir = self.layout.dev_staging(&dev_name);
    let host_link = self.config.dev_link();
    let state = PackageState::detect(self.config).await;

    info!(staging = %staging_dir.display(), link = %host_link.display(), "linking dev package");

    if !fsops::path_exists(&staging_dir).await {
      runner.run(Stage::CreateDevDir, fsops::create_dir(&staging_dir)).await?;
    }

    let pairs = ASSET_CATEGORIES
      .iter()
      .map(|category| (self.layout.asset_category(category), staging_dir.join(category)))
      .collect();
    let asset_links = runner.run(Stage::LinkAssets, link::ensure_links(pairs)).await?;
    debug!(created = asset_links.created, existing = asset_links.existing, "asset links");

    runner
      .run(Stage::WriteManifest, Manifest::development(project).write(&staging_dir))
      .await?;

    let host_link_created = if state.dev_linked {
      false
    } else {
      runner
        .run(Stage::LinkHost, link::ensure_link(&staging_dir, &host_link))
        .await?
        == LinkOutcome::Created
    };

    let scripts_dir = self.layout.dev_scripts(&dev_name);
    self.stage_sources(&scripts_dir).await?;
    self.install_dependencies(&scripts_dir).await?;

    runner.reporter().report(Event::Success(format!(
      "Dev package linked at {}",
      host_link.display()
    )));
    Ok(DevOutcome {
      staging_dir,
      host_link,
      asset_links,
      host_link_created,
    })
  }

  /// Transpile or copy the project sources into `dest`.
  async fn stage_sources(&self, dest: &Path) -> Result<(), PackError> {
    if self.config.project.transpile {
      self
        .runner
        .run(Stage::Transpile, self.tools.transpile(self.layout.root(), dest))
        .await
    } else {
      self
        .runner
        .run(Stage::CopySources, fsops::copy_tree(&self.layout.sources(), dest))
        .await
        .map(|_| ())
    }
  }

  /// Install production dependencies into `<dest>/node_modules`.
  async fn install_dependencies(&self, dest: &Path) -> Result<(), PackError> {
    self
      .runner
      .run(
        Stage::InstallDependencies,
        self
          .tools
          .install_dependencies(self.layout.root(), &dest.join(DEPENDENCIES_DIR)),
      )
      .await
  }
}
