//! First-run creation of the config documents and asset directories.
//!
//! Questions are asked through an injected [`Prompter`], so the same logic
//! serves the interactive CLI and scripted tests.

use std::path::PathBuf;

use tracing::info;

use crate::config::{ConfigStore, Guids, LocalConfig, ProjectConfig};
use crate::consts::{ASSET_CATEGORIES, DEFAULT_VERSION};
use crate::error::PackError;
use crate::fsops;
use crate::guid;
use crate::layout::ProjectLayout;
use crate::platform::suggested_host_path;
use crate::report::{Event, Reporter};
use crate::stage::{Stage, StageRunner, StepError};

/// Source of answers to setup and confirmation questions.
pub trait Prompter {
  /// Ask `question` and return the trimmed answer. An empty string means
  /// the user accepted the default.
  fn ask(&mut self, question: &str) -> Result<String, PackError>;

  fn confirm(&mut self, question: &str) -> Result<bool, PackError> {
    let answer = self.ask(&format!("{} (y/n)? ", question))?;
    Ok(matches!(answer.to_ascii_lowercase().as_str(), "y" | "yes"))
  }
}

/// What [`run_setup`] had to create.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SetupOutcome {
  pub local_created: bool,
  pub project_created: bool,
  pub asset_dirs_created: bool,
}

/// Create whatever is missing: local config, project config, asset directories.
pub async fn run_setup(
  layout: &ProjectLayout,
  store: &ConfigStore,
  prompter: &mut dyn Prompter,
  reporter: &dyn Reporter,
) -> Result<SetupOutcome, PackError> {
  let local_created = ensure_local_config(store, prompter, reporter)?;
  let project_created = ensure_project_config(store, prompter, reporter)?;
  let asset_dirs_created = ensure_asset_dirs(layout, reporter).await?;

  Ok(SetupOutcome {
    local_created,
    project_created,
    asset_dirs_created,
  })
}

/// Ask for the host path and write the local config, unless it exists.
pub fn ensure_local_config(
  store: &ConfigStore,
  prompter: &mut dyn Prompter,
  reporter: &dyn Reporter,
) -> Result<bool, PackError> {
  if store.has_local() {
    reporter.report(Event::Success("Local config found".to_string()));
    return Ok(false);
  }
  reporter.report(Event::Warning("Local config is missing".to_string()));

  let suggestion = suggested_host_path();
  let question = match &suggestion {
    Some(path) => format!("What is your TTPG path [{}]: ", path.display()),
    None => "What is your TTPG path: ".to_string(),
  };

  let answer = prompter.ask(&question)?;
  let ttpg_path = if answer.is_empty() {
    suggestion.ok_or_else(|| PackError::Setup("ttpg_path is required".to_string()))?
  } else {
    PathBuf::from(answer)
  };

  store.save_local(&LocalConfig { ttpg_path })?;
  info!(path = %store.local_path().display(), "created local config");
  reporter.report(Event::Success("Local config created".to_string()));
  Ok(true)
}

/// Ask for the project identity and write the project config, unless it exists.
pub fn ensure_project_config(
  store: &ConfigStore,
  prompter: &mut dyn Prompter,
  reporter: &dyn Reporter,
) -> Result<bool, PackError> {
  if store.has_project() {
    reporter.report(Event::Success("Project config found".to_string()));
    return Ok(false);
  }
  reporter.report(Event::Warning("Project config is missing".to_string()));

  let name = prompter.ask("What is your package's title? ")?;
  if name.is_empty() {
    return Err(PackError::Setup("project title is required".to_string()));
  }

  let slug = ask_with_default(
    prompter,
    "Provide a 'slug' identifier for your project",
    &suggest_slug(&name),
  )?;
  let version = ask_with_default(prompter, "Provide a version for your package", DEFAULT_VERSION)?;
  let prd = ask_with_default(
    prompter,
    "Provide a production GUID for your package (or 'enter' to use the provided value)",
    &guid::generate(),
  )?;
  let dev = ask_with_default(
    prompter,
    "Provide a development GUID for your package (or 'enter' to use the provided value)",
    &guid::generate(),
  )?;
  let language = ask_with_default(prompter, "Are you using TypeScript or JavaScript?", "typescript")?;

  let config = ProjectConfig {
    name,
    slug,
    version,
    transpile: !language.eq_ignore_ascii_case("javascript"),
    guid: Guids { dev, prd },
    mod_id: None,
  };
  store.save_project(&config)?;

  info!(slug = %config.slug, transpile = config.transpile, "created project config");
  reporter.report(Event::Success("Project config created".to_string()));
  Ok(true)
}

/// Create the asset-category directories when the asset root is missing.
pub async fn ensure_asset_dirs(layout: &ProjectLayout, reporter: &dyn Reporter) -> Result<bool, PackError> {
  if fsops::path_exists(&layout.assets()).await {
    return Ok(false);
  }

  let runner = StageRunner::new(reporter);
  runner
    .run(Stage::CreateAssetDirs, async {
      for category in ASSET_CATEGORIES {
        fsops::create_dir(&layout.asset_category(category)).await?;
      }
      Ok::<_, StepError>(())
    })
    .await?;
  Ok(true)
}

fn ask_with_default(prompter: &mut dyn Prompter, question: &str, default: &str) -> Result<String, PackError> {
  let answer = prompter.ask(&format!("{} [{}]: ", question, default))?;
  if answer.is_empty() {
    Ok(default.to_string())
  } else {
    Ok(answer)
  }
}

/// Lowercase `title` with every non-word character replaced by `-`.
pub fn suggest_slug(title: &str) -> String {
  title
    .to_lowercase()
    .chars()
    .map(|c| if c.is_ascii_alphanumeric() || c == '_' { c } else { '-' })
    .collect()
}
