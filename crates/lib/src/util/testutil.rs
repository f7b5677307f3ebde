//! Test utilities for ttpgpack-lib.
//!
//! Recording doubles for the injected capabilities, fake external tools backed
//! by the platform shell, and a ready-to-use project fixture.

use std::collections::VecDeque;
use std::fs;
use std::path::PathBuf;
use std::sync::Mutex;

use tempfile::TempDir;

use crate::config::{Config, ConfigStore, Guids, LocalConfig, ProjectConfig};
use crate::consts::ASSET_CATEGORIES;
use crate::error::PackError;
use crate::layout::ProjectLayout;
use crate::report::{Event, Reporter};
use crate::setup::Prompter;
use crate::tools::{ExternalTool, Toolchain};

/// Keeps every reported event in order.
#[derive(Debug, Default)]
pub struct RecordingReporter {
  events: Mutex<Vec<Event>>,
}

impl RecordingReporter {
  pub fn events(&self) -> Vec<Event> {
    self.events.lock().unwrap().clone()
  }

  /// Text of every notice, warning and success event.
  pub fn messages(&self) -> Vec<String> {
    self
      .events()
      .into_iter()
      .filter_map(|event| match event {
        Event::Notice(msg) | Event::Warning(msg) | Event::Success(msg) => Some(msg),
        _ => None,
      })
      .collect()
  }
}

impl Reporter for RecordingReporter {
  fn report(&self, event: Event) {
    self.events.lock().unwrap().push(event);
  }
}

/// Answers questions from a fixed script and remembers what was asked.
///
/// Running out of answers is an error, so tests notice unexpected questions.
#[derive(Debug, Default)]
pub struct ScriptedPrompter {
  answers: VecDeque<String>,
  asked: Vec<String>,
}

impl ScriptedPrompter {
  pub fn new<I, S>(answers: I) -> Self
  where
    I: IntoIterator<Item = S>,
    S: Into<String>,
  {
    Self {
      answers: answers.into_iter().map(Into::into).collect(),
      asked: Vec::new(),
    }
  }

  pub fn asked(&self) -> &[String] {
    &self.asked
  }
}

impl Prompter for ScriptedPrompter {
  fn ask(&mut self, question: &str) -> Result<String, PackError> {
    self.asked.push(question.to_string());
    self.answers.pop_front().ok_or_else(|| {
      PackError::Prompt(std::io::Error::new(
        std::io::ErrorKind::UnexpectedEof,
        format!("no scripted answer for: {}", question),
      ))
    })
  }
}

/// A tool that runs `script` in the platform shell. Extra arguments are
/// positional parameters (`$1`, `$2`, ...).
#[cfg(unix)]
pub fn shell_tool(name: &str, script: &str) -> ExternalTool {
  ExternalTool::new(name, "/bin/sh").with_args(["-c", script, name])
}

#[cfg(windows)]
pub fn shell_tool(name: &str, script: &str) -> ExternalTool {
  ExternalTool::new(name, "cmd.exe").with_args(["/C", script])
}

/// Tools that produce recognizable output without node installed.
///
/// - transpiler writes `main.js` into its `--outDir`
/// - package manager creates `left-pad/index.js` in its `--modules-folder`
/// - bundler copies `build/main.js` to `lib/main.js` once its config exists
#[cfg(unix)]
pub fn fake_toolchain() -> Toolchain {
  Toolchain {
    transpiler: shell_tool(
      "tsc",
      r#"mkdir -p "$2" && printf 'console.log("compiled");\n' > "$2/main.js""#,
    ),
    package_manager: shell_tool(
      "yarn",
      r#"mkdir -p "$3/left-pad" && printf 'module.exports = 1;\n' > "$3/left-pad/index.js""#,
    ),
    bundler: shell_tool(
      "rollup",
      r#"test -f "$2" && mkdir -p lib && cp build/main.js lib/main.js"#,
    ),
  }
}

/// A tool that always exits with status 3.
#[cfg(unix)]
pub fn failing_tool(name: &str) -> ExternalTool {
  shell_tool(name, "exit 3")
}

/// A project workspace with both configs, one file per asset category, a
/// source file and a template naming a script.
pub struct Fixture {
  pub temp: TempDir,
  pub layout: ProjectLayout,
  pub store: ConfigStore,
  pub config: Config,
}

impl Fixture {
  pub fn new(transpile: bool) -> Self {
    let temp = TempDir::new().unwrap();
    let root = temp.path().join("project");
    let host = temp.path().join("host");
    fs::create_dir_all(&root).unwrap();
    fs::create_dir_all(&host).unwrap();

    let layout = ProjectLayout::new(&root).unwrap();
    let store = ConfigStore::new(&layout);
    let config = Config {
      local: LocalConfig {
        ttpg_path: dunce::canonicalize(&host).unwrap(),
      },
      project: ProjectConfig {
        name: "My Mod".to_string(),
        slug: "my-mod".to_string(),
        version: "1.0.0".to_string(),
        transpile,
        guid: Guids {
          dev: "DEV999".to_string(),
          prd: "ABC123".to_string(),
        },
        mod_id: None,
      },
    };
    store.save_local(&config.local).unwrap();
    store.save_project(&config.project).unwrap();

    for category in ASSET_CATEGORIES {
      let dir = layout.asset_category(category);
      fs::create_dir_all(&dir).unwrap();
      fs::write(dir.join(format!("{}.txt", category.to_lowercase())), category).unwrap();
    }
    fs::write(
      layout.templates().join("table.json"),
      r#"{ "Name": "Table", "ScriptName": "table.js" }"#,
    )
    .unwrap();

    fs::create_dir_all(layout.sources()).unwrap();
    fs::write(layout.sources().join("main.js"), "console.log('source');\n").unwrap();

    Self {
      temp,
      layout,
      store,
      config,
    }
  }

  pub fn host(&self) -> PathBuf {
    self.config.local.ttpg_path.clone()
  }
}
