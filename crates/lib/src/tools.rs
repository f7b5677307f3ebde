//! External tools: the source compiler, the package manager and the module bundler.
//!
//! Each tool is run to completion in the project root. Only the exit status
//! matters; output is captured and logged, never interpreted.

use std::ffi::OsStr;
use std::path::Path;
use std::process::Stdio;

use tokio::process::Command;
use tracing::{debug, error, info, warn};

use crate::stage::StepError;

/// Environment variable overriding the transpiler program.
pub const TRANSPILER_ENV: &str = "TTPG_TRANSPILER";
/// Environment variable overriding the package manager program.
pub const PACKAGE_MANAGER_ENV: &str = "TTPG_PACKAGE_MANAGER";
/// Environment variable overriding the bundler program.
pub const BUNDLER_ENV: &str = "TTPG_BUNDLER";

/// A program plus the leading arguments passed on every invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExternalTool {
  name: String,
  program: String,
  args: Vec<String>,
}

impl ExternalTool {
  pub fn new(name: impl Into<String>, program: impl Into<String>) -> Self {
    Self {
      name: name.into(),
      program: program.into(),
      args: Vec::new(),
    }
  }

  /// Fixed leading arguments, placed before the per-call ones.
  #[cfg(test)]
  pub fn with_args<I, S>(mut self, args: I) -> Self
  where
    I: IntoIterator<Item = S>,
    S: Into<String>,
  {
    self.args.extend(args.into_iter().map(Into::into));
    self
  }

  pub fn name(&self) -> &str {
    &self.name
  }

  pub fn program(&self) -> &str {
    &self.program
  }

  /// Run the tool with `extra` appended to its arguments, blocking until it exits.
  pub async fn run<I, S>(&self, extra: I, cwd: &Path) -> Result<(), StepError>
  where
    I: IntoIterator<Item = S>,
    S: AsRef<OsStr>,
  {
    let mut command = Command::new(&self.program);
    command
      .args(&self.args)
      .args(extra)
      .current_dir(cwd)
      .stdin(Stdio::null());

    info!(tool = %self.name, program = %self.program, "running tool");
    debug!(command = ?command.as_std(), cwd = %cwd.display(), "spawning process");

    let output = command.output().await.map_err(|e| {
      error!(tool = %self.name, error = %e, "failed to start tool");
      StepError::Subprocess {
        tool: self.name.clone(),
        code: None,
      }
    })?;

    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);

    if !output.status.success() {
      if !stderr.trim().is_empty() {
        warn!(tool = %self.name, stderr = %stderr.trim(), "tool stderr");
      }
      if !stdout.trim().is_empty() {
        warn!(tool = %self.name, stdout = %stdout.trim(), "tool stdout");
      }
      return Err(StepError::Subprocess {
        tool: self.name.clone(),
        code: output.status.code(),
      });
    }

    if !stdout.trim().is_empty() {
      debug!(tool = %self.name, stdout = %stdout.trim(), "tool output");
    }
    Ok(())
  }
}

/// The three external tools a workflow may call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toolchain {
  pub transpiler: ExternalTool,
  pub package_manager: ExternalTool,
  pub bundler: ExternalTool,
}

impl Default for Toolchain {
  fn default() -> Self {
    Self {
      transpiler: ExternalTool::new("tsc", node_shim("tsc")),
      package_manager: ExternalTool::new("yarn", node_shim("yarn")),
      bundler: ExternalTool::new("rollup", node_shim("rollup")),
    }
  }
}

impl Toolchain {
  /// Defaults, with programs overridden by `TTPG_TRANSPILER`,
  /// `TTPG_PACKAGE_MANAGER` and `TTPG_BUNDLER` when set.
  pub fn from_env() -> Self {
    let mut tools = Self::default();
    let overrides = [
      (TRANSPILER_ENV, &mut tools.transpiler),
      (PACKAGE_MANAGER_ENV, &mut tools.package_manager),
      (BUNDLER_ENV, &mut tools.bundler),
    ];
    for (var, tool) in overrides {
      if let Some(program) = std::env::var(var).ok().filter(|p| !p.trim().is_empty()) {
        debug!(var, program = %program, "tool overridden from environment");
        tool.program = program;
      }
    }
    tools
  }

  /// `tsc --outDir <out_dir>`
  pub async fn transpile(&self, cwd: &Path, out_dir: &Path) -> Result<(), StepError> {
    self
      .transpiler
      .run([OsStr::new("--outDir"), out_dir.as_os_str()], cwd)
      .await
  }

  /// `yarn install --modules-folder <modules_dir> --prod`
  pub async fn install_dependencies(&self, cwd: &Path, modules_dir: &Path) -> Result<(), StepError> {
    self
      .package_manager
      .run(
        [
          OsStr::new("install"),
          OsStr::new("--modules-folder"),
          modules_dir.as_os_str(),
          OsStr::new("--prod"),
        ],
        cwd,
      )
      .await
  }

  /// `rollup --config <config_file>`
  pub async fn bundle(&self, cwd: &Path, config_file: &Path) -> Result<(), StepError> {
    self
      .bundler
      .run([OsStr::new("--config"), config_file.as_os_str()], cwd)
      .await
  }
}

/// Node tools are installed as `.cmd` shims on Windows.
fn node_shim(name: &str) -> String {
  if cfg!(windows) {
    format!("{}.cmd", name)
  } else {
    name.to_string()
  }
}
