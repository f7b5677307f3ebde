//! Library packing: finding the scripts templates reference and generating
//! the bundler configuration that turns each into a single-file output.

use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, trace};
use walkdir::WalkDir;

use crate::consts::{BUILD_DIR, BUNDLE_DIR, HOST_SCRIPTING_API, SCRIPT_NAME_FIELD};
use crate::stage::StepError;

/// Collect the distinct, non-empty `ScriptName` values of every `.json`
/// template under `templates_dir`. A missing directory yields an empty set.
pub async fn collect_script_names(templates_dir: &Path) -> Result<BTreeSet<String>, StepError> {
  let dir = templates_dir.to_path_buf();
  let joined_dir = dir.clone();

  tokio::task::spawn_blocking(move || collect_script_names_blocking(&dir))
    .await
    .map_err(|e| StepError::Io {
      path: joined_dir,
      source: std::io::Error::other(e),
    })?
}

fn collect_script_names_blocking(templates_dir: &Path) -> Result<BTreeSet<String>, StepError> {
  let mut scripts = BTreeSet::new();
  if !templates_dir.exists() {
    debug!(dir = %templates_dir.display(), "no templates directory");
    return Ok(scripts);
  }

  for entry in WalkDir::new(templates_dir).follow_links(true) {
    let entry = entry.map_err(|e| StepError::Io {
      path: e.path().map(Path::to_path_buf).unwrap_or_else(|| templates_dir.to_path_buf()),
      source: e.into(),
    })?;
    if !entry.file_type().is_file() || !is_json(entry.path()) {
      continue;
    }

    let path = entry.path();
    let content = fs::read_to_string(path).map_err(StepError::io(path))?;
    let template: serde_json::Value = serde_json::from_str(&content).map_err(|source| StepError::Json {
      path: path.to_path_buf(),
      source,
    })?;

    if let Some(script) = template
      .get(SCRIPT_NAME_FIELD)
      .and_then(|v| v.as_str())
      .filter(|s| !s.is_empty())
    {
      trace!(template = %path.display(), script, "template references script");
      scripts.insert(script.to_string());
    }
  }

  debug!(count = scripts.len(), "collected referenced scripts");
  Ok(scripts)
}

fn is_json(path: &Path) -> bool {
  path
    .extension()
    .is_some_and(|ext| ext.eq_ignore_ascii_case("json"))
}

/// Render a bundler config holding one build per script.
///
/// Each build reads its entry from the temporary build directory and writes
/// a single self-contained CommonJS file of the same name into the bundle
/// directory. The host scripting API stays external.
pub fn render_bundler_config(scripts: &BTreeSet<String>) -> String {
  let mut out = String::from("module.exports = [\n");
  for script in scripts {
    out.push_str(&render_entry(script));
  }
  out.push_str("];\n");
  out
}

fn render_entry(script: &str) -> String {
  format!(
    concat!(
      "  {{\n",
      "    input: {input},\n",
      "    output: {{\n",
      "      file: {file},\n",
      "      format: \"cjs\",\n",
      "      exports: \"named\",\n",
      "      inlineDynamicImports: true,\n",
      "      plugins: [require(\"@rollup/plugin-terser\")()],\n",
      "    }},\n",
      "    plugins: [require(\"@rollup/plugin-node-resolve\").nodeResolve(), require(\"@rollup/plugin-commonjs\")()],\n",
      "    external: [{external}],\n",
      "  }},\n",
    ),
    input = js_string(&format!("./{}/{}", BUILD_DIR, script)),
    file = js_string(&format!("{}/{}", BUNDLE_DIR, script)),
    external = js_string(HOST_SCRIPTING_API),
  )
}

/// A JSON string literal is a valid JS string literal.
fn js_string(value: &str) -> String {
  serde_json::Value::String(value.to_string()).to_string()
}

pub async fn write_bundler_config(path: &Path, scripts: &BTreeSet<String>) -> Result<PathBuf, StepError> {
  tokio::fs::write(path, render_bundler_config(scripts))
    .await
    .map_err(StepError::io(path))?;
  Ok(path.to_path_buf())
}
