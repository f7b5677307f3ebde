//! Directory links that expose a live tree somewhere else.
//!
//! # Cross-Platform
//!
//! - **Unix**: standard symlinks via `tokio::fs::symlink`
//! - **Windows**: junctions via the `junction` crate, which need no elevation

use std::io;
use std::path::{Path, PathBuf};

use tokio::task::JoinSet;
use tracing::debug;

use crate::fsops::path_exists;
use crate::stage::StepError;

/// What [`ensure_link`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkOutcome {
  Created,
  Existing,
}

/// Counts from a fan-out of [`ensure_link`] calls.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LinkSummary {
  pub created: usize,
  pub existing: usize,
}

/// Create a directory link at `link` pointing to `target`, unless something
/// already exists at `link`.
pub async fn ensure_link(target: &Path, link: &Path) -> Result<LinkOutcome, StepError> {
  if path_exists(link).await {
    debug!(link = %link.display(), "link already present");
    return Ok(LinkOutcome::Existing);
  }

  create_dir_link(target, link)
    .await
    .map_err(StepError::io(link))?;

  debug!(target = %target.display(), link = %link.display(), "created link");
  Ok(LinkOutcome::Created)
}

/// Ensure every `(target, link)` pair concurrently.
///
/// The pairs must touch disjoint paths. All pairs are attempted; the first
/// failure (in completion order) is returned.
pub async fn ensure_links(pairs: Vec<(PathBuf, PathBuf)>) -> Result<LinkSummary, StepError> {
  let mut tasks = JoinSet::new();
  for (target, link) in pairs {
    tasks.spawn(async move { ensure_link(&target, &link).await });
  }

  let mut summary = LinkSummary::default();
  let mut first_error = None;

  while let Some(joined) = tasks.join_next().await {
    let result = joined.map_err(|e| StepError::Io {
      path: PathBuf::new(),
      source: io::Error::other(e),
    });
    match result.and_then(|r| r) {
      Ok(LinkOutcome::Created) => summary.created += 1,
      Ok(LinkOutcome::Existing) => summary.existing += 1,
      Err(err) => {
        first_error.get_or_insert(err);
      }
    }
  }

  match first_error {
    Some(err) => Err(err),
    None => Ok(summary),
  }
}

#[cfg(unix)]
async fn create_dir_link(target: &Path, link: &Path) -> io::Result<()> {
  tokio::fs::symlink(target, link).await
}

#[cfg(windows)]
async fn create_dir_link(target: &Path, link: &Path) -> io::Result<()> {
  let target = target.to_path_buf();
  let link = link.to_path_buf();
  tokio::task::spawn_blocking(move || junction::create(&target, &link))
    .await
    .map_err(io::Error::other)?
}
