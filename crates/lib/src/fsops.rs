//! Filesystem helpers used by pipeline stages.
//!
//! All helpers return [`StepError`] carrying the path that failed, so the
//! stage runner can report exactly where a stage broke.

use std::fs;
use std::io;
use std::path::Path;

use tracing::{debug, trace};
use walkdir::WalkDir;

use crate::stage::StepError;

/// True if anything exists at `path`, including a dangling link.
pub async fn path_exists(path: &Path) -> bool {
  tokio::fs::symlink_metadata(path).await.is_ok()
}

pub async fn create_dir(path: &Path) -> Result<(), StepError> {
  tokio::fs::create_dir_all(path).await.map_err(StepError::io(path))
}

/// Ensure `path` is an empty directory, discarding anything already there.
pub async fn recreate_dir(path: &Path) -> Result<(), StepError> {
  remove_path(path).await?;
  create_dir(path).await
}

/// Copy the contents of `from` into `to`, creating `to` if needed.
///
/// Symbolic links are followed and their targets copied as regular files
/// and directories. Returns the number of files copied.
pub async fn copy_tree(from: &Path, to: &Path) -> Result<u64, StepError> {
  let from = from.to_path_buf();
  let to = to.to_path_buf();
  let joined_to = to.clone();

  tokio::task::spawn_blocking(move || copy_tree_blocking(&from, &to))
    .await
    .map_err(|e| StepError::Io {
      path: joined_to,
      source: io::Error::other(e),
    })?
}

fn copy_tree_blocking(from: &Path, to: &Path) -> Result<u64, StepError> {
  fs::create_dir_all(to).map_err(StepError::io(to))?;

  let mut copied = 0;
  for entry in WalkDir::new(from).follow_links(true).min_depth(1) {
    let entry = entry.map_err(|e| {
      let path = e.path().map(Path::to_path_buf).unwrap_or_else(|| from.to_path_buf());
      StepError::Io {
        path,
        source: e.into(),
      }
    })?;

    let relative = entry.path().strip_prefix(from).unwrap_or(entry.path());
    let dest = to.join(relative);

    if entry.file_type().is_dir() {
      fs::create_dir_all(&dest).map_err(StepError::io(&dest))?;
    } else {
      if let Some(parent) = dest.parent() {
        fs::create_dir_all(parent).map_err(StepError::io(parent))?;
      }
      fs::copy(entry.path(), &dest).map_err(StepError::io(entry.path()))?;
      trace!(from = %entry.path().display(), to = %dest.display(), "copied file");
      copied += 1;
    }
  }

  debug!(from = %from.display(), to = %to.display(), files = copied, "copied tree");
  Ok(copied)
}

/// Remove whatever is at `path`. Links are removed without touching their
/// targets. Returns `false` if nothing was there.
pub async fn remove_path(path: &Path) -> Result<bool, StepError> {
  let metadata = match tokio::fs::symlink_metadata(path).await {
    Ok(metadata) => metadata,
    Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(false),
    Err(source) => {
      return Err(StepError::Io {
        path: path.to_path_buf(),
        source,
      });
    }
  };

  let result = if metadata.file_type().is_symlink() {
    remove_link(path).await
  } else if metadata.is_dir() {
    tokio::fs::remove_dir_all(path).await
  } else {
    tokio::fs::remove_file(path).await
  };
  result.map_err(StepError::io(path))?;

  debug!(path = %path.display(), "removed");
  Ok(true)
}

#[cfg(unix)]
async fn remove_link(path: &Path) -> io::Result<()> {
  tokio::fs::remove_file(path).await
}

/// Directory symlinks and junctions are directories to Windows.
#[cfg(windows)]
async fn remove_link(path: &Path) -> io::Result<()> {
  match tokio::fs::remove_dir(path).await {
    Ok(()) => Ok(()),
    Err(_) => tokio::fs::remove_file(path).await,
  }
}

/// Copy a single file, creating the destination's parent directory.
pub async fn copy_file(from: &Path, to: &Path) -> Result<(), StepError> {
  if let Some(parent) = to.parent() {
    create_dir(parent).await?;
  }
  tokio::fs::copy(from, to).await.map_err(StepError::io(from))?;
  Ok(())
}
