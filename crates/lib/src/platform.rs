//! Platform-specific defaults.

use std::path::PathBuf;

/// Default host package directory offered during setup.
#[cfg(target_os = "macos")]
pub fn suggested_host_path() -> Option<PathBuf> {
  let home = std::env::var_os("HOME")?;
  Some(
    PathBuf::from(home)
      .join("Library")
      .join("Application Support")
      .join("Epic")
      .join("TabletopPlayground")
      .join("Package"),
  )
}

/// Default host package directory offered during setup.
#[cfg(windows)]
pub fn suggested_host_path() -> Option<PathBuf> {
  Some(PathBuf::from(
    r"C:\Program Files (x86)\Steam\steamapps\common\TabletopPlayground\TabletopPlayground\PersistentDownloadDir",
  ))
}

/// Default host package directory offered during setup.
#[cfg(not(any(windows, target_os = "macos")))]
pub fn suggested_host_path() -> Option<PathBuf> {
  None
}
