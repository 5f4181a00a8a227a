//! Output cleanup before a build.

use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CleanError {
    #[error("Refusing to clean an empty output path")]
    InvalidRoot,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Remove a generated-output root so stale pages never survive a rebuild.
///
/// An empty path is rejected before anything touches the filesystem; a root
/// that does not exist is a no-op.
pub fn clean(root: &Path) -> Result<(), CleanError> {
    if root.as_os_str().is_empty() {
        return Err(CleanError::InvalidRoot);
    }

    if root.exists() {
        tracing::debug!("Removing {:?}", root);
        std::fs::remove_dir_all(root)?;
    }

    Ok(())
}
