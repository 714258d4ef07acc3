//! Handing executables to the operating system.

use std::path::Path;

use crate::error::LaunchError;

/// Ask the operating environment to run or open `path`.
///
/// Only existence is checked up front; whether the file is actually
/// runnable is left to the OS.
pub fn launch(path: &Path) -> Result<(), LaunchError> {
    if !path.exists() {
        return Err(LaunchError::NotFound {
            path: path.to_path_buf(),
        });
    }

    open::that_detached(path).map_err(|source| LaunchError::Rejected {
        path: path.to_path_buf(),
        source,
    })?;

    tracing::info!(path = %path.display(), "launched");
    Ok(())
}
