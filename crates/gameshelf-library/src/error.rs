//! Error types for library commands.

use std::path::PathBuf;

use strum::Display;
use thiserror::Error;

/// Which persisted override collection an error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum Collection {
    #[strum(to_string = "favorites")]
    Favorites,
    #[strum(to_string = "deleted games")]
    Deleted,
}

/// Failure reading or writing an override document.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The document could not be read or written.
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The document could not be encoded.
    #[error("Failed to encode {path}: {source}")]
    Serialize {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Failure launching a game.
#[derive(Debug, Error)]
pub enum LaunchError {
    /// The executable no longer exists.
    #[error("The game executable was not found: {path}")]
    NotFound { path: PathBuf },

    /// The operating system refused to start it.
    #[error("Failed to launch {path}: {source}")]
    Rejected {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// User-facing failure of a library command.
///
/// The process keeps running after any of these; the presentation layer
/// shows the message and carries on.
#[derive(Debug, Error)]
pub enum LibraryError {
    /// An override document could not be saved.
    #[error("Failed to save {collection}: {source}")]
    Save {
        collection: Collection,
        #[source]
        source: StoreError,
    },

    /// Launching a game failed.
    #[error(transparent)]
    Launch(#[from] LaunchError),

    /// Restore was requested for a path that is not hidden.
    #[error("Not in the deleted list: {path}")]
    NotDeleted { path: PathBuf },
}

impl LibraryError {
    pub(crate) fn save(collection: Collection, source: StoreError) -> Self {
        Self::Save { collection, source }
    }
}
