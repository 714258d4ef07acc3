//! Whole-document persistence of override collections.

use std::fs;
use std::path::{Path, PathBuf};

use gameshelf_core::GameEntry;

use crate::error::StoreError;

/// A JSON document holding a list of `{name, path}` records.
///
/// The document is always read and written whole.
#[derive(Debug, Clone)]
pub struct OverrideStore {
    path: PathBuf,
}

impl OverrideStore {
    /// Create a store backed by `path`. Nothing is read until [`load`](Self::load).
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path of the backing document.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the collection.
    ///
    /// A missing document is an empty collection. A document that cannot be
    /// read or parsed is logged and also treated as empty.
    pub fn load(&self) -> Vec<GameEntry> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Vec::new(),
            Err(err) => {
                tracing::warn!(path = %self.path.display(), error = %err, "failed to read overrides");
                return Vec::new();
            }
        };

        match serde_json::from_str(&content) {
            Ok(entries) => entries,
            Err(err) => {
                tracing::warn!(path = %self.path.display(), error = %err, "malformed overrides, ignoring");
                Vec::new()
            }
        }
    }

    /// Replace the document with `entries`.
    pub fn save(&self, entries: &[GameEntry]) -> Result<(), StoreError> {
        let io_err = |source| StoreError::Io {
            path: self.path.clone(),
            source,
        };

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(io_err)?;
        }

        let content =
            serde_json::to_string_pretty(entries).map_err(|source| StoreError::Serialize {
                path: self.path.clone(),
                source,
            })?;

        fs::write(&self.path, content).map_err(io_err)
    }
}
