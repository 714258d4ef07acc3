//! The discovered game record.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::normalize::name_key;

/// A launchable game: a display name and the executable it points at.
///
/// `path` is the durable identity used for launching and for hiding;
/// `name` is a derived, human-facing label and may collide between entries.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GameEntry {
    /// Display name.
    pub name: String,
    /// Path to the executable.
    pub path: PathBuf,
}

impl GameEntry {
    /// Create a new entry.
    pub fn new(name: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
        }
    }

    /// Key used to collapse duplicates discovered under different paths.
    pub fn dedup_key(&self) -> String {
        name_key(&self.name)
    }

    /// Key used to order entries (case-insensitive name).
    pub fn sort_key(&self) -> String {
        self.name.to_lowercase()
    }

    /// Check whether this entry points at `path`.
    pub fn is_at(&self, path: &Path) -> bool {
        self.path == path
    }
}
