//! Enumeration of the directories a discovery pass visits.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use gameshelf_core::{DiscoveryConfig, normalize_path};

/// Store, launcher and publisher fragments that warrant a recursive walk.
const PLATFORM_KEYWORDS: &[&str] = &[
    "steam", "epic", "origin", "ubisoft", "riot", "battle.net", "gog", "games",
];

/// How a root is traversed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum TraversalMode {
    /// Depth-bounded recursive walk collecting every qualifying file.
    Deep,
    /// Immediate children only, at most one candidate per child directory.
    Shallow,
}

impl TraversalMode {
    /// Pick the mode for a root from its path.
    pub fn for_path(path: &Path) -> Self {
        let normalized = normalize_path(path);
        if PLATFORM_KEYWORDS.iter().any(|kw| normalized.contains(kw)) {
            Self::Deep
        } else {
            Self::Shallow
        }
    }
}

/// A directory to scan together with its traversal hint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanRoot {
    /// Root directory.
    pub path: PathBuf,
    /// Traversal hint derived from the path.
    pub mode: TraversalMode,
}

impl ScanRoot {
    /// Create a root, deriving its mode from the path.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let mode = TraversalMode::for_path(&path);
        Self { path, mode }
    }

    /// Short label for progress display (the directory's base name).
    pub fn label(&self) -> String {
        self.path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.path.display().to_string())
    }
}

/// Build the ordered root list for a discovery pass.
///
/// Order is: built-in install locations, the desktop, then user roots.
/// Roots that do not exist are dropped silently, as are repeats.
pub fn enumerate_roots(config: &DiscoveryConfig) -> Vec<ScanRoot> {
    let mut candidates = Vec::new();
    if config.include_well_known {
        candidates.extend(well_known_locations());
        candidates.extend(desktop_dir());
    }
    candidates.extend(config.extra_roots.iter().cloned());
    existing_roots(candidates)
}

/// Keep existing directories, in order, without repeats.
pub fn existing_roots(candidates: impl IntoIterator<Item = PathBuf>) -> Vec<ScanRoot> {
    let mut roots: Vec<ScanRoot> = Vec::new();
    for path in candidates {
        if !path.is_dir() {
            tracing::trace!(path = %path.display(), "skipping missing root");
            continue;
        }
        if roots.iter().any(|r| r.path == path) {
            continue;
        }
        roots.push(ScanRoot::new(path));
    }
    roots
}

/// The user's desktop folder.
pub fn desktop_dir() -> Option<PathBuf> {
    dirs::desktop_dir().or_else(|| dirs::home_dir().map(|home| home.join("Desktop")))
}

/// Built-in store and publisher install locations for this platform.
#[cfg(windows)]
pub fn well_known_locations() -> Vec<PathBuf> {
    let mut paths = Vec::new();
    if let Some(downloads) = dirs::download_dir() {
        paths.push(downloads.join("games"));
    }
    paths.extend(
        [
            r"D:\games",
            r"C:\Program Files (x86)\Steam\steamapps\common",
            r"C:\Program Files\Steam\steamapps\common",
            r"C:\Program Files\Epic Games",
            r"C:\Program Files (x86)\Epic Games",
            r"C:\Program Files\Origin Games",
            r"C:\Program Files (x86)\Origin Games",
            r"C:\Program Files\EA Games",
            r"C:\Program Files (x86)\EA Games",
            r"C:\Program Files\Ubisoft",
            r"C:\Program Files (x86)\Ubisoft",
            r"C:\Riot Games",
            r"C:\Program Files (x86)\Battle.net",
            r"C:\Program Files\Battle.net",
            r"C:\GOG Games",
            r"C:\Program Files\GOG Galaxy\Games",
            r"C:\XboxGames",
            r"C:\Program Files\Rockstar Games",
            r"C:\Program Files (x86)\Rockstar Games",
        ]
        .into_iter()
        .map(PathBuf::from),
    );
    paths
}

/// Built-in store and publisher install locations for this platform.
#[cfg(not(windows))]
pub fn well_known_locations() -> Vec<PathBuf> {
    let Some(home) = dirs::home_dir() else {
        return Vec::new();
    };
    let mut paths = vec![home.join("Downloads").join("games")];
    paths.extend(
        [
            ".steam/steam/steamapps/common",
            ".local/share/Steam/steamapps/common",
            ".var/app/com.valvesoftware.Steam/.local/share/Steam/steamapps/common",
            "Games",
            "GOG Games",
        ]
        .into_iter()
        .map(|rel| home.join(rel)),
    );
    paths
}
