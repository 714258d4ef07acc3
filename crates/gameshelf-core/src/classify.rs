//! Heuristic classification of executables and directories.
//!
//! Every comparison runs on the [`normalize`]d form of its inputs, so
//! spacing, hyphenation and case never change a decision.

use std::path::Path;

use crate::config::DiscoveryConfig;
use crate::name::is_generic_dir_name;
use crate::normalize::{normalize, normalize_path};

/// Filename fragments that mark installers, updaters, runtimes and tools.
const BLACKLIST: &[&str] = &[
    "uninstall", "install", "setup", "config", "update", "patch", "bootstrap",
    "updater", "patcher", "installer", "unins000", "repair", "redist", "vcredist",
    "directx", "dotnet", "runtime", "framework", "debug", "test", "system32",
    "msi", "dll", "editor", "tool", "utility", "crash",
];

/// Titles common enough to accept wherever they turn up.
const POPULAR_TITLES: &[&str] = &[
    "fortnite", "apex", "valorant", "csgo", "dota", "minecraft", "skyrim", "witcher",
    "gtav", "rdr2", "forza", "fifa", "nba2k", "doom", "halo", "metro", "bioshock",
    "portal", "halflife", "amongus", "hades", "stardewvalley", "eldenring", "cyberpunk",
];

/// Store and publisher library folders.
const PLATFORM_PATHS: &[&str] = &[
    "steamapps/common", "epicgames", "origingames", "ubisoft", "riotgames",
    "battle.net", "goggames", "xboxgames", "rockstargames",
];

/// Launcher plumbing that still shows up inside platform folders.
const PLATFORM_BLACKLIST: &[&str] = &["setup", "launcher", "updater", "uninstall"];

/// Directory names of well-known non-game software.
const NON_GAME_DIRS: &[&str] = &[
    "system", "windows", "program", "files", "data", "temp", "cache", "log", "config",
    "backup", "bin", "lib", "common", "shared", "runtime", "framework", "microsoft",
    "adobe", "google", "mozilla", "chrome", "nodejs", "python", "git", "docker",
    "office", "visual", "studio", "code", "notepad", "calculator", "paint", "vlc",
    "skype", "discord", "obs", "zoom",
];

fn contains_any(haystack: &str, needles: &[&str]) -> bool {
    needles.iter().any(|needle| haystack.contains(needle))
}

/// Check whether a directory name could hold a game.
///
/// Used only to prune children before a shallow scan descends into them.
pub fn is_likely_game_directory(dir_name: &str) -> bool {
    !contains_any(&normalize(dir_name), NON_GAME_DIRS)
}

/// Decides whether an executable looks like a game.
#[derive(Debug, Clone)]
pub struct Classifier {
    /// Normalized user game roots (rule 4).
    custom_roots: Vec<String>,
    /// Lowercase extensions, without the leading dot.
    extensions: Vec<String>,
}

impl Classifier {
    /// Build a classifier from discovery settings.
    pub fn new(config: &DiscoveryConfig) -> Self {
        Self {
            custom_roots: config
                .custom_game_roots
                .iter()
                .map(|root| normalize(&root.replace('\\', "/")))
                .filter(|root| !root.is_empty())
                .collect(),
            extensions: config
                .executable_extensions
                .iter()
                .map(|ext| ext.trim_start_matches('.').to_lowercase())
                .collect(),
        }
    }

    /// Check if a filename carries one of the configured executable extensions.
    pub fn is_executable(&self, file_name: &str) -> bool {
        Path::new(file_name)
            .extension()
            .map(|ext| ext.to_string_lossy().to_lowercase())
            .is_some_and(|ext| self.extensions.contains(&ext))
    }

    /// Decide whether `file_name`, found directly inside `dir`, is a game.
    ///
    /// Rules, first match wins:
    /// 1. blacklisted filename → reject
    /// 2. popular title in filename or path → accept
    /// 3. under a platform library folder, not launcher plumbing → accept
    /// 4. under a custom game root with a descriptive parent folder → accept
    /// 5. reject
    pub fn is_likely_game(&self, file_name: &str, dir: &Path) -> bool {
        let file = normalize(file_name);
        let path = normalize_path(dir);

        if contains_any(&file, BLACKLIST) {
            return false;
        }

        if contains_any(&file, POPULAR_TITLES) || contains_any(&path, POPULAR_TITLES) {
            return true;
        }

        if contains_any(&path, PLATFORM_PATHS) && !contains_any(&file, PLATFORM_BLACKLIST) {
            return true;
        }

        if self.custom_roots.iter().any(|root| path.contains(root.as_str())) {
            let parent = dir
                .file_name()
                .map(|n| n.to_string_lossy().to_lowercase())
                .unwrap_or_default();
            return parent.chars().count() > 2 && !is_generic_dir_name(&parent);
        }

        false
    }

    /// Combined check used by traversal: executable extension and game heuristics.
    pub fn accepts(&self, file_name: &str, dir: &Path) -> bool {
        self.is_executable(file_name) && self.is_likely_game(file_name, dir)
    }
}

impl Default for Classifier {
    fn default() -> Self {
        Self::new(&DiscoveryConfig::default())
    }
}
