//! Persistent user settings stored in a config file.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use gameshelf_core::DiscoveryConfig;

/// File name of the favorites document.
pub const FAVORITES_FILE: &str = "favorites.json";

/// File name of the deleted-games document.
pub const DELETED_FILE: &str = "deleted_games.json";

/// User settings loaded from `config.toml`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Where favorites and deleted documents live. Defaults to the platform data dir.
    pub data_dir: Option<PathBuf>,
    /// Discovery configuration.
    pub discovery: DiscoveryConfig,
}

impl Settings {
    /// Get the default config file path.
    pub fn config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("gameshelf").join("config.toml"))
    }

    /// Load settings from the default location, or return defaults.
    pub fn load() -> Self {
        Self::config_path()
            .map(|path| Self::load_from(&path))
            .unwrap_or_default()
    }

    /// Load settings from `path`, or return defaults.
    ///
    /// A missing file is silent; an unreadable or malformed one is logged.
    pub fn load_from(path: &Path) -> Self {
        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(err) => {
                if err.kind() != std::io::ErrorKind::NotFound {
                    tracing::warn!(path = %path.display(), error = %err, "failed to read settings");
                }
                return Self::default();
            }
        };

        toml::from_str(&content).unwrap_or_else(|err| {
            tracing::warn!(path = %path.display(), error = %err, "malformed settings, using defaults");
            Self::default()
        })
    }

    /// Save settings to `path`.
    pub fn save_to(&self, path: &Path) -> std::io::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;

        std::fs::write(path, content)
    }

    /// Directory holding the override documents.
    pub fn data_dir(&self) -> PathBuf {
        self.data_dir.clone().unwrap_or_else(|| {
            dirs::data_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join("gameshelf")
        })
    }

    /// Path of the favorites document.
    pub fn favorites_path(&self) -> PathBuf {
        self.data_dir().join(FAVORITES_FILE)
    }

    /// Path of the deleted-games document.
    pub fn deleted_path(&self) -> PathBuf {
        self.data_dir().join(DELETED_FILE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_partial_file_keeps_defaults() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.toml");
        std::fs::write(
            &path,
            "data_dir = \"/srv/shelf\"\n\n[discovery]\ndeep_max_depth = 4\n",
        )
        .unwrap();

        let settings = Settings::load_from(&path);
        assert_eq!(settings.data_dir, Some(PathBuf::from("/srv/shelf")));
        assert_eq!(settings.discovery.deep_max_depth, 4);
        assert_eq!(settings.discovery.executable_extensions, vec!["exe".to_string()]);
        assert_eq!(settings.favorites_path(), PathBuf::from("/srv/shelf/favorites.json"));
    }

    #[test]
    fn test_malformed_file_uses_defaults() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.toml");
        std::fs::write(&path, "discovery = 12").unwrap();
        assert_eq!(Settings::load_from(&path), Settings::default());
    }

    #[test]
    fn test_round_trip() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("sub/config.toml");
        let mut settings = Settings::default();
        settings.discovery.extra_roots.push(PathBuf::from("/mnt/games"));

        settings.save_to(&path).unwrap();
        assert_eq!(Settings::load_from(&path), settings);
    }
}
