//! String normalization used for all fuzzy comparisons.

use std::path::Path;

/// Characters dropped by [`normalize`].
const SEPARATORS: [char; 3] = [' ', '-', '_'];

/// Lowercase `s` and strip spaces, hyphens and underscores.
///
/// This is the form the classifier compares filenames, paths and keyword
/// tables in, so `"Mine-Craft"` and `"minecraft"` compare equal.
pub fn normalize(s: &str) -> String {
    s.chars()
        .filter(|c| !SEPARATORS.contains(c))
        .flat_map(char::to_lowercase)
        .collect()
}

/// Normalize a path for substring matching.
///
/// Backslashes are folded into forward slashes before [`normalize`] runs, so
/// `C:\Program Files\Epic Games` and `c:/program files/epic games` both become
/// `c:/programfiles/epicgames`.
pub fn normalize_path(path: &Path) -> String {
    normalize(&path.to_string_lossy().replace('\\', "/"))
}

/// Deduplication key for a display name: lowercase with whitespace removed.
pub fn name_key(name: &str) -> String {
    name.chars()
        .filter(|c| !c.is_whitespace())
        .flat_map(char::to_lowercase)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_strips_separators() {
        assert_eq!(normalize("Mine-Craft_Launcher X"), "minecraftlauncherx");
        assert_eq!(normalize(""), "");
    }

    #[test]
    fn test_normalize_path_folds_backslashes() {
        let path = Path::new(r"C:\Program Files\Epic Games\Fortnite");
        assert_eq!(normalize_path(path), "c:/programfiles/epicgames/fortnite");
    }

    #[test]
    fn test_name_key_keeps_hyphens() {
        assert_eq!(name_key("Half Life"), "halflife");
        assert_eq!(name_key("Half-Life"), "half-life");
    }
}
