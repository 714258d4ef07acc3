//! Display-name resolution for discovered executables.

use std::path::Path;

/// Suffixes left behind by file managers when copying or linking folders.
/// Checked in order, each at most once.
const NOISE_SUFFIXES: &[&str] = &[" - Copy", " (1)", " (2)", " (3)", " - Shortcut"];

/// Directory names that say nothing about the game inside them.
const GENERIC_DIR_NAMES: &[&str] = &["bin", "game", "common", "games", "steamapps"];

/// Check if a directory name is a generic placeholder (case-insensitive).
pub fn is_generic_dir_name(name: &str) -> bool {
    let lower = name.to_lowercase();
    GENERIC_DIR_NAMES.contains(&lower.as_str())
}

/// Derive a display name from the executable's containing directory.
///
/// The directory's base name wins unless, after stripping copy/shortcut
/// markers, it is a generic placeholder such as `bin`; then the executable's
/// file stem is used instead.
pub fn resolve_name(dir: &Path, file_name: &str) -> String {
    let mut name = dir
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();

    for suffix in NOISE_SUFFIXES {
        if let Some(stripped) = name.strip_suffix(suffix) {
            name = stripped.to_string();
        }
    }

    if name.is_empty() || is_generic_dir_name(&name) {
        return file_stem(file_name);
    }
    name
}

fn file_stem(file_name: &str) -> String {
    Path::new(file_name)
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| file_name.to_string())
}
