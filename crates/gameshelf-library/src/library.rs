//! The game library: scan results plus the user's override sets.

use std::path::Path;

use serde::Serialize;

use gameshelf_core::GameEntry;

use crate::error::{Collection, LibraryError};
use crate::launch::launch;
use crate::orchestrator::ScanOutcome;
use crate::reconcile::{ReconcileStats, merge_additional, reconcile, sort_by_name, visible_favorites};
use crate::settings::Settings;
use crate::store::OverrideStore;

/// Counts shown alongside the lists.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct LibraryStats {
    /// Games in the current list.
    pub games: usize,
    /// Favorites that are not hidden.
    pub favorites: usize,
    /// Hidden games.
    pub deleted: usize,
}

/// Outcome of [`Library::toggle_favorite`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FavoriteToggle {
    Added,
    Removed,
}

/// Owns the current game list and both override collections.
///
/// The game list is regenerated by scans and never persisted. Favorites and
/// deleted entries change only through the command methods here, each of
/// which rewrites the affected document before returning.
#[derive(Debug)]
pub struct Library {
    games: Vec<GameEntry>,
    favorites: Vec<GameEntry>,
    deleted: Vec<GameEntry>,
    favorites_store: OverrideStore,
    deleted_store: OverrideStore,
}

impl Library {
    /// Open a library, loading both override documents.
    pub fn open(favorites_store: OverrideStore, deleted_store: OverrideStore) -> Self {
        let favorites = favorites_store.load();
        let deleted = deleted_store.load();
        tracing::debug!(
            favorites = favorites.len(),
            deleted = deleted.len(),
            "loaded overrides"
        );
        Self {
            games: Vec::new(),
            favorites,
            deleted,
            favorites_store,
            deleted_store,
        }
    }

    /// Open a library at the locations named by `settings`.
    pub fn from_settings(settings: &Settings) -> Self {
        Self::open(
            OverrideStore::new(settings.favorites_path()),
            OverrideStore::new(settings.deleted_path()),
        )
    }

    // --- Queries ---

    /// Current games, sorted by name.
    pub fn games(&self) -> &[GameEntry] {
        &self.games
    }

    /// Favorites with hidden games filtered out.
    pub fn favorites(&self) -> Vec<GameEntry> {
        visible_favorites(&self.favorites, &self.deleted)
    }

    /// Hidden games, in the order they were hidden.
    pub fn deleted(&self) -> &[GameEntry] {
        &self.deleted
    }

    /// Games whose name contains `query`, case-insensitive.
    pub fn search(&self, query: &str) -> Vec<GameEntry> {
        let query = query.to_lowercase();
        self.games
            .iter()
            .filter(|g| query.is_empty() || g.name.to_lowercase().contains(&query))
            .cloned()
            .collect()
    }

    /// Check whether `path` is a visible favorite.
    pub fn is_favorite(&self, path: &Path) -> bool {
        !self.is_deleted(path) && self.favorites.iter().any(|f| f.is_at(path))
    }

    /// Check whether `path` is hidden.
    pub fn is_deleted(&self, path: &Path) -> bool {
        self.deleted.iter().any(|d| d.is_at(path))
    }

    /// Look up a known entry by path in the games, favorites or deleted lists.
    pub fn find(&self, path: &Path) -> Option<&GameEntry> {
        self.games
            .iter()
            .chain(&self.favorites)
            .chain(&self.deleted)
            .find(|e| e.is_at(path))
    }

    /// Current counts.
    pub fn stats(&self) -> LibraryStats {
        LibraryStats {
            games: self.games.len(),
            favorites: self.favorites().len(),
            deleted: self.deleted.len(),
        }
    }

    // --- Scan results ---

    /// Replace the game list with the reconciled form of a full scan.
    pub fn apply_scan(&mut self, candidates: Vec<GameEntry>) -> ReconcileStats {
        let (games, stats) = reconcile(candidates, &self.deleted);
        tracing::info!(
            games = games.len(),
            duplicates = stats.duplicates_dropped,
            suppressed = stats.suppressed,
            "game list replaced"
        );
        self.games = games;
        stats
    }

    /// Adopt the game list from a background pass.
    ///
    /// The outcome was reconciled against the hidden set as it stood when the
    /// pass began; anything hidden since then is filtered out here.
    pub fn apply_outcome(&mut self, outcome: &ScanOutcome) {
        self.games = outcome
            .games
            .iter()
            .filter(|g| !self.is_deleted(&g.path))
            .cloned()
            .collect();
        tracing::info!(games = self.games.len(), "game list replaced");
    }

    /// Merge games from an ad hoc directory scan. Returns how many were added.
    pub fn merge(&mut self, found: Vec<GameEntry>) -> usize {
        merge_additional(&mut self.games, found, &self.deleted)
    }

    // --- Commands ---

    /// Star or unstar a game, then rewrite the favorites document.
    pub fn toggle_favorite(&mut self, entry: &GameEntry) -> Result<FavoriteToggle, LibraryError> {
        let toggle = if self.favorites.iter().any(|f| f.is_at(&entry.path)) {
            self.favorites.retain(|f| !f.is_at(&entry.path));
            FavoriteToggle::Removed
        } else {
            self.favorites.push(entry.clone());
            FavoriteToggle::Added
        };
        self.save_favorites()?;
        Ok(toggle)
    }

    /// Hide a game: drop it from the list and favorites, remember it as deleted.
    ///
    /// Both documents are rewritten.
    pub fn delete(&mut self, entry: &GameEntry) -> Result<(), LibraryError> {
        if !self.is_deleted(&entry.path) {
            self.deleted.push(entry.clone());
        }
        self.games.retain(|g| !g.is_at(&entry.path));
        self.favorites.retain(|f| !f.is_at(&entry.path));

        self.save_deleted()?;
        self.save_favorites()
    }

    /// Un-hide a game and put its remembered record back into the list.
    pub fn restore(&mut self, path: &Path) -> Result<GameEntry, LibraryError> {
        let index = self
            .deleted
            .iter()
            .position(|d| d.is_at(path))
            .ok_or_else(|| LibraryError::NotDeleted {
                path: path.to_path_buf(),
            })?;
        let entry = self.deleted.remove(index);
        self.deleted.retain(|d| !d.is_at(path));

        if !self.games.iter().any(|g| g.is_at(path)) {
            self.games.push(entry.clone());
            sort_by_name(&mut self.games);
        }

        self.save_deleted()?;
        Ok(entry)
    }

    /// Launch a game by path.
    pub fn launch(&self, path: &Path) -> Result<(), LibraryError> {
        Ok(launch(path)?)
    }

    fn save_favorites(&self) -> Result<(), LibraryError> {
        self.favorites_store
            .save(&self.favorites)
            .map_err(|e| LibraryError::save(Collection::Favorites, e))
    }

    fn save_deleted(&self) -> Result<(), LibraryError> {
        self.deleted_store
            .save(&self.deleted)
            .map_err(|e| LibraryError::save(Collection::Deleted, e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn open(temp: &TempDir) -> Library {
        Library::open(
            OverrideStore::new(temp.path().join("favorites.json")),
            OverrideStore::new(temp.path().join("deleted_games.json")),
        )
    }

    fn entry(name: &str, path: &str) -> GameEntry {
        GameEntry::new(name, path)
    }

    #[test]
    fn test_search() {
        let temp = TempDir::new().unwrap();
        let mut library = open(&temp);
        library.apply_scan(vec![entry("Doom Eternal", "/a"), entry("Halo", "/b")]);

        assert_eq!(library.search("doom").len(), 1);
        assert_eq!(library.search("").len(), 2);
        assert!(library.search("zelda").is_empty());
    }

    #[test]
    fn test_toggle_favorite_persists() {
        let temp = TempDir::new().unwrap();
        let mut library = open(&temp);
        let halo = entry("Halo", "/g/halo.exe");

        assert_eq!(library.toggle_favorite(&halo).unwrap(), FavoriteToggle::Added);
        assert!(library.is_favorite(&halo.path));
        assert_eq!(open(&temp).favorites(), vec![halo.clone()]);

        assert_eq!(library.toggle_favorite(&halo).unwrap(), FavoriteToggle::Removed);
        assert!(open(&temp).favorites().is_empty());
    }

    #[test]
    fn test_delete_removes_everywhere() {
        let temp = TempDir::new().unwrap();
        let mut library = open(&temp);
        let halo = entry("Halo", "/g/halo.exe");
        library.apply_scan(vec![halo.clone(), entry("Doom", "/g/doom.exe")]);
        library.toggle_favorite(&halo).unwrap();

        library.delete(&halo).unwrap();

        assert!(!library.games().contains(&halo));
        assert!(library.favorites().is_empty());
        assert_eq!(library.deleted(), &[halo.clone()]);

        let reopened = open(&temp);
        assert_eq!(reopened.deleted(), &[halo.clone()]);
        assert!(reopened.favorites().is_empty());
    }

    #[test]
    fn test_delete_twice_keeps_one_record() {
        let temp = TempDir::new().unwrap();
        let mut library = open(&temp);
        let halo = entry("Halo", "/g/halo.exe");
        library.delete(&halo).unwrap();
        library.delete(&halo).unwrap();
        assert_eq!(library.deleted().len(), 1);
    }

    #[test]
    fn test_restore_unknown_path() {
        let temp = TempDir::new().unwrap();
        let mut library = open(&temp);
        let err = library.restore(Path::new("/nope")).unwrap_err();
        assert!(matches!(err, LibraryError::NotDeleted { .. }));
    }

    #[test]
    fn test_stats() {
        let temp = TempDir::new().unwrap();
        let mut library = open(&temp);
        let halo = entry("Halo", "/g/halo.exe");
        library.apply_scan(vec![halo.clone(), entry("Doom", "/g/doom.exe")]);
        library.toggle_favorite(&halo).unwrap();
        library.delete(&entry("Apex", "/g/apex.exe")).unwrap();

        assert_eq!(
            library.stats(),
            LibraryStats {
                games: 2,
                favorites: 1,
                deleted: 1
            }
        );
    }

    #[test]
    fn test_apply_outcome_honors_later_deletes() {
        let temp = TempDir::new().unwrap();
        let mut library = open(&temp);
        let halo = entry("Halo", "/g/halo.exe");
        let outcome = ScanOutcome {
            games: vec![entry("Doom", "/g/doom.exe"), halo.clone()],
            stats: ReconcileStats::default(),
            report: Default::default(),
        };

        library.delete(&halo).unwrap();
        library.apply_outcome(&outcome);
        assert_eq!(library.games(), &[entry("Doom", "/g/doom.exe")]);
    }

    #[test]
    fn test_find() {
        let temp = TempDir::new().unwrap();
        let mut library = open(&temp);
        let apex = entry("Apex", "/g/apex.exe");
        library.delete(&apex).unwrap();
        assert_eq!(library.find(Path::new("/g/apex.exe")), Some(&apex));
        assert_eq!(library.find(Path::new("/g/other.exe")), None);
    }
}
