//! Deduplication and override reconciliation.
//!
//! A full scan produces raw candidates from every source in priority order.
//! Reconciliation turns them into the sorted game list:
//!
//! 1. Keep the first candidate per name key (lowercase, whitespace removed)
//! 2. Drop candidates whose path is in the deleted set
//! 3. Sort by name, case-insensitive
//!
//! Favorites are filtered against the deleted set separately, on every read.

use std::collections::HashSet;
use std::path::Path;

use itertools::Itertools;
use serde::{Deserialize, Serialize};

use gameshelf_core::GameEntry;

/// Counts from a reconciliation pass.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReconcileStats {
    /// Raw candidates received.
    pub candidates: usize,
    /// Candidates collapsed into an earlier one with the same name key.
    pub duplicates_dropped: usize,
    /// Candidates hidden because their path is in the deleted set.
    pub suppressed: usize,
}

fn deleted_paths(deleted: &[GameEntry]) -> HashSet<&Path> {
    deleted.iter().map(|e| e.path.as_path()).collect()
}

/// Sort entries by name, case-insensitive. Stable for equal names.
pub fn sort_by_name(entries: &mut [GameEntry]) {
    entries.sort_by_cached_key(GameEntry::sort_key);
}

/// Keep the first entry per name key, preserving input order.
pub fn dedup_by_name(candidates: Vec<GameEntry>) -> Vec<GameEntry> {
    candidates.into_iter().unique_by(GameEntry::dedup_key).collect()
}

/// Build the sorted game list from raw candidates.
pub fn reconcile(candidates: Vec<GameEntry>, deleted: &[GameEntry]) -> (Vec<GameEntry>, ReconcileStats) {
    let mut stats = ReconcileStats {
        candidates: candidates.len(),
        ..ReconcileStats::default()
    };

    let unique = dedup_by_name(candidates);
    stats.duplicates_dropped = stats.candidates - unique.len();

    let hidden = deleted_paths(deleted);
    let mut games: Vec<GameEntry> = unique
        .into_iter()
        .filter(|e| !hidden.contains(e.path.as_path()))
        .collect();
    stats.suppressed = stats.candidates - stats.duplicates_dropped - games.len();

    sort_by_name(&mut games);
    (games, stats)
}

/// Favorites with every deleted path filtered out.
pub fn visible_favorites(favorites: &[GameEntry], deleted: &[GameEntry]) -> Vec<GameEntry> {
    let hidden = deleted_paths(deleted);
    favorites
        .iter()
        .filter(|e| !hidden.contains(e.path.as_path()))
        .cloned()
        .collect()
}

/// Add `found` to `games` without replacing anything.
///
/// Entries already present by path or hidden by the deleted set are skipped.
/// The result is re-sorted. Returns the number of entries added.
pub fn merge_additional(
    games: &mut Vec<GameEntry>,
    found: Vec<GameEntry>,
    deleted: &[GameEntry],
) -> usize {
    let hidden = deleted_paths(deleted);
    let mut known: HashSet<_> = games.iter().map(|e| e.path.clone()).collect();

    let before = games.len();
    for entry in found {
        if hidden.contains(entry.path.as_path()) || !known.insert(entry.path.clone()) {
            continue;
        }
        games.push(entry);
    }
    sort_by_name(games);
    games.len() - before
}
