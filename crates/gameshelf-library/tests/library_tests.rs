use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use gameshelf_library::{
    DiscoveryConfig, GameEntry, Library, OverrideStore, ScanEvent, ScanOrchestrator, reconcile,
};
use gameshelf_scan::{GameScanner, ScanRoot, SteamInventory, TraversalMode};
use tempfile::TempDir;

fn touch(path: &Path) {
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, b"").unwrap();
}

fn names(games: &[GameEntry]) -> Vec<&str> {
    games.iter().map(|g| g.name.as_str()).collect()
}

fn open_library(temp: &TempDir) -> Library {
    Library::open(
        OverrideStore::new(temp.path().join("data/favorites.json")),
        OverrideStore::new(temp.path().join("data/deleted_games.json")),
    )
}

/// A deep root (`games`) and a shallow root (`shelf`).
fn fixture() -> (TempDir, PathBuf, PathBuf) {
    let temp = TempDir::new().unwrap();
    let deep = temp.path().join("games");
    let shallow = temp.path().join("shelf");

    touch(&deep.join("Halo Infinite/Halo.exe"));
    touch(&deep.join("Valve/Portal/Portal.exe"));
    touch(&deep.join("Valve/Portal/unins000.exe"));
    touch(&shallow.join("Doom/doom.exe"));
    touch(&shallow.join("Doom/doom_x64.exe"));
    touch(&shallow.join("Hades/Hades.exe"));

    (temp, deep, shallow)
}

fn scan_once(config: &DiscoveryConfig) -> Vec<GameEntry> {
    let report = GameScanner::new(config.clone()).scan();
    reconcile(report.candidates, &[]).0
}

#[test]
fn test_modes_derived_from_root_names() {
    let (_temp, deep, shallow) = fixture();
    assert_eq!(ScanRoot::new(&deep).mode, TraversalMode::Deep);
    assert_eq!(ScanRoot::new(&shallow).mode, TraversalMode::Shallow);
}

#[test]
fn test_full_pass_sorted_and_filtered() {
    let (_temp, deep, shallow) = fixture();
    let games = scan_once(&DiscoveryConfig::only_roots([deep, shallow]));
    assert_eq!(names(&games), vec!["Doom", "Hades", "Halo Infinite", "Portal"]);
}

#[test]
fn test_rescan_is_idempotent() {
    let (_temp, deep, shallow) = fixture();
    let config = DiscoveryConfig::only_roots([deep, shallow]);
    assert_eq!(scan_once(&config), scan_once(&config));
}

#[test]
fn test_shallow_takes_one_per_child() {
    let (_temp, _deep, shallow) = fixture();
    let games = scan_once(&DiscoveryConfig::only_roots([&shallow]));

    let doom: Vec<_> = games.iter().filter(|g| g.name == "Doom").collect();
    assert_eq!(doom.len(), 1);
    assert_eq!(doom[0].path, shallow.join("Doom/doom.exe"));
}

#[test]
fn test_deep_depth_bound() {
    let (_temp, deep, _shallow) = fixture();
    touch(&deep.join("a/b/Doom/Doom.exe"));

    let report = GameScanner::new(DiscoveryConfig::only_roots([&deep])).scan();
    assert!(report.candidates.iter().all(|g| g.name != "Doom"));

    let config = DiscoveryConfig {
        deep_max_depth: 3,
        ..DiscoveryConfig::only_roots([&deep])
    };
    let report = GameScanner::new(config).scan();
    assert!(report.candidates.iter().any(|g| g.name == "Doom"));
}

#[test]
fn test_roots_take_precedence_over_inventory() {
    let (temp, _deep, shallow) = fixture();
    let steam = temp.path().join("steam");
    touch(&steam.join("steamapps/common/Hades/Hades.exe"));

    let config = DiscoveryConfig {
        include_inventory: true,
        ..DiscoveryConfig::only_roots([&shallow])
    };
    let report = GameScanner::new(config)
        .with_inventory(Arc::new(SteamInventory::with_base_dir(&steam)))
        .scan();
    assert_eq!(report.inventory_candidates, 1);

    let (games, stats) = reconcile(report.candidates, &[]);
    let hades = games.iter().find(|g| g.name == "Hades").unwrap();
    assert_eq!(hades.path, shallow.join("Hades/Hades.exe"));
    assert_eq!(stats.duplicates_dropped, 1);
}

#[test]
fn test_deleted_game_stays_hidden_until_restored() {
    let (temp, deep, shallow) = fixture();
    let config = DiscoveryConfig::only_roots([deep, shallow]);
    let mut library = open_library(&temp);
    library.apply_scan(scan_once(&config));

    let hades = library
        .games()
        .iter()
        .find(|g| g.name == "Hades")
        .cloned()
        .unwrap();
    library.toggle_favorite(&hades).unwrap();
    library.delete(&hades).unwrap();

    // A fresh process sees the deletion, and a rescan does not bring it back
    let mut reopened = open_library(&temp);
    reopened.apply_scan(scan_once(&config));
    assert_eq!(names(reopened.games()), vec!["Doom", "Halo Infinite", "Portal"]);
    assert!(reopened.favorites().is_empty());
    assert!(!reopened.is_favorite(&hades.path));

    let restored = reopened.restore(&hades.path).unwrap();
    assert_eq!(restored, hades);
    assert_eq!(names(reopened.games()), vec!["Doom", "Hades", "Halo Infinite", "Portal"]);
    assert!(open_library(&temp).deleted().is_empty());
}

#[test]
fn test_merge_directory_is_additive() {
    let (temp, deep, shallow) = fixture();
    let mut library = open_library(&temp);
    library.apply_scan(scan_once(&DiscoveryConfig::only_roots([&shallow])));

    let extra = temp.path().join("extra");
    touch(&extra.join("Skyrim/SkyrimSE.exe"));
    touch(&extra.join("Portal 2/portal2.exe"));
    library
        .delete(&GameEntry::new("Portal 2", extra.join("Portal 2/portal2.exe")))
        .unwrap();

    let scanner = GameScanner::new(DiscoveryConfig::only_roots([&deep]));
    let found = scanner.scan_directory(&extra).unwrap();
    assert_eq!(found.candidates.len(), 2);

    assert_eq!(library.merge(found.candidates.clone()), 1);
    assert_eq!(library.merge(found.candidates), 0);
    assert_eq!(names(library.games()), vec!["Doom", "Hades", "Skyrim"]);
}

#[tokio::test]
async fn test_orchestrated_pass_feeds_library() {
    let (temp, deep, shallow) = fixture();
    let mut library = open_library(&temp);
    let orchestrator = ScanOrchestrator::new(DiscoveryConfig::only_roots([deep, shallow]));

    let mut events = orchestrator.start_scan(library.deleted().to_vec()).unwrap();
    let mut progress = Vec::new();
    while let Some(event) = events.recv().await {
        match event {
            ScanEvent::Progress(p) => progress.push(p.root_index),
            ScanEvent::Completed(outcome) => library.apply_outcome(&outcome),
            ScanEvent::Failed(message) => panic!("{message}"),
        }
    }

    assert_eq!(progress, vec![1, 2]);
    assert_eq!(library.stats().games, 4);
    assert!(!orchestrator.is_scanning());
}
