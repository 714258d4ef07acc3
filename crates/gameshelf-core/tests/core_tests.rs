use std::path::Path;

use gameshelf_core::{
    Classifier, DiscoveryConfig, GameEntry, is_likely_game_directory, name_key, resolve_name,
};

#[test]
fn test_setup_is_never_a_game() {
    let classifier = Classifier::default();
    for dir in [
        "/",
        "/home/u/Downloads/games/Setup",
        r"C:\Program Files (x86)\Steam\steamapps\common\Minecraft",
        "/opt/minecraft",
    ] {
        assert!(!classifier.is_likely_game("setup.exe", Path::new(dir)), "{dir}");
    }
}

#[test]
fn test_minecraft_variants_are_games_anywhere() {
    let classifier = Classifier::default();
    for dir in ["/", "/tmp", "/usr/share/whatever", r"D:\stuff"] {
        assert!(classifier.is_likely_game("Minecraft.exe", Path::new(dir)));
        assert!(classifier.is_likely_game("mine-craft.exe", Path::new(dir)));
    }
}

#[test]
fn test_custom_roots_from_config() {
    let config = DiscoveryConfig::builder()
        .custom_game_roots(vec![r"E:\Library".to_string()])
        .build()
        .unwrap();
    let classifier = Classifier::new(&config);

    assert!(classifier.is_likely_game("celeste.exe", Path::new(r"E:\Library\Celeste")));
    // Default roots are replaced, not extended.
    assert!(!classifier.is_likely_game("celeste.exe", Path::new("/home/u/Downloads/games/Celeste")));
}

#[test]
fn test_extra_extensions() {
    let config = DiscoveryConfig::builder()
        .executable_extensions(vec![".exe".to_string(), "x86_64".to_string()])
        .build()
        .unwrap();
    let classifier = Classifier::new(&config);

    assert!(classifier.accepts("Celeste.x86_64", Path::new("/games/steamapps/common/Celeste")));
    assert!(classifier.accepts("Celeste.exe", Path::new("/games/steamapps/common/Celeste")));
    assert!(!classifier.accepts("Celeste.sh", Path::new("/games/steamapps/common/Celeste")));
}

#[test]
fn test_name_resolution_and_keys_agree() {
    let a = GameEntry::new(resolve_name(Path::new("/g/Stardew Valley"), "sv.exe"), "/g/a.exe");
    let b = GameEntry::new(resolve_name(Path::new("/h/bin"), "StardewValley.exe"), "/h/b.exe");
    assert_eq!(a.dedup_key(), b.dedup_key());
    assert_eq!(name_key(&a.name), "stardewvalley");
}

#[test]
fn test_directory_filter_normalizes() {
    assert!(!is_likely_game_directory("Google Chrome"));
    assert!(!is_likely_game_directory("node-js"));
    assert!(is_likely_game_directory("Celeste"));
}
