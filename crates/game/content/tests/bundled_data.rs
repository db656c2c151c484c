use game_content::ContentFactory;
use game_core::{BrainPreset, GameConfig};

#[test]
fn bundled_config_matches_defaults() {
    let config = ContentFactory::bundled().load_config().unwrap();
    assert_eq!(config, GameConfig::default());
}

#[test]
fn bundled_stalker_matches_builtin() {
    let catalog = ContentFactory::bundled().load_brains().unwrap();
    assert_eq!(catalog.get(BrainPreset::STALKER), Some(&BrainPreset::stalker()));
    assert!(catalog.get("listener").is_some());
}
