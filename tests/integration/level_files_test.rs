//! Integration tests for level and config files on disk.

use std::path::Path;

use roadrush::storage::config::{load_config_from, save_config_to, GameConfig};
use roadrush::storage::level::{LevelData, LevelError};

#[test]
fn test_level_round_trips_through_a_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("test_level.json");

    std::fs::write(
        &path,
        r#"{
            "trackName": "Disk Track",
            "segmentLength": 150,
            "roadWidth": 1800,
            "lanes": 2,
            "initialTime": 45,
            "roadData": [
                { "length": 40 },
                { "length": 20, "curveStrength": -3 }
            ],
            "checkpoints": [{ "segmentIndex": 30, "timeBonus": 8 }]
        }"#,
    )
    .unwrap();

    let level = LevelData::load(&path).unwrap();
    assert_eq!(level.track_name, "Disk Track");
    assert_eq!(level.segment_count(), 60);
    assert_eq!(level.lanes, 2);
    assert_eq!(level.checkpoints.len(), 1);
}

#[test]
fn test_missing_level_file_is_an_io_error() {
    let result = LevelData::load(Path::new("/nonexistent/level.json"));
    assert!(matches!(result, Err(LevelError::Io(_))));
}

#[test]
fn test_config_round_trips_through_a_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("config.toml");

    let config = GameConfig {
        draw_distance: 120,
        fov_degrees: 90.0,
        camera_height: 800.0,
        scatter_seed: 1234,
        draw_sprites: false,
    };
    save_config_to(&config, &path).unwrap();

    let loaded = load_config_from(&path).unwrap();
    assert_eq!(loaded.draw_distance, 120);
    assert_eq!(loaded.fov_degrees, 90.0);
    assert_eq!(loaded.camera_height, 800.0);
    assert_eq!(loaded.scatter_seed, 1234);
    assert!(!loaded.draw_sprites);
}

#[test]
fn test_shipped_level_is_valid() {
    let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("levels/coastal_run.json");
    let level = LevelData::load(&path).unwrap();
    assert_eq!(level.track_name, "Coastal Run");
    assert!(level.segment_count() > 50, "shipped track fits both banners");
    for cp in &level.checkpoints {
        assert!(cp.segment_index < level.segment_count());
    }
}
