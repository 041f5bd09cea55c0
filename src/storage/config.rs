//! Application configuration persisted as TOML.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Renderer and generation settings. Everything here has a sensible
/// default; a missing config file is not an error.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Segments walked per rendered frame.
    pub draw_distance: usize,
    /// Horizontal field of view in degrees.
    pub fov_degrees: f32,
    /// Camera height above the road, world units.
    pub camera_height: f32,
    /// Seed for the roadside decoration scatter.
    pub scatter_seed: u64,
    /// Whether decoration billboards start enabled.
    pub draw_sprites: bool,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            draw_distance: 300,
            fov_degrees: 100.0,
            camera_height: 1000.0,
            scatter_seed: 42,
            draw_sprites: true,
        }
    }
}

/// Errors loading or saving the config file.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("I/O error: {0}")]
    Io(String),
    #[error("parse error: {0}")]
    Parse(String),
    #[error("serialize error: {0}")]
    Serialize(String),
}

fn config_path() -> Option<PathBuf> {
    directories::ProjectDirs::from("", "", "roadrush")
        .map(|dirs| dirs.config_dir().join("config.toml"))
}

/// Load the config from the platform config directory, falling back to
/// defaults when no file exists.
pub fn load_config() -> Result<GameConfig, ConfigError> {
    match config_path() {
        Some(path) if path.exists() => load_config_from(&path),
        _ => Ok(GameConfig::default()),
    }
}

/// Load a config from an explicit path.
pub fn load_config_from(path: &Path) -> Result<GameConfig, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|err| ConfigError::Io(err.to_string()))?;
    toml::from_str(&content).map_err(|err| ConfigError::Parse(err.to_string()))
}

/// Write the config to the platform config directory, creating it when
/// missing.
pub fn save_config(config: &GameConfig) -> Result<(), ConfigError> {
    let Some(path) = config_path() else {
        return Err(ConfigError::Io("no config directory available".into()));
    };
    save_config_to(config, &path)
}

/// Write a config to an explicit path.
pub fn save_config_to(config: &GameConfig, path: &Path) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|err| ConfigError::Io(err.to_string()))?;
    }
    let content =
        toml::to_string_pretty(config).map_err(|err| ConfigError::Serialize(err.to_string()))?;
    std::fs::write(path, content).map_err(|err| ConfigError::Io(err.to_string()))
}
