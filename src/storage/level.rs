//! Level data: the declarative description a track is built from.
//!
//! Levels are JSON files with camelCase keys. They are read once at
//! startup and validated eagerly: a malformed level is a hard error, in
//! contrast to the frame loop which never fails.

use serde::{Deserialize, Serialize};
use std::path::Path;

/// One stretch of road in a level file.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoadSectionData {
    /// Number of segments in the stretch.
    pub length: usize,
    /// Signed per-segment curvature; 0 (the default) is straight.
    #[serde(default)]
    pub curve_strength: f32,
    /// Elevation change across the stretch; 0 (the default) is flat.
    #[serde(default)]
    pub height_change: f32,
}

/// A timed checkpoint in a level file.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckpointData {
    pub segment_index: usize,
    /// Seconds added to the race clock.
    pub time_bonus: f32,
}

/// Complete level description.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LevelData {
    pub track_name: String,
    /// World-space length of one segment.
    pub segment_length: f32,
    /// Road half-width in world units.
    pub road_width: f32,
    pub lanes: u32,
    /// Backdrop color above the horizon, `#RRGGBB`.
    #[serde(default = "default_fog_color")]
    pub fog_color: String,
    /// Starting race clock, seconds.
    pub initial_time: f32,
    #[serde(default = "default_total_laps")]
    pub total_laps: u32,
    pub road_data: Vec<RoadSectionData>,
    #[serde(default)]
    pub checkpoints: Vec<CheckpointData>,
}

fn default_fog_color() -> String {
    "#72D7EE".to_string()
}

fn default_total_laps() -> u32 {
    3
}

/// Errors loading or validating a level file.
#[derive(Debug, thiserror::Error)]
pub enum LevelError {
    #[error("failed to read level file: {0}")]
    Io(String),
    #[error("failed to parse level file: {0}")]
    Parse(String),
    #[error("invalid level: {0}")]
    Invalid(String),
}

impl LevelData {
    /// Read and validate a level file.
    pub fn load(path: &Path) -> Result<LevelData, LevelError> {
        let content =
            std::fs::read_to_string(path).map_err(|err| LevelError::Io(err.to_string()))?;
        Self::from_json(&content)
    }

    /// Parse and validate level JSON.
    pub fn from_json(json: &str) -> Result<LevelData, LevelError> {
        let level: LevelData =
            serde_json::from_str(json).map_err(|err| LevelError::Parse(err.to_string()))?;
        level.validate()?;
        Ok(level)
    }

    /// Total number of segments the road sections expand to.
    pub fn segment_count(&self) -> usize {
        self.road_data.iter().map(|section| section.length).sum()
    }

    fn validate(&self) -> Result<(), LevelError> {
        if self.segment_length <= 0.0 {
            return Err(LevelError::Invalid("segmentLength must be positive".into()));
        }
        if self.road_width <= 0.0 {
            return Err(LevelError::Invalid("roadWidth must be positive".into()));
        }
        if self.lanes == 0 {
            return Err(LevelError::Invalid("lanes must be at least 1".into()));
        }
        if self.total_laps == 0 {
            return Err(LevelError::Invalid("totalLaps must be at least 1".into()));
        }
        if self.initial_time <= 0.0 {
            return Err(LevelError::Invalid("initialTime must be positive".into()));
        }
        let segments = self.segment_count();
        if segments == 0 {
            return Err(LevelError::Invalid(
                "roadData must produce at least one segment".into(),
            ));
        }
        for cp in &self.checkpoints {
            if cp.segment_index >= segments {
                return Err(LevelError::Invalid(format!(
                    "checkpoint at segment {} is beyond the track ({} segments)",
                    cp.segment_index, segments
                )));
            }
        }
        Ok(())
    }
}
