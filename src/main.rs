//! RoadRush - Pseudo-3D Arcade Road Racer
//!
//! Main entry point: logging, config and level loading, window bootstrap.

use std::path::Path;

use anyhow::Context;
use eframe::egui;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use roadrush::storage::{self, GameConfig, LevelData};

mod app;

const DEFAULT_LEVEL: &str = "levels/coastal_run.json";

fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting RoadRush v{}", env!("CARGO_PKG_VERSION"));

    let config = storage::load_config().unwrap_or_else(|err| {
        tracing::warn!(%err, "config load failed, using defaults");
        GameConfig::default()
    });

    let level_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| DEFAULT_LEVEL.to_string());
    let level = LevelData::load(Path::new(&level_path))
        .with_context(|| format!("loading level {level_path}"))?;
    tracing::info!(
        track = %level.track_name,
        segments = level.segment_count(),
        laps = level.total_laps,
        "level loaded"
    );

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 720.0])
            .with_min_inner_size([640.0, 480.0])
            .with_title("RoadRush"),
        ..Default::default()
    };

    eframe::run_native(
        "RoadRush",
        options,
        Box::new(move |cc| Ok(Box::new(app::RoadRushApp::new(cc, level, config)))),
    )
    .map_err(|err| anyhow::anyhow!("window loop failed: {err}"))
}
