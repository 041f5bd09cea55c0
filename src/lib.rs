//! RoadRush - Pseudo-3D Arcade Road Racer
//!
//! Projects a procedurally segmented 1D track onto the screen with the
//! classic curve-accumulation technique and simulates an arcade vehicle
//! with checkpoint timing, lap counting and roadside collisions. The
//! drawing surface and input devices sit behind small seams (`Rasterizer`,
//! `Controls`) so the core runs anywhere the host can fill a polygon.

pub mod input;
pub mod racing;
pub mod storage;
pub mod world;

// Re-export commonly used types
pub use input::Controls;
pub use storage::{GameConfig, LevelData};
pub use world::{World, SIM_STEP};
