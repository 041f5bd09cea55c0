//! Perspective projection of world points into screen space.
//!
//! The projection is the classic pseudo-3D formula: translate into camera
//! space, divide by depth, scale to the viewport. Outputs are scratch data
//! valid for a single frame; nothing here may be cached across frames
//! because the camera moves every tick.

use glam::Vec3;

/// Viewport dimensions in pixels.
#[derive(Debug, Clone, Copy)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

/// A projected point: pixel position, projected road half-width at that
/// depth, and the raw perspective scale factor (`camera_depth / camera.z`).
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ScreenPoint {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub scale: f32,
}

/// Camera-space and screen-space images of one world point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projected {
    pub camera: Vec3,
    pub screen: ScreenPoint,
}

impl Projected {
    /// True when the point sits at or behind the camera plane. The screen
    /// fields are then meaningless (negative or unbounded scale) and the
    /// point must be skipped, never drawn.
    pub fn behind_camera(&self) -> bool {
        self.camera.z <= 0.0
    }
}

/// Project `world` through a camera at `camera_pos` with projection depth
/// `depth` (`1 / tan(fov / 2)`). Screen coordinates are rounded to whole
/// pixels.
pub fn project(
    world: Vec3,
    camera_pos: Vec3,
    depth: f32,
    viewport: Viewport,
    road_width: f32,
) -> Projected {
    let camera = world - camera_pos;
    let scale = depth / camera.z;
    let half_w = viewport.width / 2.0;
    let half_h = viewport.height / 2.0;
    let screen = ScreenPoint {
        x: (half_w + scale * camera.x * half_w).round(),
        y: (half_h - scale * camera.y * half_h).round(),
        w: (scale * road_width * half_w).round(),
        scale,
    };
    Projected { camera, screen }
}
