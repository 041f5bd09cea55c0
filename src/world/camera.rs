//! Camera rig for the pseudo-3D projection.

use glam::Vec3;

/// Camera riding a fixed height above the player's road position.
#[derive(Debug, Clone)]
pub struct Camera {
    /// Height above the road surface, world units.
    pub height: f32,
    /// Horizontal field of view in degrees.
    pub fov_degrees: f32,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            height: 1000.0,
            fov_degrees: 100.0,
        }
    }
}

impl Camera {
    pub fn new(height: f32, fov_degrees: f32) -> Self {
        Self { height, fov_degrees }
    }

    /// Projection depth derived from the field of view: `1 / tan(fov / 2)`.
    pub fn depth(&self) -> f32 {
        1.0 / (self.fov_degrees.to_radians() / 2.0).tan()
    }

    /// World-space camera position for a player at lateral world offset
    /// `player_world_x`, over road elevation `road_y`, at track position
    /// `position`.
    pub fn pose(&self, player_world_x: f32, road_y: f32, position: f32) -> Vec3 {
        Vec3::new(player_world_x, road_y + self.height, position)
    }
}
