//! Painter's-algorithm road renderer.
//!
//! Walks the visible segment window forward from the camera, projecting
//! each segment's boundary edges with the running curve offset, fills the
//! road trapezoids front to back under a moving clip row, and composites
//! the collected roadside billboards far to near afterwards. There is no
//! depth buffer: the clip row (`max_y`) alone enforces occlusion, so the
//! walk order and the skip rules below must not be reordered.

use glam::{Vec2, Vec3};

use super::camera::Camera;
use super::projection::{project, Projected, Viewport};
use super::rasterizer::Rasterizer;
use super::track::{Segment, SpriteKind, Track};

/// A billboard queued during the segment walk, drawn after the road.
#[derive(Debug, Clone, Copy)]
struct QueuedBillboard {
    kind: SpriteKind,
    x: f32,
    y: f32,
    scale: f32,
    /// Camera-space depth of the owning segment's near edge; the sort key.
    depth: f32,
    /// Clip row captured when the billboard was queued. If terrain drawn
    /// later rose above this row, the billboard is occluded.
    clip: f32,
}

/// Road renderer. Owns all per-frame scratch so the track itself stays
/// immutable after construction.
#[derive(Debug)]
pub struct RoadRenderer {
    /// Number of segments walked per frame.
    pub draw_distance: usize,
    /// Whether roadside billboards are drawn at all.
    pub draw_sprites: bool,
    /// Billboard queue, reused across frames.
    billboards: Vec<QueuedBillboard>,
}

impl RoadRenderer {
    pub fn new(draw_distance: usize) -> Self {
        Self {
            draw_distance,
            draw_sprites: true,
            billboards: Vec::new(),
        }
    }

    /// Render one frame.
    ///
    /// # Arguments
    /// * `position` - camera track position, world units along the loop
    /// * `player_x` - normalized lateral position of the player
    pub fn render(
        &mut self,
        raster: &mut dyn Rasterizer,
        track: &Track,
        camera: &Camera,
        position: f32,
        player_x: f32,
        viewport: Viewport,
    ) {
        if track.segments.is_empty() {
            return;
        }
        self.billboards.clear();

        let segment_length = track.segment_length;
        let road_width = track.road_width;
        let camera_depth = camera.depth();

        let base = track.find_segment(position);
        let base_index = base.index;
        let base_percent = position.rem_euclid(segment_length) / segment_length;
        // Road elevation directly under the car.
        let player_y = base.p1.y + (base.p2.y - base.p1.y) * base_percent;

        let cam = camera.pose(player_x * road_width, player_y, position);

        // Running curve accumulation: `x` is the lateral projection offset,
        // `dx` its per-segment increment. Seeded so the bend starts inside
        // the base segment rather than popping at its boundary.
        let mut x = 0.0_f32;
        let mut dx = -(base.curve * base_percent);
        let mut max_y = viewport.height;

        let count = track.segments.len();
        for n in 0..self.draw_distance {
            let segment = &track.segments[(base_index + n) % count];
            // Segments past the loop seam sit one track length ahead of
            // their stored z.
            let looped = segment.index < base_index;
            let cam_z = cam.z - if looped { track.track_length } else { 0.0 };

            let p1 = project(
                segment.p1,
                Vec3::new(cam.x - x, cam.y, cam_z),
                camera_depth,
                viewport,
                road_width,
            );
            let p2 = project(
                segment.p2,
                Vec3::new(cam.x - x - dx, cam.y, cam_z),
                camera_depth,
                viewport,
                road_width,
            );

            x += dx;
            dx += segment.curve;

            if self.draw_sprites {
                self.queue_billboards(segment, &p1, viewport, road_width, max_y);
            }

            // Skip: near edge at or behind the camera plane, far row at or
            // below the clip row, or a depth-inverted projection.
            if p1.camera.z <= camera_depth
                || p2.screen.y >= max_y
                || p2.screen.y >= p1.screen.y
            {
                continue;
            }

            draw_segment(raster, viewport, &p1, &p2, segment, track.lanes);
            max_y = p2.screen.y;
        }

        // Farthest billboards first so near sprites composite over them.
        self.billboards.sort_by(|a, b| b.depth.total_cmp(&a.depth));
        for bb in &self.billboards {
            if bb.y > bb.clip {
                continue;
            }
            raster.draw_billboard(bb.kind, Vec2::new(bb.x, bb.y), bb.scale);
        }
    }

    /// Queue a segment's sprites at the near edge's projection. The clip
    /// row is captured now; terrain drawn later may rise above it.
    fn queue_billboards(
        &mut self,
        segment: &Segment,
        p1: &Projected,
        viewport: Viewport,
        road_width: f32,
        max_y: f32,
    ) {
        for sprite in &segment.sprites {
            let scale = p1.screen.scale;
            let screen_x = viewport.width / 2.0
                + scale * (p1.camera.x + sprite.offset * road_width) * viewport.width / 2.0;
            self.billboards.push(QueuedBillboard {
                kind: sprite.kind,
                x: screen_x,
                y: p1.screen.y,
                scale,
                depth: p1.camera.z,
                clip: max_y,
            });
        }
    }
}

/// Fill one segment's strip: grass band, rumble strips, road surface and
/// lane dividers, in that order.
fn draw_segment(
    raster: &mut dyn Rasterizer,
    viewport: Viewport,
    p1: &Projected,
    p2: &Projected,
    segment: &Segment,
    lanes: u32,
) {
    let s1 = p1.screen;
    let s2 = p2.screen;
    let colors = &segment.colors;

    // Rumble strips and lane markers share a width: a fraction of the road
    // half-width that narrows with lane count but never below a sixth.
    let divider = (2 * lanes).max(6) as f32;
    let r1 = s1.w / divider;
    let r2 = s2.w / divider;

    // Grass spans the full viewport width between the two projected rows.
    raster.fill_rect(
        Vec2::new(0.0, s2.y),
        Vec2::new(viewport.width, s1.y),
        colors.grass,
    );

    raster.fill_quad(
        [
            Vec2::new(s1.x - s1.w - r1, s1.y),
            Vec2::new(s1.x - s1.w, s1.y),
            Vec2::new(s2.x - s2.w, s2.y),
            Vec2::new(s2.x - s2.w - r2, s2.y),
        ],
        colors.rumble,
    );
    raster.fill_quad(
        [
            Vec2::new(s1.x + s1.w + r1, s1.y),
            Vec2::new(s1.x + s1.w, s1.y),
            Vec2::new(s2.x + s2.w, s2.y),
            Vec2::new(s2.x + s2.w + r2, s2.y),
        ],
        colors.rumble,
    );

    raster.fill_quad(
        [
            Vec2::new(s1.x - s1.w, s1.y),
            Vec2::new(s1.x + s1.w, s1.y),
            Vec2::new(s2.x + s2.w, s2.y),
            Vec2::new(s2.x - s2.w, s2.y),
        ],
        colors.road,
    );

    if lanes > 1 {
        // Interior dividers, evenly spaced: lane k/lanes of the way across.
        let lane_w1 = s1.w * 2.0 / lanes as f32;
        let lane_w2 = s2.w * 2.0 / lanes as f32;
        let mut lane_x1 = s1.x - s1.w + lane_w1;
        let mut lane_x2 = s2.x - s2.w + lane_w2;
        for _ in 1..lanes {
            raster.fill_quad(
                [
                    Vec2::new(lane_x1 - r1 / 2.0, s1.y),
                    Vec2::new(lane_x1 + r1 / 2.0, s1.y),
                    Vec2::new(lane_x2 + r2 / 2.0, s2.y),
                    Vec2::new(lane_x2 - r2 / 2.0, s2.y),
                ],
                colors.lane,
            );
            lane_x1 += lane_w1;
            lane_x2 += lane_w2;
        }
    }
}
