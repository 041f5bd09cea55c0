//! Unit tests for the road renderer: curve accumulation, clipping and
//! billboard compositing, observed through a recording rasterizer.

use glam::{Vec2, Vec3};
use roadrush::world::camera::Camera;
use roadrush::world::projection::{project, Viewport};
use roadrush::world::rasterizer::{Rasterizer, Rgb};
use roadrush::world::renderer::RoadRenderer;
use roadrush::world::track::{ColorScheme, Segment, Sprite, SpriteKind, Track};

const SEGMENT_LENGTH: f32 = 200.0;
const ROAD_WIDTH: f32 = 2000.0;
const VIEWPORT: Viewport = Viewport {
    width: 640.0,
    height: 480.0,
};

/// Recorded draw command.
#[derive(Debug, Clone, PartialEq)]
enum Command {
    Rect {
        min: Vec2,
        max: Vec2,
        color: Rgb,
    },
    Quad {
        corners: [Vec2; 4],
        color: Rgb,
    },
    Billboard {
        kind: SpriteKind,
        pos: Vec2,
        scale: f32,
    },
}

#[derive(Debug, Default)]
struct RecordingRasterizer {
    commands: Vec<Command>,
}

impl RecordingRasterizer {
    fn road_quads(&self) -> Vec<&[Vec2; 4]> {
        self.commands
            .iter()
            .filter_map(|cmd| match cmd {
                Command::Quad { corners, color } if *color == ColorScheme::LIGHT.road => {
                    Some(corners)
                }
                _ => None,
            })
            .collect()
    }

    fn billboards(&self) -> Vec<(SpriteKind, Vec2, f32)> {
        self.commands
            .iter()
            .filter_map(|cmd| match cmd {
                Command::Billboard { kind, pos, scale } => Some((*kind, *pos, *scale)),
                _ => None,
            })
            .collect()
    }
}

impl Rasterizer for RecordingRasterizer {
    fn fill_rect(&mut self, min: Vec2, max: Vec2, color: Rgb) {
        self.commands.push(Command::Rect { min, max, color });
    }

    fn fill_quad(&mut self, corners: [Vec2; 4], color: Rgb) {
        self.commands.push(Command::Quad { corners, color });
    }

    fn draw_billboard(&mut self, kind: SpriteKind, pos: Vec2, scale: f32) {
        self.commands.push(Command::Billboard { kind, pos, scale });
    }
}

/// Build a track with per-segment curve and boundary elevation functions.
/// `boundary_y(i)` is the elevation at boundary i, so consecutive segments
/// always join.
fn build_track(
    count: usize,
    curve: impl Fn(usize) -> f32,
    boundary_y: impl Fn(usize) -> f32,
) -> Track {
    let segments = (0..count)
        .map(|n| Segment {
            index: n,
            p1: Vec3::new(0.0, boundary_y(n), n as f32 * SEGMENT_LENGTH),
            p2: Vec3::new(0.0, boundary_y(n + 1), (n + 1) as f32 * SEGMENT_LENGTH),
            curve: curve(n),
            colors: ColorScheme::LIGHT,
            sprites: Vec::new(),
        })
        .collect();
    Track::new(segments, SEGMENT_LENGTH, ROAD_WIDTH, 3)
}

fn render(track: &Track, position: f32, player_x: f32, draw_distance: usize) -> RecordingRasterizer {
    let mut renderer = RoadRenderer::new(draw_distance);
    let mut raster = RecordingRasterizer::default();
    renderer.render(
        &mut raster,
        track,
        &Camera::default(),
        position,
        player_x,
        VIEWPORT,
    );
    raster
}

#[test]
fn test_render_is_deterministic() {
    let track = build_track(40, |n| (n as f32 * 0.37).sin() * 3.0, |i| (i as f32 * 0.21).cos() * 400.0);
    let a = render(&track, 730.0, -0.4, 30);
    let b = render(&track, 730.0, -0.4, 30);
    assert!(!a.commands.is_empty());
    assert_eq!(a.commands, b.commands);
}

#[test]
fn test_straight_road_stays_centered() {
    let track = build_track(40, |_| 0.0, |_| 0.0);
    let raster = render(&track, 0.0, 0.0, 30);
    for quad in raster.road_quads() {
        let near_center = (quad[0].x + quad[1].x) / 2.0;
        assert_eq!(near_center, VIEWPORT.width / 2.0);
    }
}

#[test]
fn test_curve_accumulation_bends_quadratically() {
    // Straight for two segments, then constant curvature. The projection
    // offset used for segment n is the running sum of the running sum of
    // curve values: 0, 0, 0, 0, c, 3c, 6c, 10c, ...
    let curve = 2.0;
    let track = build_track(40, |n| if n < 2 { 0.0 } else { curve }, |_| 0.0);
    let raster = render(&track, 0.0, 0.0, 30);

    // Independently accumulate the expected offsets.
    let mut expected = Vec::new();
    let (mut x, mut dx) = (0.0_f32, 0.0_f32);
    for n in 0..30 {
        expected.push(x);
        x += dx;
        dx += track.segments[n].curve;
    }

    let camera = Camera::default();
    let quads = raster.road_quads();
    assert!(quads.len() > 10);
    // The first drawn segment on this flat track is the first whose far
    // row clears the viewport bottom; find it by matching near rows.
    for quad in quads {
        let near_y = quad[0].y;
        let near_center = (quad[0].x + quad[1].x) / 2.0;
        // Find which segment this row belongs to by reprojecting.
        let segment = (1..30)
            .find(|&n| {
                let p = project(
                    track.segments[n].p1,
                    Vec3::new(-expected[n], camera.height, 0.0),
                    camera.depth(),
                    VIEWPORT,
                    ROAD_WIDTH,
                );
                p.screen.y == near_y
            })
            .expect("drawn quad should match a projected segment row");
        let p = project(
            track.segments[segment].p1,
            Vec3::new(-expected[segment], camera.height, 0.0),
            camera.depth(),
            VIEWPORT,
            ROAD_WIDTH,
        );
        assert_eq!(near_center, p.screen.x, "segment {segment} bent wrong");
    }
}

#[test]
fn test_far_rows_decrease_monotonically() {
    // The far row of each drawn segment becomes the clip row for the next,
    // so drawn far rows must strictly decrease.
    let track = build_track(60, |_| 0.0, |i| (i as f32 * 0.4).sin() * 300.0);
    let raster = render(&track, 410.0, 0.2, 40);
    let far_rows: Vec<f32> = raster.road_quads().iter().map(|q| q[2].y).collect();
    assert!(far_rows.len() > 2);
    for pair in far_rows.windows(2) {
        assert!(pair[1] < pair[0], "far rows {pair:?} not strictly decreasing");
    }
}

#[test]
fn test_base_segment_is_never_drawn() {
    // The segment under the camera projects at or behind the camera plane
    // and must be skipped rather than drawn with a degenerate scale.
    let track = build_track(40, |_| 0.0, |_| 0.0);
    let raster = render(&track, 0.0, 0.0, 30);

    // Row of the nearest segment that can legally draw, per the projection.
    let camera = Camera::default();
    let quads = raster.road_quads();
    let nearest_drawn_row = quads
        .iter()
        .map(|q| q[0].y)
        .fold(f32::NEG_INFINITY, f32::max);
    let segment_zero_row = project(
        track.segments[0].p1,
        Vec3::new(0.0, camera.height, 0.0),
        camera.depth(),
        VIEWPORT,
        ROAD_WIDTH,
    )
    .screen
    .y;
    assert!(nearest_drawn_row < segment_zero_row);
}

#[test]
fn test_billboards_sorted_far_to_near_and_clipped() {
    let mut track = build_track(40, |_| 0.0, |_| 0.0);
    // Below the viewport bottom: queued with a clip row it cannot pass.
    track.segments[2].sprites.push(Sprite {
        kind: SpriteKind::Business,
        offset: 2.5,
    });
    track.segments[8].sprites.push(Sprite {
        kind: SpriteKind::Tree,
        offset: 1.6,
    });
    track.segments[12].sprites.push(Sprite {
        kind: SpriteKind::Rock,
        offset: -1.3,
    });

    let raster = render(&track, 0.0, 0.0, 30);
    let billboards = raster.billboards();
    let kinds: Vec<SpriteKind> = billboards.iter().map(|(kind, _, _)| *kind).collect();

    // Farthest first; the sprite below the clip row never draws.
    assert_eq!(kinds, vec![SpriteKind::Rock, SpriteKind::Tree]);
    // Nearer sprites project larger.
    assert!(billboards[1].2 > billboards[0].2);
}

#[test]
fn test_terrain_behind_a_crest_is_occluded() {
    // Climb to a crest above camera height, then drop away. Segments on
    // the far side project below the crest's row and must be skipped, and
    // a sprite on them must be culled by its captured clip row.
    let crest = 20;
    let mut track = build_track(
        60,
        |_| 0.0,
        move |i| {
            if i <= crest {
                i as f32 * 80.0
            } else {
                crest as f32 * 80.0 - (i - crest) as f32 * 80.0
            }
        },
    );
    track.segments[30].sprites.push(Sprite {
        kind: SpriteKind::Church,
        offset: 2.0,
    });
    track.segments[10].sprites.push(Sprite {
        kind: SpriteKind::Tree,
        offset: 1.8,
    });

    let raster = render(&track, 0.0, 0.0, 40);
    let kinds: Vec<SpriteKind> = raster.billboards().iter().map(|(k, _, _)| *k).collect();
    assert!(kinds.contains(&SpriteKind::Tree));
    assert!(
        !kinds.contains(&SpriteKind::Church),
        "sprite behind the crest must be occluded"
    );

    // Fewer segments draw than on flat ground with the same window.
    let flat = render(&build_track(60, |_| 0.0, |_| 0.0), 0.0, 0.0, 40);
    assert!(raster.road_quads().len() < flat.road_quads().len());
}

#[test]
fn test_draw_order_within_a_segment() {
    // Grass, two rumbles, road, then lane dividers: five lane-count-driven
    // commands per drawn segment strip with three lanes.
    let track = build_track(40, |_| 0.0, |_| 0.0);
    let raster = render(&track, 0.0, 0.0, 10);

    let mut i = 0;
    let commands = &raster.commands;
    while i < commands.len() {
        match &commands[i] {
            Command::Rect { color, .. } => {
                assert_eq!(*color, ColorScheme::LIGHT.grass);
                let strip: Vec<&Rgb> = commands[i + 1..i + 6]
                    .iter()
                    .map(|cmd| match cmd {
                        Command::Quad { color, .. } => color,
                        other => panic!("expected quad, got {other:?}"),
                    })
                    .collect();
                assert_eq!(*strip[0], ColorScheme::LIGHT.rumble);
                assert_eq!(*strip[1], ColorScheme::LIGHT.rumble);
                assert_eq!(*strip[2], ColorScheme::LIGHT.road);
                assert_eq!(*strip[3], ColorScheme::LIGHT.lane);
                assert_eq!(*strip[4], ColorScheme::LIGHT.lane);
                i += 6;
            }
            Command::Billboard { .. } => i += 1,
            other => panic!("segment strip must start with grass, got {other:?}"),
        }
    }
}

#[test]
fn test_window_wraps_around_the_loop_seam() {
    // Standing near the end of the loop, the window reaches back to the
    // first segments and still produces a full, strictly ordered frame.
    let track = build_track(40, |_| 0.0, |_| 0.0);
    let near_end = 38.0 * SEGMENT_LENGTH;
    let raster = render(&track, near_end, 0.0, 20);
    let far_rows: Vec<f32> = raster.road_quads().iter().map(|q| q[2].y).collect();
    assert!(far_rows.len() > 10, "wrapped window drew {} segments", far_rows.len());
    for pair in far_rows.windows(2) {
        assert!(pair[1] < pair[0]);
    }
}
