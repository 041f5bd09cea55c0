//! Road geometry: fixed-length segments with colors and roadside sprites.
//!
//! A track is an ordered chain of segments. Each segment spans one
//! `segment_length` of world-space z and carries the near/far boundary
//! points of the road surface, a signed curvature contribution, a fill
//! color scheme, and any decorations scattered beside it. Geometry is
//! immutable once the builder has produced it; all per-frame projection
//! data lives in renderer-owned buffers instead.

use glam::Vec3;

use super::rasterizer::Rgb;

/// Roadside object kinds the renderer can billboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpriteKind {
    Tree,
    Rock,
    FastFood,
    Business,
    Church,
    GasStation,
    StartBanner,
    FinishBanner,
}

impl SpriteKind {
    /// Billboard anchor as a fraction of the sprite extent (x right,
    /// y down). Rocks sit partially buried, everything else stands on its
    /// baseline.
    pub fn anchor(&self) -> (f32, f32) {
        match self {
            SpriteKind::Rock => (0.5, 0.75),
            _ => (0.5, 1.0),
        }
    }
}

/// One decoration beside the road. `offset` is in road-half-width units:
/// the pavement spans roughly [-1, 1], so |offset| > 1 stands off-road.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sprite {
    pub kind: SpriteKind,
    pub offset: f32,
}

/// Fill colors for one segment: road surface, flanking grass, rumble
/// strips and lane markers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColorScheme {
    pub road: Rgb,
    pub grass: Rgb,
    pub rumble: Rgb,
    pub lane: Rgb,
}

impl ColorScheme {
    pub const LIGHT: ColorScheme = ColorScheme {
        road: Rgb::new(0x6B, 0x6B, 0x6B),
        grass: Rgb::new(0x10, 0xAA, 0x10),
        rumble: Rgb::new(0x55, 0x55, 0x55),
        lane: Rgb::new(0xCC, 0xCC, 0xCC),
    };

    pub const DARK: ColorScheme = ColorScheme {
        road: Rgb::new(0x69, 0x69, 0x69),
        grass: Rgb::new(0x00, 0x9A, 0x00),
        rumble: Rgb::new(0xBB, 0xBB, 0xBB),
        lane: Rgb::new(0x69, 0x69, 0x69),
    };

    pub const START: ColorScheme = ColorScheme {
        road: Rgb::new(0xFF, 0xFF, 0xFF),
        grass: Rgb::new(0xFF, 0xFF, 0xFF),
        rumble: Rgb::new(0xFF, 0xFF, 0xFF),
        lane: Rgb::new(0xFF, 0xFF, 0xFF),
    };

    pub const FINISH: ColorScheme = ColorScheme {
        road: Rgb::new(0x00, 0x00, 0x00),
        grass: Rgb::new(0x00, 0x00, 0x00),
        rumble: Rgb::new(0x00, 0x00, 0x00),
        lane: Rgb::new(0x00, 0x00, 0x00),
    };
}

/// The atomic unit of road.
///
/// `p1` is the near boundary (z = index * segment_length) and `p2` the far
/// boundary one segment_length ahead. Consecutive segments share elevation:
/// `segments[i].p2.y == segments[i + 1].p1.y`. `curve` is a per-segment
/// contribution that the renderer accumulates while walking forward, not an
/// absolute angle.
#[derive(Debug, Clone, PartialEq)]
pub struct Segment {
    pub index: usize,
    pub p1: Vec3,
    pub p2: Vec3,
    pub curve: f32,
    pub colors: ColorScheme,
    pub sprites: Vec<Sprite>,
}

/// The full road: an ordered segment chain plus its fixed dimensions.
#[derive(Debug, Clone)]
pub struct Track {
    /// Ordered, contiguous segment chain.
    pub segments: Vec<Segment>,
    /// World-space length of every segment.
    pub segment_length: f32,
    /// Half-width of the paved road in world units.
    pub road_width: f32,
    /// Number of drivable lanes.
    pub lanes: u32,
    /// Total loop length: `segments.len() * segment_length`.
    pub track_length: f32,
}

impl Track {
    /// Assemble a track from a prebuilt segment chain.
    pub fn new(segments: Vec<Segment>, segment_length: f32, road_width: f32, lanes: u32) -> Self {
        let track_length = segments.len() as f32 * segment_length;
        Self {
            segments,
            segment_length,
            road_width,
            lanes,
            track_length,
        }
    }

    /// Index of the segment containing world position `z`.
    ///
    /// This is the single place track looping is expressed: any finite z,
    /// negative or beyond the loop length, wraps into the track.
    pub fn find_segment_index(&self, z: f32) -> usize {
        let index = (z / self.segment_length).floor() as i64;
        let count = self.segments.len() as i64;
        index.rem_euclid(count) as usize
    }

    /// Segment containing world position `z`, wrapping around the loop.
    pub fn find_segment(&self, z: f32) -> &Segment {
        &self.segments[self.find_segment_index(z)]
    }
}
