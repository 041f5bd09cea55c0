//! Track construction from declarative road sections.
//!
//! A level file describes the road as a handful of sections (so many
//! segments of such-and-such curvature and elevation change); the builder
//! expands them into the flat segment chain the renderer and simulation
//! consume. Elevation is interpolated linearly across each section from a
//! running cursor so consecutive segments always join without a step.
//! Decoration scatter draws from an injected generator, making the whole
//! build a pure function of (level data, seed).

use glam::Vec3;
use rand::Rng;

use super::track::{ColorScheme, Segment, Sprite, SpriteKind, Track};
use crate::storage::level::LevelData;

/// Segments per alternating color band.
const COLOR_BAND: usize = 3;
/// Segment carrying the start banners.
const START_SEGMENT: usize = 10;
/// Distance of the finish banners from the end of the track, in segments.
const FINISH_OFFSET: usize = 50;
/// Lateral banner offset, road-half-width units.
const BANNER_OFFSET: f32 = 2.5;

/// Expands road sections into a [`Track`].
#[derive(Debug)]
pub struct TrackBuilder {
    segments: Vec<Segment>,
    segment_length: f32,
}

impl TrackBuilder {
    /// Build the full track for a level. `rng` drives the decoration
    /// scatter; seeding it fixes the generated layout.
    pub fn build(level: &LevelData, rng: &mut impl Rng) -> Track {
        let mut builder = Self {
            segments: Vec::with_capacity(level.segment_count()),
            segment_length: level.segment_length,
        };

        for section in &level.road_data {
            builder.add_section(section.length, section.curve_strength, section.height_change, rng);
        }
        builder.place_landmarks();

        tracing::info!(
            segments = builder.segments.len(),
            sprites = builder.segments.iter().map(|s| s.sprites.len()).sum::<usize>(),
            "track built"
        );

        Track::new(builder.segments, level.segment_length, level.road_width, level.lanes)
    }

    /// Elevation cursor: the far-edge height of the last segment built.
    fn last_y(&self) -> f32 {
        self.segments.last().map_or(0.0, |s| s.p2.y)
    }

    /// Append one section, interpolating elevation from the cursor to
    /// `cursor + hill` across its `length` segments. A zero-length section
    /// contributes nothing.
    fn add_section(&mut self, length: usize, curve: f32, hill: f32, rng: &mut impl Rng) {
        if length == 0 {
            return;
        }
        let start_y = self.last_y();
        let rise = hill / length as f32;
        for i in 0..length {
            self.add_segment(curve, start_y + rise * (i + 1) as f32, rng);
        }
    }

    fn add_segment(&mut self, curve: f32, far_y: f32, rng: &mut impl Rng) {
        let n = self.segments.len();
        let colors = if (n / COLOR_BAND) % 2 == 1 {
            ColorScheme::DARK
        } else {
            ColorScheme::LIGHT
        };

        let mut segment = Segment {
            index: n,
            p1: Vec3::new(0.0, self.last_y(), n as f32 * self.segment_length),
            p2: Vec3::new(0.0, far_y, (n + 1) as f32 * self.segment_length),
            curve,
            colors,
            sprites: Vec::new(),
        };
        scatter_sprites(&mut segment, rng);
        self.segments.push(segment);
    }

    /// Start and finish banners plus their white/black color bands. Tracks
    /// too short for a landmark silently omit it.
    fn place_landmarks(&mut self) {
        if self.segments.len() > START_SEGMENT {
            for offset in [-BANNER_OFFSET, BANNER_OFFSET] {
                self.segments[START_SEGMENT].sprites.push(Sprite {
                    kind: SpriteKind::StartBanner,
                    offset,
                });
            }
            for segment in &mut self.segments[..COLOR_BAND] {
                segment.colors = ColorScheme::START;
            }
        }

        if self.segments.len() > FINISH_OFFSET {
            let finish = self.segments.len() - FINISH_OFFSET;
            for offset in [-BANNER_OFFSET, BANNER_OFFSET] {
                self.segments[finish].sprites.push(Sprite {
                    kind: SpriteKind::FinishBanner,
                    offset,
                });
            }
            let band_end = (finish + COLOR_BAND).min(self.segments.len());
            for segment in &mut self.segments[finish..band_end] {
                segment.colors = ColorScheme::FINISH;
            }
        }
    }
}

/// Independently sampled rare events per segment: trees on either verge,
/// the occasional rock near the rumble strip, and rarer still a building
/// set well back from the road.
fn scatter_sprites(segment: &mut Segment, rng: &mut impl Rng) {
    const BUILDINGS: [SpriteKind; 4] = [
        SpriteKind::FastFood,
        SpriteKind::Business,
        SpriteKind::Church,
        SpriteKind::GasStation,
    ];

    if rng.gen::<f32>() < 0.10 {
        segment.sprites.push(Sprite {
            kind: SpriteKind::Tree,
            offset: 1.5 + rng.gen::<f32>() * 0.5,
        });
    }
    if rng.gen::<f32>() < 0.10 {
        segment.sprites.push(Sprite {
            kind: SpriteKind::Tree,
            offset: -1.5 - rng.gen::<f32>() * 0.5,
        });
    }
    if rng.gen::<f32>() < 0.05 {
        segment.sprites.push(Sprite {
            kind: SpriteKind::Rock,
            offset: 1.2 + rng.gen::<f32>() * 0.5,
        });
    }
    if rng.gen::<f32>() < 0.05 {
        segment.sprites.push(Sprite {
            kind: SpriteKind::Rock,
            offset: -1.2 - rng.gen::<f32>() * 0.5,
        });
    }
    if rng.gen::<f32>() < 0.03 {
        let kind = BUILDINGS[rng.gen_range(0..BUILDINGS.len())];
        let side = if rng.gen::<bool>() { 1.0 } else { -1.0 };
        segment.sprites.push(Sprite {
            kind,
            offset: side * (2.0 + rng.gen::<f32>() * 2.0),
        });
    }
}
