//! The game world: track geometry, projection, rendering and simulation.
//!
//! [`World`] owns everything a race needs — the immutable track, the
//! vehicle, race bookkeeping and the renderer — and drives one fixed
//! simulation tick or one render pass at a time. The host loop samples
//! input, ticks the simulation, then renders; nothing here blocks or runs
//! concurrently.

pub mod builder;
pub mod camera;
pub mod hud;
pub mod physics;
pub mod projection;
pub mod rasterizer;
pub mod renderer;
pub mod track;

use rand::SeedableRng;
use rand_pcg::Pcg32;

use crate::input::Controls;
use crate::racing::{Checkpoint, RaceState, RaceStatus};
use crate::storage::config::GameConfig;
use crate::storage::level::LevelData;
use builder::TrackBuilder;
use camera::Camera;
use hud::HudReadout;
use physics::{Vehicle, VehicleTuning};
use projection::Viewport;
use rasterizer::Rasterizer;
use renderer::RoadRenderer;
use track::Track;

/// Fixed simulation step: 60 Hz regardless of display refresh.
pub const SIM_STEP: f32 = 1.0 / 60.0;

/// The single-threaded game state: one of these is owned by the frame loop
/// and touched by nothing else.
#[derive(Debug)]
pub struct World {
    pub track: Track,
    pub camera: Camera,
    pub vehicle: Vehicle,
    pub race: RaceState,
    pub renderer: RoadRenderer,
    /// Camera/vehicle track position, world units, always in
    /// `[0, track_length)`.
    pub position: f32,
    initial_time: f32,
}

impl World {
    /// Assemble a world from prebuilt parts.
    pub fn new(
        track: Track,
        camera: Camera,
        total_laps: u32,
        initial_time: f32,
        checkpoints: Vec<Checkpoint>,
        draw_distance: usize,
    ) -> Self {
        let tuning = VehicleTuning::for_track(track.segment_length, SIM_STEP);
        Self {
            vehicle: Vehicle::new(tuning),
            race: RaceState::new(total_laps, initial_time, checkpoints),
            renderer: RoadRenderer::new(draw_distance),
            camera,
            track,
            position: 0.0,
            initial_time,
        }
    }

    /// Build a world from level data, generating the track with the
    /// configured scatter seed.
    pub fn from_level(level: &LevelData, config: &GameConfig) -> Self {
        let mut rng = Pcg32::seed_from_u64(config.scatter_seed);
        let track = TrackBuilder::build(level, &mut rng);
        let camera = Camera::new(config.camera_height, config.fov_degrees);
        let checkpoints = level
            .checkpoints
            .iter()
            .map(|cp| Checkpoint {
                segment_index: cp.segment_index,
                time_bonus: cp.time_bonus,
            })
            .collect();

        let mut world = Self::new(
            track,
            camera,
            level.total_laps,
            level.initial_time,
            checkpoints,
            config.draw_distance,
        );
        world.renderer.draw_sprites = config.draw_sprites;
        world
    }

    /// One fixed simulation tick. Call with [`SIM_STEP`].
    pub fn update(&mut self, controls: &Controls, dt: f32) {
        if self.race.is_over() {
            return;
        }

        // The spin-out reset owns the car, but the race clock keeps
        // running: the stopwatch does not pause for a crash.
        if self.vehicle.update_spin_out(dt) {
            self.race.tick_clock(dt);
            return;
        }

        if self.race.time_left <= 0.0 {
            self.vehicle.speed = 0.0;
            self.race.finish(RaceStatus::TimeExpired);
            tracing::info!("time expired");
            return;
        }

        self.vehicle.update_longitudinal(controls, dt);
        self.vehicle.update_lateral(controls, dt);
        self.vehicle.apply_off_road(dt);

        let advanced = self.position + self.vehicle.speed * dt;
        self.position = self.race.wrap_position(advanced, self.track.track_length);
        if self.race.is_over() {
            self.vehicle.speed = 0.0;
            return;
        }

        let segment_index = self.track.find_segment_index(self.position);
        self.race.award_checkpoints(segment_index);

        self.race.tick_clock(dt);

        self.check_collision();
    }

    /// Collision against the decorations of the segment just ahead of the
    /// car (half a segment forward approximates where the car visually
    /// sits).
    fn check_collision(&mut self) {
        let probe = self.position + self.track.segment_length / 2.0;
        let segment = self.track.find_segment(probe);
        for sprite in &segment.sprites {
            if (self.vehicle.x - sprite.offset).abs() < self.vehicle.tuning.collision_width {
                self.vehicle.collide();
            }
        }
    }

    /// One render pass for the current state.
    pub fn render(&mut self, raster: &mut dyn Rasterizer, viewport: Viewport) {
        self.renderer.render(
            raster,
            &self.track,
            &self.camera,
            self.position,
            self.vehicle.x,
            viewport,
        );
    }

    /// The four HUD values for this frame.
    pub fn readout(&self) -> HudReadout {
        HudReadout {
            speed: self.vehicle.speed,
            position: self.position,
            time_left: self.race.time_left,
            lap: self.race.lap,
            total_laps: self.race.total_laps,
        }
    }

    /// External reset: back to the start line with a full clock.
    pub fn restart(&mut self) {
        self.position = 0.0;
        self.vehicle.reset();
        self.race.reset(self.initial_time);
        tracing::info!("race restarted");
    }
}
