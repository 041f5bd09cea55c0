//! Lap counting, checkpoint awards and the race clock.

use std::collections::HashSet;

/// A timed checkpoint placed on a track segment.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Checkpoint {
    pub segment_index: usize,
    /// Seconds added to the clock when the checkpoint is passed.
    pub time_bonus: f32,
}

/// Running and terminal race phases. Terminal phases freeze the car; the
/// simulation performs no further updates until an external reset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RaceStatus {
    Racing,
    /// All laps completed.
    Finished,
    /// The countdown clock reached zero.
    TimeExpired,
}

/// Per-race mutable state.
#[derive(Debug, Clone)]
pub struct RaceState {
    pub status: RaceStatus,
    /// Current lap, 1-based.
    pub lap: u32,
    pub total_laps: u32,
    /// Remaining time on the countdown clock, seconds.
    pub time_left: f32,
    checkpoints: Vec<Checkpoint>,
    /// Checkpoints already awarded this lap, by segment index.
    awarded: HashSet<usize>,
}

impl RaceState {
    pub fn new(total_laps: u32, initial_time: f32, checkpoints: Vec<Checkpoint>) -> Self {
        Self {
            status: RaceStatus::Racing,
            lap: 1,
            total_laps,
            time_left: initial_time,
            checkpoints,
            awarded: HashSet::new(),
        }
    }

    pub fn is_over(&self) -> bool {
        self.status != RaceStatus::Racing
    }

    /// Wrap `position` into `[0, track_length)` and roll laps. Every
    /// forward wrap increments the lap and clears the per-lap checkpoint
    /// set; completing the final lap finishes the race, and the counter
    /// never runs past `total_laps + 1` no matter how far a single tick
    /// jumped. Backward wraps do not unwind laps.
    pub fn wrap_position(&mut self, mut position: f32, track_length: f32) -> f32 {
        while position >= track_length {
            position -= track_length;
            self.lap += 1;
            self.awarded.clear();
            tracing::debug!(lap = self.lap, "lap rollover");
            if self.lap > self.total_laps {
                self.status = RaceStatus::Finished;
                tracing::info!("race finished");
                break;
            }
        }
        while position < 0.0 {
            position += track_length;
        }
        position
    }

    /// Award every checkpoint at or before `segment_index` that has not
    /// paid out this lap, and return the summed bonus. One-shot per lap;
    /// the at-or-before test (rather than equality) makes the award safe
    /// even when a fast tick jumps clean past a checkpoint's segment.
    pub fn award_checkpoints(&mut self, segment_index: usize) -> f32 {
        let mut bonus = 0.0;
        for cp in &self.checkpoints {
            if segment_index >= cp.segment_index && self.awarded.insert(cp.segment_index) {
                bonus += cp.time_bonus;
                tracing::debug!(
                    segment = cp.segment_index,
                    bonus = cp.time_bonus,
                    "checkpoint"
                );
            }
        }
        self.time_left += bonus;
        bonus
    }

    /// Count the clock down, flooring at zero. The caller decides when a
    /// zero clock terminates the race; during a spin-out the clock keeps
    /// running but the terminal transition waits for the reset to finish.
    pub fn tick_clock(&mut self, dt: f32) {
        self.time_left = (self.time_left - dt).max(0.0);
    }

    /// Move to a terminal phase, freezing further updates.
    pub fn finish(&mut self, status: RaceStatus) {
        self.status = status;
    }

    /// Fresh race: lap 1, full clock, no checkpoints awarded.
    pub fn reset(&mut self, initial_time: f32) {
        self.status = RaceStatus::Racing;
        self.lap = 1;
        self.time_left = initial_time;
        self.awarded.clear();
    }
}
