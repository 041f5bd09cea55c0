//! Race progress: laps, the countdown clock and checkpoint bonuses.

pub mod state;

pub use state::{Checkpoint, RaceState, RaceStatus};
