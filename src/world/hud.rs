//! HUD readout: the four values the game reports each frame.

/// Snapshot of the player-facing race numbers for one frame.
#[derive(Debug, Clone, Copy, Default)]
pub struct HudReadout {
    /// Longitudinal speed, world units per second.
    pub speed: f32,
    /// Track position this lap, world units.
    pub position: f32,
    /// Remaining clock, seconds.
    pub time_left: f32,
    pub lap: u32,
    pub total_laps: u32,
}

/// Formatting for the HUD surface. Presentation only; the simulation never
/// reads these strings back.
#[derive(Debug, Clone, Copy, Default)]
pub struct Hud;

impl Hud {
    /// Speed in display units (world units per second / 100, floored).
    pub fn format_speed(&self, readout: &HudReadout) -> String {
        format!("{}", (readout.speed / 100.0).floor() as i64)
    }

    /// Distance-derived score for the current lap.
    pub fn format_score(&self, readout: &HudReadout) -> String {
        format!("{}", (readout.position / 100.0).floor() as i64)
    }

    /// Whole seconds remaining, rounded up so the display only hits 0 when
    /// the clock truly has.
    pub fn format_time(&self, readout: &HudReadout) -> String {
        format!("{}", readout.time_left.ceil() as i64)
    }

    pub fn format_lap(&self, readout: &HudReadout) -> String {
        format!("{}/{}", readout.lap.min(readout.total_laps), readout.total_laps)
    }
}
