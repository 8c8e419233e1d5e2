//! Night session state and the in-fiction clock.

use bevy::prelude::*;

/// Session state owned by the director.
///
/// Enemies read `night` when rescaling their parameters and never write
/// here; only director systems mutate this resource.
#[derive(Resource, Debug)]
pub struct NightSession {
    /// Current night, starting at 1. Survives restarts through the
    /// checkpoint file.
    pub night: u32,
    /// Set when an enemy reaches the player; cleared on retry.
    pub player_died: bool,
    /// Seconds elapsed in the active night.
    pub elapsed: f32,
    /// Length of the active night in seconds.
    pub duration: f32,
    /// Seconds left on the "Night N" card.
    pub intro_remaining: f32,
    /// Last hour the clock logged, so it only speaks on the hour.
    pub last_hour: Option<u32>,
}

impl Default for NightSession {
    fn default() -> Self {
        Self {
            night: 1,
            player_died: false,
            elapsed: 0.0,
            duration: 0.0,
            intro_remaining: 0.0,
            last_hour: None,
        }
    }
}

impl NightSession {
    /// How far through the night we are, in `[0, 1]`.
    pub fn progress(&self) -> f32 {
        if self.duration <= 0.0 {
            0.0
        } else {
            (self.elapsed / self.duration).clamp(0.0, 1.0)
        }
    }
}

/// Night length settings and session bounds.
#[derive(Resource, Clone, Debug)]
pub struct DirectorConfig {
    /// Length of night 1 in seconds.
    pub first_night_duration: f32,
    /// Seconds added per later night.
    pub per_night_increment: f32,
    /// The night counter never advances past this.
    pub max_nights: u32,
    /// How long the "Night N" card stays up before the timer starts.
    pub intro_seconds: f32,
}

impl Default for DirectorConfig {
    fn default() -> Self {
        Self {
            first_night_duration: 360.0,
            per_night_increment: 30.0,
            max_nights: 7,
            intro_seconds: 3.0,
        }
    }
}

impl DirectorConfig {
    /// Length of the given night in seconds.
    pub fn night_duration(&self, night: u32) -> f32 {
        self.first_night_duration + night.saturating_sub(1) as f32 * self.per_night_increment
    }
}

/// Map night progress onto the 12:00 AM - 6:00 AM wall clock.
///
/// Progress runs linearly over six in-fiction hours; the hour is shown
/// 12-hour style.
pub fn clock_display(progress: f32) -> (u32, u32) {
    let t = progress.clamp(0.0, 1.0) * 6.0;
    let h24 = (12 + t.floor() as u32) % 24;
    let hour = match h24 % 12 {
        0 => 12,
        h => h,
    };
    let minute = ((t.fract() * 60.0).floor() as u32).min(59);
    (hour, minute)
}
