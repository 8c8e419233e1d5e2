//! Enemy-related components.

use bevy::prelude::*;
use serde::Deserialize;

use super::error::EnemyConfigError;

/// Marker component for all enemies.
#[derive(Component)]
pub struct Enemy;

/// Closed set of enemy movement behaviors.
///
/// Every enemy runs the same state machine; the kind only selects the
/// decision policy used when a movement opportunity fires.
#[derive(Component, Clone, Copy, PartialEq, Eq, Hash, Debug, Deserialize)]
pub enum EnemyKind {
    /// Walks one waypoint at a time, occasionally backward.
    Stepper,
    /// Rolls forward and backward chances independently each opportunity.
    RandomStepper,
    /// Jumps to a random waypoint on a fixed schedule.
    Teleporter,
    /// Like `Teleporter`, but benched until a configured night.
    RandomTeleporter,
}

impl EnemyKind {
    /// Smallest route this behavior can operate on. Stepping needs room
    /// to walk; teleporting works on any non-empty route.
    pub fn min_waypoints(self) -> usize {
        match self {
            EnemyKind::Stepper | EnemyKind::RandomStepper => 4,
            EnemyKind::Teleporter | EnemyKind::RandomTeleporter => 1,
        }
    }

    /// Fixed-schedule kinds move at configured times; the others roll
    /// for an opportunity every interval.
    pub fn is_fixed_schedule(self) -> bool {
        matches!(self, EnemyKind::Teleporter | EnemyKind::RandomTeleporter)
    }
}

/// An enemy's route through the building.
///
/// Index 0 is the starting spot, the last index is the player's door.
/// An optional interior index is a kill spot: standing there starts the
/// same countdown as standing at the door.
#[derive(Component, Clone, Debug)]
pub struct PatrolRoute {
    waypoints: Vec<Vec3>,
    kill_spot: Option<usize>,
}

impl PatrolRoute {
    /// Index every enemy starts from and resets to.
    pub const START: usize = 0;

    /// Validate and build a route for the given behavior.
    ///
    /// Too few waypoints is a configuration fault. A kill spot outside
    /// the route is discarded with a warning rather than rejected.
    pub fn new(
        kind: EnemyKind,
        waypoints: Vec<Vec3>,
        kill_spot: Option<usize>,
    ) -> Result<Self, EnemyConfigError> {
        let required = kind.min_waypoints();
        if waypoints.len() < required {
            return Err(EnemyConfigError::NotEnoughWaypoints {
                kind,
                required,
                actual: waypoints.len(),
            });
        }

        let kill_spot = match kill_spot {
            Some(index) if index >= waypoints.len() => {
                warn!(
                    "Kill spot {} is outside the {}-waypoint route - ignoring it",
                    index,
                    waypoints.len()
                );
                None
            }
            other => other,
        };

        Ok(Self {
            waypoints,
            kill_spot,
        })
    }

    pub fn len(&self) -> usize {
        self.waypoints.len()
    }

    pub fn is_empty(&self) -> bool {
        self.waypoints.is_empty()
    }

    /// The terminal waypoint - reaching it starts the kill countdown.
    pub fn door_index(&self) -> usize {
        self.waypoints.len() - 1
    }

    pub fn kill_spot(&self) -> Option<usize> {
        self.kill_spot
    }

    /// Position of a waypoint in world space.
    pub fn position(&self, index: usize) -> Vec3 {
        self.waypoints[index]
    }

    /// Whether standing on `index` starts a kill-resolution standoff.
    pub fn is_standoff_index(&self, index: usize) -> bool {
        index == self.door_index() || self.kill_spot == Some(index)
    }
}

/// Base behavior parameters for one enemy, loaded from its RON file.
///
/// These are the night-1 values; [`NightParams`] holds the values after
/// per-night scaling.
#[derive(Component, Clone, Debug, Deserialize)]
#[serde(default)]
pub struct EnemyStats {
    /// Stepper: chance to take a step when an opportunity fires.
    pub move_chance: f32,
    /// RandomStepper: chance to advance one waypoint per opportunity.
    pub forward_chance: f32,
    /// RandomStepper: chance to fall back one waypoint if forward missed.
    pub backward_chance: f32,
    /// Added to every chance for each night past the first.
    pub chance_step: f32,
    /// Ceiling for all scaled chances.
    pub max_chance: f32,
    /// Stepper: whether the direction coin flip is enabled at all.
    pub backward_steps: bool,
    /// Seconds between opportunities (opportunistic kinds) or between
    /// repeat jumps (fixed-schedule kinds).
    pub wait_interval: f32,
    /// Opportunistic interval shrink factor applied per extra night.
    pub interval_multiplier: f32,
    /// Intervals and schedules never scale below this.
    pub min_interval: f32,
    /// Fixed schedule: seconds into the night of the first jump.
    pub first_move_time: f32,
    /// Fixed schedule: whether jumps keep repeating after the first.
    pub repeat_moves: bool,
    /// Fixed schedule: seconds added per extra night (negative speeds up).
    pub schedule_step: f32,
    /// Seconds a walking transition takes between two waypoints.
    pub move_duration: f32,
    /// Seconds the player has to flash the enemy away at the door.
    pub door_kill_delay: f32,
    /// Flashes needed to send the enemy back to its starting spot.
    pub required_flashes: u32,
    /// Debug affordance: count flashes no matter where the enemy is.
    pub flash_anywhere: bool,
    /// First night this enemy participates in.
    pub min_active_night: u32,
}

impl Default for EnemyStats {
    fn default() -> Self {
        Self {
            move_chance: 0.3,
            forward_chance: 0.4,
            backward_chance: 0.2,
            chance_step: 0.07,
            max_chance: 0.9,
            backward_steps: true,
            wait_interval: 5.0,
            interval_multiplier: 0.85,
            min_interval: 1.5,
            first_move_time: 30.0,
            repeat_moves: true,
            schedule_step: -3.0,
            move_duration: 1.2,
            door_kill_delay: 6.0,
            required_flashes: 2,
            flash_anywhere: false,
            min_active_night: 1,
        }
    }
}

/// Behavior parameters after scaling for the current night.
///
/// Recomputed from [`EnemyStats`] on every night start and on every
/// reset back to the starting waypoint.
#[derive(Component, Clone, Copy, Debug, Default)]
pub struct NightParams {
    pub move_chance: f32,
    pub forward_chance: f32,
    pub backward_chance: f32,
    /// Wait between opportunities / repeat jumps, already scaled.
    pub wait_interval: f32,
    /// Fixed schedule: scaled time of the first jump.
    pub first_wait: f32,
}

/// Mutable patrol bookkeeping for one enemy.
#[derive(Component, Debug, Default)]
pub struct Patrol {
    /// Waypoint the enemy currently occupies. Only updated when a
    /// transition completes, never mid-move.
    pub position_index: usize,
    /// Flashes registered since entering the current standoff (or since
    /// the last reset, for bypass-flagged enemies).
    pub flash_count: u32,
    /// Gate on all autonomous behavior; false until the director starts
    /// a night, false again after every reset broadcast.
    pub movement_enabled: bool,
    /// Whether the first scheduled move of this night already happened.
    pub first_move_done: bool,
}

/// AI state machine for enemy behavior.
///
/// One enemy is in exactly one of these at a time, which also makes
/// "no new move may start while moving" structural.
#[derive(Component, Debug, Default, Clone)]
pub enum AiState {
    /// Disabled. Waiting for the director to start a night.
    #[default]
    Idle,
    /// Counting down to the next movement opportunity.
    Waiting { wait: Timer },
    /// Walking between two waypoints. The index commits on completion.
    Moving {
        from: usize,
        target: usize,
        progress: Timer,
    },
    /// At the door or kill spot; countdown racing the player's flashes.
    Standoff { countdown: Timer },
    /// Countdown expired and the kill was signaled. The director owns
    /// what happens next; the enemy does nothing on its own.
    Parked,
}

impl AiState {
    pub fn is_standoff(&self) -> bool {
        matches!(self, AiState::Standoff { .. })
    }
}

/// Arbiter rank for door access; lower values claim the door first.
#[derive(Component, Clone, Copy, PartialEq, Eq, Debug, Default)]
pub struct DoorPriority(pub u8);

/// Marker for an enemy whose configuration failed validation.
///
/// The entity stays in the world so the fault is inspectable, but it
/// never joins a night.
#[derive(Component)]
pub struct ConfigFault;

#[cfg(test)]
mod tests {
    use super::*;

    fn spots(n: usize) -> Vec<Vec3> {
        (0..n).map(|i| Vec3::new(i as f32, 0.0, 0.0)).collect()
    }

    #[test]
    fn stepper_route_needs_four_waypoints() {
        let err = PatrolRoute::new(EnemyKind::Stepper, spots(3), None);
        assert!(err.is_err());
        assert!(PatrolRoute::new(EnemyKind::Stepper, spots(4), None).is_ok());
    }

    #[test]
    fn teleporter_route_accepts_a_single_waypoint() {
        let route = PatrolRoute::new(EnemyKind::Teleporter, spots(1), None).unwrap();
        assert_eq!(route.door_index(), 0);
    }

    #[test]
    fn out_of_range_kill_spot_is_discarded() {
        let route = PatrolRoute::new(EnemyKind::RandomStepper, spots(5), Some(9)).unwrap();
        assert_eq!(route.kill_spot(), None);

        let route = PatrolRoute::new(EnemyKind::RandomStepper, spots(5), Some(2)).unwrap();
        assert_eq!(route.kill_spot(), Some(2));
    }

    #[test]
    fn standoff_indices_are_door_and_kill_spot() {
        let route = PatrolRoute::new(EnemyKind::Stepper, spots(5), Some(2)).unwrap();
        assert!(route.is_standoff_index(4));
        assert!(route.is_standoff_index(2));
        assert!(!route.is_standoff_index(1));
    }
}
