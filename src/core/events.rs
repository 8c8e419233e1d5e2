//! Global events used for cross-system communication.
//!
//! Events allow decoupled systems to communicate. For example, the
//! flashlight collaborator sends FlashEvents, and the enemy AI receives
//! them to advance flash counters. This keeps systems independent and
//! testable.

use bevy::prelude::*;

/// Sent by the flashlight collaborator when the player flashes an enemy.
///
/// The enemy AI applies the registration contract: the flash only counts
/// while the target is standing at its door or kill spot, unless the
/// enemy's bypass flag is set.
#[derive(Event)]
pub struct FlashEvent {
    /// Enemy the flash was aimed at
    pub target: Entity,
}

/// Sent when an enemy's door countdown expires with too few flashes.
///
/// The director listens for this to end the night: it marks the player
/// dead, halts the timer, and broadcasts the reset that disables every
/// enemy. Each standoff emits this at most once.
#[derive(Event)]
pub struct KillEvent {
    /// Enemy that caught the player
    pub enemy: Entity,
}

/// Sent whenever an enemy's movement lands on a waypoint.
///
/// Arrival is broadcast rather than delivered to any particular
/// listener; ambient-sound spots react to arrivals on their own
/// waypoint, and nothing else needs to know.
#[derive(Event)]
pub struct WaypointReached {
    /// Enemy that arrived
    pub enemy: Entity,
    /// Index of the waypoint it now occupies
    pub index: usize,
}

/// Player menu selection on the night-passed / death screens.
///
/// The surrounding UI is out of scope; whatever presents the choice
/// sends one of these and the director acts on it.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    /// Advance to the next night (only meaningful in `Passed`)
    ContinueToNextNight,
    /// Replay the night that just killed the player (only in `Died`)
    RetryNight,
    /// Abandon the session and go back to the title screen
    ReturnToTitle,
}
