//! Door arbiter - keeps two enemies from piling onto the shared door.
//!
//! This is a point-in-time check, not a lock: occupancy is snapshotted
//! once per tick before movement runs. Two enemies whose opportunities
//! fire on the same tick can both see the door as free; with
//! single-threaded cooperative scheduling that race is deterministic per
//! tick order and accepted.

use bevy::prelude::*;

use super::components::{AiState, DoorPriority, Enemy, Patrol, PatrolRoute};

/// Which door priorities are currently standing at their own door in a
/// kill standoff.
#[derive(Resource, Default)]
pub struct DoorWatch {
    occupied: Vec<u8>,
}

impl DoorWatch {
    /// True if an enemy that outranks `priority` already holds a door.
    /// Lower values outrank higher ones; equal ranks never block.
    pub fn blocks(&self, priority: u8) -> bool {
        self.occupied.iter().any(|&held| held < priority)
    }

    #[cfg(test)]
    fn occupy(&mut self, priority: u8) {
        self.occupied.push(priority);
    }
}

/// Rebuild the occupancy snapshot. Runs before enemy movement each tick.
///
/// A standoff at an interior kill spot does not count - only the door
/// itself is contended.
pub fn track_door_standoffs(
    mut watch: ResMut<DoorWatch>,
    enemies: Query<(&DoorPriority, &PatrolRoute, &Patrol, &AiState), With<Enemy>>,
) {
    watch.occupied.clear();
    for (priority, route, patrol, state) in enemies.iter() {
        let standing = matches!(state, AiState::Standoff { .. } | AiState::Parked);
        if standing && patrol.position_index == route.door_index() {
            watch.occupied.push(priority.0);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_watch_blocks_nobody() {
        let watch = DoorWatch::default();
        assert!(!watch.blocks(0));
        assert!(!watch.blocks(5));
    }

    #[test]
    fn only_higher_ranks_block() {
        let mut watch = DoorWatch::default();
        watch.occupy(1);
        assert!(!watch.blocks(0));
        assert!(!watch.blocks(1));
        assert!(watch.blocks(2));
    }
}
