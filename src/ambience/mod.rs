//! Ambient sound spots.
//!
//! The audio mix itself lives outside this crate; a spot only tracks
//! whether an enemy arrival should have it sounding. Spots never talk
//! to enemies directly - they react to the broadcast arrival events.

use bevy::prelude::*;

use crate::core::{NightPhase, WaypointReached};

/// A point in the building that makes noise when a specific enemy's
/// patrol lands on a specific waypoint.
#[derive(Component, Debug)]
pub struct AmbientSpot {
    /// Enemy this spot listens for.
    pub enemy: Entity,
    /// Waypoint index that sets it off.
    pub waypoint_index: usize,
    /// Whether the spot is currently sounding.
    pub active: bool,
}

/// Activate spots whose enemy just landed on their waypoint.
pub fn trigger_ambient_spots(
    mut arrivals: EventReader<WaypointReached>,
    mut spots: Query<&mut AmbientSpot>,
) {
    for arrival in arrivals.read() {
        for mut spot in spots.iter_mut() {
            if spot.enemy == arrival.enemy
                && spot.waypoint_index == arrival.index
                && !spot.active
            {
                spot.active = true;
                debug!("Ambient spot at waypoint {} triggered", spot.waypoint_index);
            }
        }
    }
}

/// Silence every spot when the director winds a night down.
pub fn silence_ambient_spots(mut spots: Query<&mut AmbientSpot>) {
    for mut spot in spots.iter_mut() {
        spot.active = false;
    }
}

/// Ambience plugin - wires spots to arrival events and night resets.
pub struct AmbiencePlugin;

impl Plugin for AmbiencePlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            Update,
            trigger_ambient_spots.run_if(in_state(NightPhase::Active)),
        )
        .add_systems(OnEnter(NightPhase::Passed), silence_ambient_spots)
        .add_systems(OnEnter(NightPhase::Died), silence_ambient_spots);
    }
}
