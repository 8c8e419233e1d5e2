//! Enemy plugin - registers all enemy systems.

use bevy::prelude::*;

use super::ai;
use super::arbiter::{self, DoorWatch};
use super::data::{load_enemy_definitions, EnemyDataDir, EnemyRegistry};
use super::spawning::{despawn_enemies, spawn_enemies};
use crate::core::{GameState, NightPhase};

/// Enemy plugin - handles enemy spawning, AI, and lifecycle resets.
pub struct EnemyPlugin;

impl Plugin for EnemyPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<EnemyRegistry>()
            .init_resource::<EnemyDataDir>()
            .init_resource::<ai::EnemyRng>()
            .init_resource::<DoorWatch>()
            // Load definitions and spawn the cast once per session
            .add_systems(
                OnEnter(GameState::InGame),
                (load_enemy_definitions, spawn_enemies).chain(),
            )
            .add_systems(OnExit(GameState::InGame), despawn_enemies)
            // Lifecycle broadcasts ride the night transitions, so they
            // always land between ticks
            .add_systems(OnEnter(NightPhase::Active), ai::begin_night)
            .add_systems(OnEnter(NightPhase::Passed), ai::reset_all_enemies)
            .add_systems(OnEnter(NightPhase::Died), ai::reset_all_enemies)
            // AI runs only while a night is active; the door snapshot is
            // taken before anyone moves
            .add_systems(
                Update,
                (
                    arbiter::track_door_standoffs,
                    ai::register_flashes,
                    ai::advance_enemies,
                )
                    .chain()
                    .run_if(in_state(NightPhase::Active)),
            );
    }
}
