//! Director plugin - registers session state and night-flow systems.

use bevy::prelude::*;

use super::session::{DirectorConfig, NightSession};
use super::systems;
use crate::core::{GameState, NightPhase};
use crate::enemies::advance_enemies;
use crate::persistence::CheckpointPath;

/// Director plugin - owns the night counter, the clock, and the
/// transitions between night phases.
pub struct DirectorPlugin;

impl Plugin for DirectorPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<NightSession>()
            .init_resource::<DirectorConfig>()
            .init_resource::<CheckpointPath>()
            .add_systems(OnEnter(GameState::InGame), systems::load_session)
            .add_systems(OnEnter(NightPhase::Showing), systems::show_night_card)
            .add_systems(OnEnter(NightPhase::Active), systems::start_night)
            .add_systems(OnEnter(NightPhase::Passed), systems::complete_night)
            .add_systems(
                Update,
                systems::tick_night_card.run_if(in_state(NightPhase::Showing)),
            )
            // Kill handling runs after the enemy AI so a countdown that
            // expires this tick ends the night this tick
            .add_systems(
                Update,
                (systems::tick_night, systems::handle_kills)
                    .chain()
                    .after(advance_enemies)
                    .run_if(in_state(NightPhase::Active)),
            )
            .add_systems(
                Update,
                systems::handle_menu_choices
                    .run_if(in_state(NightPhase::Passed).or(in_state(NightPhase::Died))),
            );
    }
}
