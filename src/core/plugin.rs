//! Core plugin that sets up game states and events.

use bevy::prelude::*;

use super::events::*;
use super::states::*;

/// Core plugin - must be added first as other plugins depend on it.
///
/// This plugin sets up:
/// - Game states (TitleScreen, InGame) and the night-cycle sub-states
/// - Global events (FlashEvent, KillEvent, etc.)
pub struct CorePlugin;

impl Plugin for CorePlugin {
    fn build(&self, app: &mut App) {
        app
            // Initialize game states
            .init_state::<GameState>()
            .add_sub_state::<NightPhase>()
            // Register global events
            .add_event::<FlashEvent>()
            .add_event::<KillEvent>()
            .add_event::<WaypointReached>()
            .add_event::<MenuChoice>();
    }
}
