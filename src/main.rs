//! Night Shift - Headless Entry Point
//!
//! Runs one auto-playing session: starts a night, lets the animatronics
//! close in with nobody on the flashlight, continues past any night the
//! (absent) player somehow survives, and exits when they are caught.
//! Useful for watching the simulation through its logs.

use std::time::Duration;

use bevy::app::ScheduleRunnerPlugin;
use bevy::log::LogPlugin;
use bevy::prelude::*;
use bevy::state::app::StatesPlugin;

use nightshift::core::{GameState, MenuChoice, NightPhase};
use nightshift::director::NightSession;

fn main() {
    App::new()
        .add_plugins(
            MinimalPlugins.set(ScheduleRunnerPlugin::run_loop(Duration::from_secs_f64(
                1.0 / 60.0,
            ))),
        )
        .add_plugins(LogPlugin::default())
        .add_plugins(StatesPlugin)
        .add_plugins(nightshift::NightShiftPlugin)
        .add_systems(Update, (auto_start, auto_advance))
        .run();
}

/// Jump straight from the title screen into a session.
fn auto_start(state: Res<State<GameState>>, mut next: ResMut<NextState<GameState>>) {
    if *state.get() == GameState::TitleScreen {
        next.set(GameState::InGame);
    }
}

/// Continue past survived nights; exit once the player is caught.
fn auto_advance(
    phase: Option<Res<State<NightPhase>>>,
    session: Res<NightSession>,
    mut choices: EventWriter<MenuChoice>,
    mut exit: EventWriter<AppExit>,
) {
    let Some(phase) = phase else {
        return;
    };
    match phase.get() {
        NightPhase::Passed => {
            choices.send(MenuChoice::ContinueToNextNight);
        }
        NightPhase::Died => {
            info!("Run over on night {}", session.night);
            exit.send(AppExit::Success);
        }
        _ => {}
    }
}
