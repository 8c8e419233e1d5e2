//! Director systems - night flow, the clock, kill handling, and menu
//! choices.

use bevy::prelude::*;

use super::session::{clock_display, DirectorConfig, NightSession};
use crate::core::{GameState, KillEvent, MenuChoice, NightPhase};
use crate::persistence::{self, CheckpointPath};

/// OnEnter(GameState::InGame): pick up where the checkpoint left off.
pub fn load_session(
    mut session: ResMut<NightSession>,
    config: Res<DirectorConfig>,
    path: Res<CheckpointPath>,
) {
    let night = persistence::load_night(&path.0, config.max_nights);
    *session = NightSession {
        night,
        ..Default::default()
    };
    info!("Session start - night {}", night);
}

/// OnEnter(NightPhase::Showing): put the night card up.
pub fn show_night_card(mut session: ResMut<NightSession>, config: Res<DirectorConfig>) {
    session.intro_remaining = config.intro_seconds;
    info!("Night {}", session.night);
}

/// Count the night card down, then start the night.
pub fn tick_night_card(
    time: Res<Time>,
    mut session: ResMut<NightSession>,
    mut next: ResMut<NextState<NightPhase>>,
) {
    session.intro_remaining -= time.delta_secs();
    if session.intro_remaining <= 0.0 {
        next.set(NightPhase::Active);
    }
}

/// OnEnter(NightPhase::Active): arm the night timer.
pub fn start_night(mut session: ResMut<NightSession>, config: Res<DirectorConfig>) {
    session.elapsed = 0.0;
    session.duration = config.night_duration(session.night);
    session.last_hour = None;
    info!(
        "12:00 AM - night {} begins ({} seconds to 6 AM)",
        session.night, session.duration
    );
}

/// Advance the clock; reaching 6 AM ends the night.
pub fn tick_night(
    time: Res<Time>,
    mut session: ResMut<NightSession>,
    mut next: ResMut<NextState<NightPhase>>,
) {
    session.elapsed += time.delta_secs();

    let (hour, _) = clock_display(session.progress());
    if session.last_hour != Some(hour) {
        session.last_hour = Some(hour);
        if hour != 12 {
            info!("{}:00 AM", hour);
        }
    }

    if session.elapsed >= session.duration {
        next.set(NightPhase::Passed);
    }
}

/// Any kill ends the night. Runs after the enemy AI so a kill fired this
/// tick is seen this tick; losing beats winning if both land at once.
pub fn handle_kills(
    mut kills: EventReader<KillEvent>,
    mut session: ResMut<NightSession>,
    mut next: ResMut<NextState<NightPhase>>,
) {
    if kills.read().next().is_some() {
        session.player_died = true;
        next.set(NightPhase::Died);
    }
}

/// OnEnter(NightPhase::Passed): advance and persist the night counter.
///
/// The reset broadcast to the enemies rides the same transition, so the
/// cast is already inert by the time anything is shown to the player.
pub fn complete_night(
    mut session: ResMut<NightSession>,
    config: Res<DirectorConfig>,
    path: Res<CheckpointPath>,
) {
    info!("6:00 AM - night {} survived", session.night);
    session.night = (session.night + 1).min(config.max_nights);
    if let Err(e) = persistence::save_night(&path.0, session.night, config.max_nights) {
        warn!("Failed to save checkpoint: {}", e);
    }
}

/// Act on the player's choice from the night-passed / death screens.
pub fn handle_menu_choices(
    mut choices: EventReader<MenuChoice>,
    phase: Res<State<NightPhase>>,
    mut session: ResMut<NightSession>,
    mut next_phase: ResMut<NextState<NightPhase>>,
    mut next_game: ResMut<NextState<GameState>>,
) {
    for choice in choices.read() {
        match (*choice, *phase.get()) {
            (MenuChoice::ContinueToNextNight, NightPhase::Passed) => {
                next_phase.set(NightPhase::Showing);
            }
            (MenuChoice::RetryNight, NightPhase::Died) => {
                session.player_died = false;
                next_phase.set(NightPhase::Showing);
            }
            (MenuChoice::ReturnToTitle, _) => {
                next_game.set(GameState::TitleScreen);
            }
            _ => {}
        }
    }
}
