//! Game state definitions that control the overall flow of the game.
//!
//! States determine which systems run at any given time. For example,
//! enemy AI only advances while a night is active, while the title
//! screen ignores the simulation entirely.

use bevy::prelude::*;

/// Main game states - controls overall game flow.
///
/// The game transitions between these states based on player actions:
/// - Start in `TitleScreen` until a session begins
/// - Enter `InGame` when the player starts/continues; the night cycle
///   itself is tracked by [`NightPhase`]
#[derive(States, Debug, Clone, Copy, Eq, PartialEq, Hash, Default)]
pub enum GameState {
    /// Title screen / main menu
    #[default]
    TitleScreen,
    /// Active session - a sequence of nights
    InGame,
}

/// Sub-states for the night cycle - only active when GameState::InGame.
///
/// One night runs `Showing -> Active -> Passed | Died`, then loops back
/// to `Showing` for the next night (or a retry of the same one):
/// - `Showing`: the "Night N" card is up; enemies are inert
/// - `Active`: the night timer runs and enemies stalk the player
/// - `Passed`: 6 AM reached; the night counter advances and persists
/// - `Died`: an enemy reached the player; retry or return to title
#[derive(SubStates, Debug, Clone, Copy, Eq, PartialEq, Hash, Default)]
#[source(GameState = GameState::InGame)]
pub enum NightPhase {
    /// Night label is being shown, timer not yet running
    #[default]
    Showing,
    /// The night is in progress
    Active,
    /// The player survived until 6 AM
    Passed,
    /// An enemy got to the player
    Died,
}
