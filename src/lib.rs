//! Night Shift - a single-location survival-horror simulation in Bevy.
//!
//! The player hides in one room, watches cameras, and flashes a light at
//! animatronics that creep waypoint by waypoint toward the door. Being
//! caught at the door without enough flashes ends the night the bad way.
//!
//! This crate is the headless gameplay core. Rendering, physics, audio
//! mixing and UI layout live elsewhere and talk to it through events:
//! the flashlight sends `FlashEvent`s in, the director's kill handling
//! and the ambient spots are what comes out.
//!
//! # Architecture
//!
//! The game is organized into plugins, each handling a specific aspect:
//!
//! - **Core**: Game states, global events
//! - **Enemies**: Per-enemy movement state machines, the decision
//!   policy, and the door arbiter
//! - **Director**: Night progression, the in-fiction clock, kill
//!   handling, menu choices
//! - **Ambience**: Sound spots that react to enemy arrivals
//! - **Persistence**: The single-integer night checkpoint

pub mod ambience;
pub mod core;
pub mod director;
pub mod enemies;
pub mod persistence;

use bevy::prelude::*;

/// Main game plugin that adds all sub-plugins.
pub struct NightShiftPlugin;

impl Plugin for NightShiftPlugin {
    fn build(&self, app: &mut App) {
        app
            // Core systems (must be first)
            .add_plugins(core::CorePlugin)
            // Enemy systems
            .add_plugins(enemies::EnemyPlugin)
            // Night direction
            .add_plugins(director::DirectorPlugin)
            // Ambient sound spots
            .add_plugins(ambience::AmbiencePlugin);
    }
}
