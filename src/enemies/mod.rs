//! Enemies module - the animatronic agents, their AI, and spawning.

mod ai;
mod arbiter;
mod components;
pub mod data;
mod error;
mod plugin;
pub mod policy;
mod spawning;

pub use ai::{advance_enemies, begin_night, register_flashes, reset_all_enemies, EnemyRng};
pub use arbiter::{track_door_standoffs, DoorWatch};
pub use components::*;
pub use data::{EnemyDataDir, EnemyDefinition, EnemyRegistry};
pub use error::EnemyConfigError;
pub use plugin::EnemyPlugin;
