//! Director module - night progression, session state, and the clock.

mod plugin;
mod session;
mod systems;

pub use plugin::DirectorPlugin;
pub use session::{clock_display, DirectorConfig, NightSession};
