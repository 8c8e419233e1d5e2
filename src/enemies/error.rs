//! Error types for enemy configuration.

use thiserror::Error;

use super::components::EnemyKind;

/// Errors that make an enemy refuse to activate.
#[derive(Debug, Error)]
pub enum EnemyConfigError {
    /// The waypoint route is too short for the behavior to operate on.
    #[error("{kind:?} needs at least {required} waypoints, got {actual}")]
    NotEnoughWaypoints {
        kind: EnemyKind,
        required: usize,
        actual: usize,
    },
}
