//! Enemy data loading from RON files.

use bevy::prelude::*;
use serde::Deserialize;
use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;

use super::components::{EnemyKind, EnemyStats};

/// Where enemy definition files live. Tests point this somewhere else.
#[derive(Resource, Clone)]
pub struct EnemyDataDir(pub PathBuf);

impl Default for EnemyDataDir {
    fn default() -> Self {
        Self(PathBuf::from("assets/data/enemies"))
    }
}

/// Enemy definition loaded from RON file.
#[derive(Deserialize, Clone, Debug)]
pub struct EnemyDefinition {
    pub name: String,
    pub kind: EnemyKind,
    /// Arbiter rank; lower values claim the door first.
    #[serde(default)]
    pub door_priority: u8,
    /// Route through the building; the last entry is the player's door.
    pub waypoints: Vec<(f32, f32, f32)>,
    /// Optional interior waypoint that also opens a standoff.
    #[serde(default)]
    pub kill_spot: Option<usize>,
    /// Waypoint indices with an ambient sound spot listening on them.
    #[serde(default)]
    pub ambient_waypoints: Vec<usize>,
    /// Base behavior parameters; missing fields fall back to defaults.
    #[serde(default)]
    pub stats: EnemyStats,
}

/// Resource holding all loaded enemy definitions, keyed by file stem.
#[derive(Resource, Default)]
pub struct EnemyRegistry {
    pub definitions: HashMap<String, EnemyDefinition>,
}

impl EnemyRegistry {
    /// Get an enemy definition by its identifier.
    pub fn get(&self, id: &str) -> Option<&EnemyDefinition> {
        self.definitions.get(id)
    }
}

/// Load all enemy definitions from the data directory.
///
/// A missing directory or an unparsable file is logged and skipped;
/// running with fewer enemies than expected is not an error.
pub fn load_enemy_definitions(data_dir: Res<EnemyDataDir>, mut registry: ResMut<EnemyRegistry>) {
    registry.definitions.clear();

    let dir = &data_dir.0;
    if !dir.exists() {
        warn!("Enemy definitions directory not found: {:?}", dir);
        return;
    }

    let Ok(entries) = fs::read_dir(dir) else {
        warn!("Failed to read enemy definitions directory");
        return;
    };

    for entry in entries.flatten() {
        let path = entry.path();

        if path.extension().is_some_and(|ext| ext == "ron") {
            let id = path
                .file_stem()
                .and_then(|s| s.to_str())
                .unwrap_or("unknown")
                .to_string();

            match fs::read_to_string(&path) {
                Ok(contents) => match ron::from_str::<EnemyDefinition>(&contents) {
                    Ok(definition) => {
                        info!("Loaded enemy definition: {} ({})", definition.name, id);
                        registry.definitions.insert(id, definition);
                    }
                    Err(e) => {
                        error!("Failed to parse enemy definition {:?}: {}", path, e);
                    }
                },
                Err(e) => {
                    error!("Failed to read enemy definition {:?}: {}", path, e);
                }
            }
        }
    }

    info!("Loaded {} enemy definitions", registry.definitions.len());
}
