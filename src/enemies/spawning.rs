//! Enemy spawning from loaded definitions.

use bevy::prelude::*;

use super::components::{
    AiState, ConfigFault, DoorPriority, Enemy, NightParams, Patrol, PatrolRoute,
};
use super::data::EnemyRegistry;
use crate::ambience::AmbientSpot;

/// Spawn every registered enemy at its starting waypoint, disabled.
///
/// An enemy whose route fails validation is still spawned, flagged with
/// [`ConfigFault`], so the fault is visible in the world - it just never
/// joins a night.
pub fn spawn_enemies(mut commands: Commands, registry: Res<EnemyRegistry>) {
    for (id, definition) in registry.definitions.iter() {
        let waypoints: Vec<Vec3> = definition
            .waypoints
            .iter()
            .map(|&(x, y, z)| Vec3::new(x, y, z))
            .collect();

        match PatrolRoute::new(definition.kind, waypoints, definition.kill_spot) {
            Ok(route) => {
                let start = route.position(PatrolRoute::START);
                let enemy = commands
                    .spawn((
                        Enemy,
                        definition.kind,
                        definition.stats.clone(),
                        NightParams::default(),
                        DoorPriority(definition.door_priority),
                        Patrol::default(),
                        AiState::default(),
                        route,
                        Transform::from_translation(start),
                        Name::new(definition.name.clone()),
                    ))
                    .id();

                for &index in &definition.ambient_waypoints {
                    commands.spawn((
                        AmbientSpot {
                            enemy,
                            waypoint_index: index,
                            active: false,
                        },
                        Name::new(format!("{} ambience {}", definition.name, index)),
                    ));
                }

                info!("Spawned enemy {} ({:?})", definition.name, definition.kind);
            }
            Err(e) => {
                error!("Enemy '{}' refuses to activate: {}", id, e);
                commands.spawn((
                    Enemy,
                    definition.kind,
                    definition.stats.clone(),
                    Patrol::default(),
                    AiState::default(),
                    ConfigFault,
                    Name::new(definition.name.clone()),
                ));
            }
        }
    }
}

/// OnExit(GameState::InGame): tear the cast down so a fresh session can
/// respawn it.
pub fn despawn_enemies(
    mut commands: Commands,
    enemies: Query<Entity, With<Enemy>>,
    spots: Query<Entity, With<AmbientSpot>>,
) {
    for entity in enemies.iter().chain(spots.iter()) {
        commands.entity(entity).despawn();
    }
}
