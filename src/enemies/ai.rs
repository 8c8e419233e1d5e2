//! Enemy AI behavior systems.
//!
//! Every enemy advances its own state machine once per tick. The
//! director's lifecycle systems run on state transitions, which Bevy
//! applies between ticks, so an enemy never observes a half-applied
//! night start or reset - and a reset broadcast always wins over an
//! enemy's own in-tick self-reset.

use bevy::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;

use super::arbiter::DoorWatch;
use super::components::{
    AiState, ConfigFault, DoorPriority, Enemy, EnemyKind, EnemyStats, NightParams, Patrol,
    PatrolRoute,
};
use super::policy::{self, MoveDecision};
use crate::core::{FlashEvent, KillEvent, WaypointReached};
use crate::director::NightSession;

/// The dice behind every movement roll. Seedable so tests can pin them.
#[derive(Resource)]
pub struct EnemyRng(pub StdRng);

impl Default for EnemyRng {
    fn default() -> Self {
        Self(StdRng::from_entropy())
    }
}

/// OnEnter(NightPhase::Active): rescale parameters and turn everyone
/// loose.
///
/// Runs synchronously in the state transition, before the night timer
/// ever ticks. Enemies whose first night hasn't come yet stay idle.
pub fn begin_night(
    session: Res<NightSession>,
    mut enemies: Query<
        (
            &EnemyKind,
            &EnemyStats,
            &mut NightParams,
            &mut Patrol,
            &mut AiState,
        ),
        (With<Enemy>, Without<ConfigFault>),
    >,
) {
    for (kind, stats, mut params, mut patrol, mut state) in enemies.iter_mut() {
        *params = policy::night_params(*kind, stats, session.night);
        patrol.first_move_done = false;

        if session.night < stats.min_active_night {
            debug!("{:?} sits out night {}", kind, session.night);
            continue;
        }

        patrol.movement_enabled = true;
        *state = AiState::Waiting {
            wait: initial_wait(*kind, &params),
        };
    }
}

/// OnEnter(NightPhase::Passed | Died): the director's reset broadcast.
///
/// Cancels whatever each enemy was doing - an in-flight move is
/// abandoned without committing its target - and forces everyone back
/// to their starting waypoint, disabled. Safe from any state and
/// idempotent.
pub fn reset_all_enemies(
    mut enemies: Query<(&PatrolRoute, &mut Patrol, &mut AiState, &mut Transform), With<Enemy>>,
) {
    for (route, mut patrol, mut state, mut transform) in enemies.iter_mut() {
        patrol.position_index = PatrolRoute::START;
        patrol.flash_count = 0;
        patrol.movement_enabled = false;
        patrol.first_move_done = false;
        *state = AiState::Idle;
        transform.translation = route.position(PatrolRoute::START);
    }
}

/// Apply the flash registration contract.
///
/// A flash counts only while the target stands at its door or kill spot,
/// unless its bypass flag says flashes count anywhere. In a standoff the
/// countdown system resolves the threshold; outside one, a bypassed
/// enemy that reaches the threshold resets immediately.
pub fn register_flashes(
    mut flashes: EventReader<FlashEvent>,
    session: Res<NightSession>,
    mut enemies: Query<
        (
            &EnemyKind,
            &EnemyStats,
            &mut NightParams,
            &PatrolRoute,
            &mut Patrol,
            &mut AiState,
            &mut Transform,
        ),
        (With<Enemy>, Without<ConfigFault>),
    >,
) {
    for flash in flashes.read() {
        let Ok((kind, stats, mut params, route, mut patrol, mut state, mut transform)) =
            enemies.get_mut(flash.target)
        else {
            // The flashlight hit something that is not an enemy.
            continue;
        };

        if !patrol.movement_enabled {
            continue;
        }

        let in_standoff = state.is_standoff();
        if !in_standoff && !stats.flash_anywhere {
            continue;
        }

        patrol.flash_count += 1;

        if !in_standoff && patrol.flash_count >= stats.required_flashes {
            *state = reset_to_start(
                *kind,
                stats,
                &mut params,
                &mut patrol,
                route,
                &mut transform,
                session.night,
            );
        }
    }
}

/// Advance every enemy's state machine by one tick.
pub fn advance_enemies(
    time: Res<Time>,
    session: Res<NightSession>,
    watch: Res<DoorWatch>,
    mut rng: ResMut<EnemyRng>,
    mut kills: EventWriter<KillEvent>,
    mut arrivals: EventWriter<WaypointReached>,
    mut enemies: Query<
        (
            Entity,
            &EnemyKind,
            &EnemyStats,
            &mut NightParams,
            &DoorPriority,
            &PatrolRoute,
            &mut Patrol,
            &mut AiState,
            &mut Transform,
        ),
        (With<Enemy>, Without<ConfigFault>),
    >,
) {
    for (entity, kind, stats, mut params, priority, route, mut patrol, mut state, mut transform) in
        enemies.iter_mut()
    {
        if !patrol.movement_enabled {
            continue;
        }

        let next = match &mut *state {
            AiState::Idle | AiState::Parked => None,

            AiState::Waiting { wait } => {
                wait.tick(time.delta());
                if !wait.finished() {
                    None
                } else {
                    let decision = policy::decide_move(
                        *kind,
                        &mut rng.0,
                        patrol.position_index,
                        route.len(),
                        &params,
                        stats,
                    );
                    match decision {
                        MoveDecision::Stay => Some(AiState::Waiting {
                            wait: next_wait(*kind, stats, &params),
                        }),
                        _ if decision.target() == Some(route.door_index())
                            && watch.blocks(priority.0) =>
                        {
                            // The door is claimed by a higher-priority
                            // enemy; the opportunity is skipped outright,
                            // not deferred.
                            debug!("{:?} yielded the door", kind);
                            Some(AiState::Waiting {
                                wait: next_wait(*kind, stats, &params),
                            })
                        }
                        MoveDecision::StepTo(target) => Some(AiState::Moving {
                            from: patrol.position_index,
                            target,
                            progress: Timer::from_seconds(stats.move_duration, TimerMode::Once),
                        }),
                        MoveDecision::TeleportTo(target) => {
                            patrol.position_index = target;
                            patrol.first_move_done = true;
                            transform.translation = route.position(target);
                            Some(arrive(
                                entity,
                                *kind,
                                stats,
                                &params,
                                route,
                                &mut patrol,
                                &mut arrivals,
                            ))
                        }
                    }
                }
            }

            AiState::Moving {
                from,
                target,
                progress,
            } => {
                progress.tick(time.delta());
                let start = route.position(*from);
                let end = route.position(*target);
                transform.translation = start.lerp(end, progress.fraction());
                if progress.finished() {
                    let target = *target;
                    patrol.position_index = target;
                    patrol.first_move_done = true;
                    transform.translation = end;
                    Some(arrive(
                        entity,
                        *kind,
                        stats,
                        &params,
                        route,
                        &mut patrol,
                        &mut arrivals,
                    ))
                } else {
                    None
                }
            }

            AiState::Standoff { countdown } => {
                if patrol.flash_count >= stats.required_flashes {
                    // Flashed out: straight back to the start, moving
                    // again without waiting for the next night start.
                    info!("{:?} was flashed away from the door", kind);
                    Some(reset_to_start(
                        *kind,
                        stats,
                        &mut params,
                        &mut patrol,
                        route,
                        &mut transform,
                        session.night,
                    ))
                } else {
                    countdown.tick(time.delta());
                    if countdown.finished() {
                        warn!("{:?} got to the player", kind);
                        kills.send(KillEvent { enemy: entity });
                        Some(AiState::Parked)
                    } else {
                        None
                    }
                }
            }
        };

        if let Some(new_state) = next {
            *state = new_state;
        }
    }
}

/// Handle landing on a waypoint: announce it, and either open a
/// standoff or schedule the next opportunity.
fn arrive(
    entity: Entity,
    kind: EnemyKind,
    stats: &EnemyStats,
    params: &NightParams,
    route: &PatrolRoute,
    patrol: &mut Patrol,
    arrivals: &mut EventWriter<WaypointReached>,
) -> AiState {
    arrivals.send(WaypointReached {
        enemy: entity,
        index: patrol.position_index,
    });

    if route.is_standoff_index(patrol.position_index) {
        patrol.flash_count = 0;
        info!("{:?} reached waypoint {} - standoff", kind, patrol.position_index);
        AiState::Standoff {
            countdown: Timer::from_seconds(stats.door_kill_delay, TimerMode::Once),
        }
    } else {
        AiState::Waiting {
            wait: next_wait(kind, stats, params),
        }
    }
}

/// Send an enemy back to its starting waypoint and rearm its schedule.
/// Unlike the director's reset broadcast this keeps movement enabled.
fn reset_to_start(
    kind: EnemyKind,
    stats: &EnemyStats,
    params: &mut NightParams,
    patrol: &mut Patrol,
    route: &PatrolRoute,
    transform: &mut Transform,
    night: u32,
) -> AiState {
    patrol.position_index = PatrolRoute::START;
    patrol.flash_count = 0;
    patrol.first_move_done = false;
    transform.translation = route.position(PatrolRoute::START);
    *params = policy::night_params(kind, stats, night);
    AiState::Waiting {
        wait: initial_wait(kind, params),
    }
}

/// The wait armed at a night start or a reset to the starting waypoint.
fn initial_wait(kind: EnemyKind, params: &NightParams) -> Timer {
    let seconds = if kind.is_fixed_schedule() {
        params.first_wait
    } else {
        params.wait_interval
    };
    Timer::from_seconds(seconds, TimerMode::Once)
}

/// The wait that follows a resolved opportunity or an arrival.
fn next_wait(kind: EnemyKind, stats: &EnemyStats, params: &NightParams) -> Timer {
    let mut wait = Timer::from_seconds(params.wait_interval, TimerMode::Once);
    if kind.is_fixed_schedule() && !stats.repeat_moves {
        // One-shot schedule: nothing further until a reset rearms it.
        wait.pause();
    }
    wait
}
