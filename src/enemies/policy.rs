//! Pure decision policy for enemy movement.
//!
//! Per-night parameter scaling and per-opportunity movement rolls as
//! plain functions over an RNG. No ECS dependency - the AI systems feed
//! these from components, and the tests feed them seeded dice.

use rand::Rng;

use super::components::{EnemyKind, EnemyStats, NightParams};

/// Outcome of one movement opportunity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveDecision {
    /// Opportunity not taken; keep waiting.
    Stay,
    /// Walk one waypoint to the given index.
    StepTo(usize),
    /// Jump instantly to the given index.
    TeleportTo(usize),
}

impl MoveDecision {
    /// The waypoint this decision commits to, if any.
    pub fn target(self) -> Option<usize> {
        match self {
            MoveDecision::Stay => None,
            MoveDecision::StepTo(index) | MoveDecision::TeleportTo(index) => Some(index),
        }
    }
}

/// Per-night chance scaling: `base + (night - 1) * step`, clamped to
/// `[0, max]`.
pub fn scaled_chance(base: f32, step: f32, night: u32, max: f32) -> f32 {
    (base + night.saturating_sub(1) as f32 * step).clamp(0.0, max)
}

/// Per-night interval scaling for opportunistic movers:
/// `base * multiplier^(night - 1)`, floored at `min`.
pub fn scaled_interval(base: f32, multiplier: f32, night: u32, min: f32) -> f32 {
    (base * multiplier.powi(night.saturating_sub(1) as i32)).max(min)
}

/// Per-night schedule scaling for fixed-schedule movers:
/// `base + (night - 1) * step`, floored at `min`.
pub fn scaled_schedule(base: f32, step: f32, night: u32, min: f32) -> f32 {
    (base + night.saturating_sub(1) as f32 * step).max(min)
}

/// Recompute every scaled parameter for the given night.
pub fn night_params(kind: EnemyKind, stats: &EnemyStats, night: u32) -> NightParams {
    NightParams {
        move_chance: scaled_chance(stats.move_chance, stats.chance_step, night, stats.max_chance),
        forward_chance: scaled_chance(
            stats.forward_chance,
            stats.chance_step,
            night,
            stats.max_chance,
        ),
        backward_chance: scaled_chance(
            stats.backward_chance,
            stats.chance_step,
            night,
            stats.max_chance,
        ),
        wait_interval: if kind.is_fixed_schedule() {
            scaled_schedule(stats.wait_interval, stats.schedule_step, night, stats.min_interval)
        } else {
            scaled_interval(
                stats.wait_interval,
                stats.interval_multiplier,
                night,
                stats.min_interval,
            )
        },
        first_wait: scaled_schedule(
            stats.first_move_time,
            stats.schedule_step,
            night,
            stats.min_interval,
        ),
    }
}

/// Resolve one movement opportunity for an enemy standing at `current`
/// on a route of `route_len` waypoints.
pub fn decide_move(
    kind: EnemyKind,
    rng: &mut impl Rng,
    current: usize,
    route_len: usize,
    params: &NightParams,
    stats: &EnemyStats,
) -> MoveDecision {
    match kind {
        EnemyKind::Stepper => {
            if !roll(rng, params.move_chance) {
                return MoveDecision::Stay;
            }
            let backward = stats.backward_steps && rng.gen_bool(0.5);
            MoveDecision::StepTo(step_from(current, backward, route_len))
        }
        EnemyKind::RandomStepper => {
            // Two independent rolls, at most one step per opportunity.
            // From the starting spot only forward is attempted.
            if current + 1 < route_len && roll(rng, params.forward_chance) {
                MoveDecision::StepTo(current + 1)
            } else if current > 0 && roll(rng, params.backward_chance) {
                MoveDecision::StepTo(current - 1)
            } else {
                MoveDecision::Stay
            }
        }
        EnemyKind::Teleporter | EnemyKind::RandomTeleporter => {
            match random_other_index(rng, current, route_len) {
                Some(index) => MoveDecision::TeleportTo(index),
                None => MoveDecision::Stay,
            }
        }
    }
}

fn roll(rng: &mut impl Rng, chance: f32) -> bool {
    chance > 0.0 && rng.gen::<f32>() < chance
}

/// One step in the chosen direction, reflecting off the ends of the
/// route instead of standing still.
fn step_from(current: usize, backward: bool, route_len: usize) -> usize {
    if backward {
        if current == 0 {
            1
        } else {
            current - 1
        }
    } else if current + 1 >= route_len {
        current - 1
    } else {
        current + 1
    }
}

/// Uniform draw over the route excluding `current`. `None` when the
/// route has nowhere else to go.
fn random_other_index(rng: &mut impl Rng, current: usize, route_len: usize) -> Option<usize> {
    if route_len < 2 {
        return None;
    }
    let raw = rng.gen_range(0..route_len - 1);
    Some(if raw >= current { raw + 1 } else { raw })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn rng() -> StdRng {
        StdRng::seed_from_u64(0x5eed)
    }

    #[test]
    fn chance_scaling_is_monotonic_up_to_the_clamp() {
        let mut previous = 0.0;
        for night in 1..=10 {
            let chance = scaled_chance(0.2, 0.07, night, 0.8);
            assert!(chance >= previous, "night {night} regressed");
            assert!(chance <= 0.8);
            previous = chance;
        }
        assert_eq!(scaled_chance(0.2, 0.07, 10, 0.8), 0.8);
    }

    #[test]
    fn interval_scaling_shrinks_toward_the_floor() {
        let mut previous = f32::INFINITY;
        for night in 1..=12 {
            let interval = scaled_interval(8.0, 0.8, night, 2.0);
            assert!(interval <= previous, "night {night} grew");
            assert!(interval >= 2.0);
            previous = interval;
        }
        assert_eq!(scaled_interval(8.0, 0.8, 12, 2.0), 2.0);
    }

    #[test]
    fn schedule_scaling_respects_the_floor() {
        assert_eq!(scaled_schedule(30.0, -4.0, 1, 5.0), 30.0);
        assert_eq!(scaled_schedule(30.0, -4.0, 3, 5.0), 22.0);
        assert_eq!(scaled_schedule(30.0, -4.0, 20, 5.0), 5.0);
    }

    #[test]
    fn stepper_never_moves_with_zero_chance() {
        let stats = EnemyStats::default();
        let params = NightParams {
            move_chance: 0.0,
            ..Default::default()
        };
        let mut rng = rng();
        for _ in 0..100 {
            let decision = decide_move(EnemyKind::Stepper, &mut rng, 1, 5, &params, &stats);
            assert_eq!(decision, MoveDecision::Stay);
        }
    }

    #[test]
    fn stepper_with_certain_chance_and_no_backward_always_advances() {
        let stats = EnemyStats {
            backward_steps: false,
            ..Default::default()
        };
        let params = NightParams {
            move_chance: 1.0,
            ..Default::default()
        };
        let mut rng = rng();
        for current in 0..3 {
            let decision = decide_move(EnemyKind::Stepper, &mut rng, current, 5, &params, &stats);
            assert_eq!(decision, MoveDecision::StepTo(current + 1));
        }
    }

    #[test]
    fn stepper_reflects_at_route_boundaries() {
        assert_eq!(step_from(0, true, 5), 1);
        assert_eq!(step_from(4, false, 5), 3);
        assert_eq!(step_from(2, true, 5), 1);
        assert_eq!(step_from(2, false, 5), 3);
    }

    #[test]
    fn random_stepper_only_goes_forward_from_the_start() {
        let stats = EnemyStats::default();
        let params = NightParams {
            forward_chance: 0.0,
            backward_chance: 1.0,
            ..Default::default()
        };
        let mut rng = rng();
        for _ in 0..100 {
            let decision = decide_move(EnemyKind::RandomStepper, &mut rng, 0, 5, &params, &stats);
            assert_eq!(decision, MoveDecision::Stay);
        }
        let decision = decide_move(EnemyKind::RandomStepper, &mut rng, 2, 5, &params, &stats);
        assert_eq!(decision, MoveDecision::StepTo(1));
    }

    #[test]
    fn random_stepper_takes_at_most_one_step() {
        let stats = EnemyStats::default();
        let params = NightParams {
            forward_chance: 1.0,
            backward_chance: 1.0,
            ..Default::default()
        };
        let mut rng = rng();
        let decision = decide_move(EnemyKind::RandomStepper, &mut rng, 2, 5, &params, &stats);
        assert_eq!(decision, MoveDecision::StepTo(3));
    }

    #[test]
    fn teleport_target_is_in_bounds_and_never_the_current_spot() {
        let stats = EnemyStats::default();
        let params = NightParams::default();
        let mut rng = rng();
        for _ in 0..500 {
            match decide_move(EnemyKind::Teleporter, &mut rng, 3, 7, &params, &stats) {
                MoveDecision::TeleportTo(index) => {
                    assert!(index < 7);
                    assert_ne!(index, 3);
                }
                other => panic!("unexpected decision {other:?}"),
            }
        }
    }

    #[test]
    fn teleporter_stays_on_a_single_waypoint_route() {
        let stats = EnemyStats::default();
        let params = NightParams::default();
        let mut rng = rng();
        let decision = decide_move(EnemyKind::Teleporter, &mut rng, 0, 1, &params, &stats);
        assert_eq!(decision, MoveDecision::Stay);
    }
}
