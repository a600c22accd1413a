//! Rush pattern
//!
//! A series of dash iterations, each its own sub-machine: show a path warning,
//! dash toward a captured target with per-tick contact kills, force a descent
//! back to ground level if the dash ended airborne, then cool down. The dash
//! target is captured fresh at the start of every iteration and overshoots
//! the player's position so the boss charges through rather than stopping on
//! top of them.
//!
//! The boss flags `is_rushing` and `is_descending` are owned here. They gate
//! the follow AI and tell external systems the boss's motion is ballistic.

use bevy::prelude::*;

use crate::log::{EncounterLog, EncounterLogEventType};

use super::super::components::{BossEncounter, Phase, Player, PlayerKilled, Velocity};
use super::super::config::{EncounterConfig, RushTuning};
use super::super::constants::{
    DESCENT_EFFECT_LIFETIME, LANDING_SHAKE_DURATION, RUSH_TRAIL_LIFETIME, SHOCKWAVE_LIFETIME,
};
use super::super::effects::{CameraShakeRequest, EffectKind, EffectRequest};
use super::super::spatial::{distance_and_direction, within_radius};

/// One dash iteration's captured parameters. Built at iteration start and
/// never updated from the player's later movement.
pub struct RushJob {
    /// Point the dash steers toward (player position plus overshoot)
    pub target: Vec2,
    /// Initial dash direction, kept for the path indicator
    pub direction: Vec2,
}

pub struct RushState {
    /// Dash iterations still to run, including the current one
    pub iterations_left: u32,
    pub stage: RushStage,
}

pub enum RushStage {
    /// Entry point of each iteration: capture the job, show the warning
    Begin,
    /// Path indicator is visible; the boss holds still
    Warning { remaining: f32, job: RushJob },
    /// The dash itself; velocity is rewritten toward the target every tick
    Execute { remaining: f32, job: RushJob },
    /// Forced fall back to ground level after an airborne dash
    Descend,
    /// Brief hold after touching down
    Landed { remaining: f32 },
    /// Pause before the next iteration (or pattern completion)
    Cooldown { remaining: f32 },
}

impl RushState {
    pub fn new(tuning: &RushTuning) -> RushState {
        RushState {
            iterations_left: tuning.times,
            stage: RushStage::Begin,
        }
    }
}

/// Advance the rush by one tick. Returns true when all iterations are done.
#[allow(clippy::too_many_arguments)]
pub fn step(
    state: &mut RushState,
    dt: f32,
    tuning: &RushTuning,
    config: &EncounterConfig,
    phase: Phase,
    boss_pos: Vec2,
    player_pos: Vec2,
    boss: &mut BossEncounter,
    velocity: &mut Velocity,
    player: &mut Player,
    effects: &mut EventWriter<EffectRequest>,
    shakes: &mut EventWriter<CameraShakeRequest>,
    killed: &mut EventWriter<PlayerKilled>,
    log: &mut EncounterLog,
) -> bool {
    match &mut state.stage {
        RushStage::Begin => {
            let (distance, direction) = distance_and_direction(boss_pos, player_pos);
            // Coincident positions still need a dash direction
            let direction = if direction == Vec2::ZERO {
                Vec2::X
            } else {
                direction
            };
            let target = player_pos + direction * tuning.overshoot;

            effects.send(EffectRequest {
                kind: EffectKind::RushPath,
                position: boss_pos + direction * (distance * 0.5),
                scale: distance + tuning.overshoot,
                lifetime: tuning.warning_time,
                phase,
            });
            state.stage = RushStage::Warning {
                remaining: tuning.warning_time,
                job: RushJob { target, direction },
            };
            false
        }
        RushStage::Warning { remaining, job } => {
            *remaining -= dt;
            if *remaining > 0.0 {
                return false;
            }

            boss.is_rushing = true;
            effects.send(EffectRequest {
                kind: EffectKind::RushTrail,
                position: boss_pos,
                scale: 1.0,
                lifetime: RUSH_TRAIL_LIFETIME,
                phase,
            });
            let job = RushJob {
                target: job.target,
                direction: job.direction,
            };
            state.stage = RushStage::Execute {
                remaining: tuning.duration,
                job,
            };
            false
        }
        RushStage::Execute { remaining, job } => {
            // Steer toward the captured target every tick so an early contact
            // or external push does not send the boss off to infinity
            let (_, direction) = distance_and_direction(boss_pos, job.target);
            if direction != Vec2::ZERO {
                velocity.0 = direction * tuning.speed;
            }

            if !player.dead
                && within_radius(boss_pos, config.rush_damage_radius, player_pos)
                && player.kill()
            {
                killed.send(PlayerKilled { at: boss_pos });
                log.log(
                    EncounterLogEventType::PlayerKilled,
                    "Player killed by Rush contact".to_string(),
                );
            }

            *remaining -= dt;
            if *remaining > 0.0 {
                return false;
            }

            velocity.0 = Vec2::ZERO;
            boss.is_rushing = false;

            if boss_pos.y > config.ground_level + config.airborne_epsilon {
                boss.is_descending = true;
                effects.send(EffectRequest {
                    kind: EffectKind::Descent,
                    position: boss_pos,
                    scale: 1.0,
                    lifetime: DESCENT_EFFECT_LIFETIME,
                    phase,
                });
                state.stage = RushStage::Descend;
            } else {
                state.stage = RushStage::Cooldown {
                    remaining: tuning.cooldown,
                };
            }
            false
        }
        RushStage::Descend => {
            velocity.0.y = -tuning.descent_speed;
            velocity.0.x *= config.rush_horizontal_damping;

            if boss_pos.y <= config.ground_level + config.landing_epsilon {
                velocity.0 = Vec2::ZERO;
                effects.send(EffectRequest {
                    kind: EffectKind::Landing,
                    position: Vec2::new(boss_pos.x, config.ground_level),
                    scale: 1.0,
                    lifetime: SHOCKWAVE_LIFETIME,
                    phase,
                });
                let landing_multiplier = match phase {
                    Phase::Normal => 0.5,
                    Phase::Rage => 0.7,
                };
                shakes.send(CameraShakeRequest {
                    intensity: config.shake_intensity * landing_multiplier,
                    duration: LANDING_SHAKE_DURATION,
                });
                state.stage = RushStage::Landed {
                    remaining: config.landed_hold,
                };
            }
            false
        }
        RushStage::Landed { remaining } => {
            *remaining -= dt;
            if *remaining > 0.0 {
                return false;
            }
            boss.is_descending = false;
            state.stage = RushStage::Cooldown {
                remaining: tuning.cooldown,
            };
            false
        }
        RushStage::Cooldown { remaining } => {
            *remaining -= dt;
            if *remaining > 0.0 {
                return false;
            }
            state.iterations_left -= 1;
            if state.iterations_left == 0 {
                return true;
            }
            state.stage = RushStage::Begin;
            false
        }
    }
}
