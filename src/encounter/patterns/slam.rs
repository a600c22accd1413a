//! Slam pattern
//!
//! A fixed number of ground slams. Each repetition shows a radial cue, waits
//! half the interval, runs one radial damage query against the player, waits
//! the other half, then requests a camera shake. The boss does not move.

use bevy::prelude::*;

use crate::log::{EncounterLog, EncounterLogEventType};

use super::super::components::{Phase, Player, PlayerKilled};
use super::super::config::{EncounterConfig, SlamTuning};
use super::super::constants::{
    RAGE_SLAM_EFFECT_LIFETIME, SHOCKWAVE_LIFETIME, SLAM_EFFECT_LIFETIME,
};
use super::super::effects::{CameraShakeRequest, EffectKind, EffectRequest};
use super::super::spatial::within_radius;

pub struct SlamState {
    /// Repetitions still to run, including the current one
    pub reps_left: u32,
    pub stage: SlamStage,
}

pub enum SlamStage {
    /// Entry point of each repetition: show the cue, then wind up
    Begin,
    /// First half-interval; the damage query fires when this expires
    Windup { remaining: f32 },
    /// Second half-interval; the shake fires when this expires
    Recover { remaining: f32 },
}

impl SlamState {
    pub fn new(tuning: &SlamTuning) -> SlamState {
        SlamState {
            reps_left: tuning.count,
            stage: SlamStage::Begin,
        }
    }
}

/// Advance the slam by one tick. Returns true when all repetitions are done.
#[allow(clippy::too_many_arguments)]
pub fn step(
    state: &mut SlamState,
    dt: f32,
    tuning: &SlamTuning,
    config: &EncounterConfig,
    phase: Phase,
    boss_pos: Vec2,
    player_pos: Vec2,
    player: &mut Player,
    effects: &mut EventWriter<EffectRequest>,
    shakes: &mut EventWriter<CameraShakeRequest>,
    killed: &mut EventWriter<PlayerKilled>,
    log: &mut EncounterLog,
) -> bool {
    match &mut state.stage {
        SlamStage::Begin => {
            let cue_lifetime = match phase {
                Phase::Normal => SLAM_EFFECT_LIFETIME,
                Phase::Rage => RAGE_SLAM_EFFECT_LIFETIME,
            };
            effects.send(EffectRequest {
                kind: EffectKind::SlamCue,
                position: boss_pos,
                scale: tuning.radius,
                lifetime: cue_lifetime,
                phase,
            });
            effects.send(EffectRequest {
                kind: EffectKind::Shockwave,
                position: boss_pos,
                scale: tuning.radius,
                lifetime: SHOCKWAVE_LIFETIME,
                phase,
            });
            state.stage = SlamStage::Windup {
                remaining: tuning.interval * 0.5,
            };
            false
        }
        SlamStage::Windup { remaining } => {
            *remaining -= dt;
            if *remaining > 0.0 {
                return false;
            }

            let total = tuning.count;
            let rep = total - state.reps_left + 1;
            let hit = !player.dead && within_radius(boss_pos, tuning.radius, player_pos);
            log.log(
                EncounterLogEventType::EncounterEvent,
                format!("Slam strike {}/{} hit={}", rep, total, hit),
            );
            if hit && player.kill() {
                killed.send(PlayerKilled { at: boss_pos });
                log.log(
                    EncounterLogEventType::PlayerKilled,
                    format!("Player killed by Slam strike {}/{}", rep, total),
                );
            }

            state.stage = SlamStage::Recover {
                remaining: tuning.interval * 0.5,
            };
            false
        }
        SlamStage::Recover { remaining } => {
            *remaining -= dt;
            if *remaining > 0.0 {
                return false;
            }

            shakes.send(CameraShakeRequest {
                intensity: config.shake_intensity * tuning.shake_multiplier,
                duration: config.shake_duration,
            });

            state.reps_left -= 1;
            if state.reps_left == 0 {
                return true;
            }
            state.stage = SlamStage::Begin;
            false
        }
    }
}
