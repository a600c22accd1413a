//! EnergyWave pattern
//!
//! Spawns a series of ground wave projectiles marching away from the boss at
//! fixed spacing. Direction toward the player is captured once at pattern
//! start; moving behind the boss afterward does not redirect the series. The
//! rage tier fires both directions at once.
//!
//! Waves are spawned as effect requests only. Their collision behavior is the
//! projectile's own, outside this crate.

use bevy::prelude::*;

use super::super::components::Phase;
use super::super::config::{EncounterConfig, WaveTuning};
use super::super::effects::{EffectKind, EffectRequest};

pub struct WaveState {
    pub stage: WaveStage,
    /// +1.0 or -1.0 along x, captured at pattern start
    pub direction: f32,
    /// Boss position at pattern start; all spawn points derive from it
    pub origin: Vec2,
    /// Waves already spawned (per direction)
    pub spawned: u32,
}

pub enum WaveStage {
    /// Capture direction and origin, spawn the first wave
    Begin,
    /// Waiting out the spawn interval; more waves may follow
    Spawning { next_in: f32 },
    /// All waves out; short pause before the pattern ends
    Settle { remaining: f32 },
}

impl WaveState {
    pub fn new() -> WaveState {
        WaveState {
            stage: WaveStage::Begin,
            direction: 1.0,
            origin: Vec2::ZERO,
            spawned: 0,
        }
    }

    fn spawn_wave(
        &mut self,
        tuning: &WaveTuning,
        config: &EncounterConfig,
        phase: Phase,
        effects: &mut EventWriter<EffectRequest>,
    ) {
        self.spawned += 1;
        let offset = self.spawned as f32 * tuning.spacing;
        let ground_y = self.origin.y - config.wave_ground_offset;

        effects.send(EffectRequest {
            kind: EffectKind::WaveProjectile,
            position: Vec2::new(self.origin.x + offset * self.direction, ground_y),
            scale: 1.0,
            lifetime: config.wave_lifetime,
            phase,
        });
        if tuning.mirrored {
            effects.send(EffectRequest {
                kind: EffectKind::WaveProjectile,
                position: Vec2::new(self.origin.x - offset * self.direction, ground_y),
                scale: 1.0,
                lifetime: config.wave_lifetime,
                phase,
            });
        }
    }
}

impl Default for WaveState {
    fn default() -> Self {
        Self::new()
    }
}

/// Advance the wave series by one tick. Returns true when settled.
pub fn step(
    state: &mut WaveState,
    dt: f32,
    tuning: &WaveTuning,
    config: &EncounterConfig,
    phase: Phase,
    boss_pos: Vec2,
    player_pos: Vec2,
    effects: &mut EventWriter<EffectRequest>,
) -> bool {
    match &mut state.stage {
        WaveStage::Begin => {
            state.origin = boss_pos;
            state.direction = if player_pos.x >= boss_pos.x { 1.0 } else { -1.0 };
            state.spawn_wave(tuning, config, phase, effects);
            state.stage = WaveStage::Spawning {
                next_in: tuning.interval,
            };
            false
        }
        WaveStage::Spawning { next_in } => {
            *next_in -= dt;
            if *next_in > 0.0 {
                return false;
            }

            if state.spawned < tuning.count {
                state.spawn_wave(tuning, config, phase, effects);
                state.stage = WaveStage::Spawning {
                    next_in: tuning.interval,
                };
            } else {
                state.stage = WaveStage::Settle {
                    remaining: tuning.settle,
                };
            }
            false
        }
        WaveStage::Settle { remaining } => {
            *remaining -= dt;
            *remaining <= 0.0
        }
    }
}
