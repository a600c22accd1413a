//! Damage intake and the death lifecycle
//!
//! Damage events are drained by a single system per tick, so the death branch
//! can never run twice for one boss: the `dying` flag is set before any other
//! event in the same batch is examined. Death is an atomic teardown followed
//! by a timed cosmetic sequence on [`DyingState`].

use bevy::prelude::*;

use crate::log::{EncounterLog, EncounterLogEventType};

use super::components::{
    BossEncounter, DyingState, GameRng, HitFlash, MotionOwner, Scheduler, SchedulerState, Velocity,
};
use super::config::EncounterConfig;
use super::constants::{DEATH_EXPLOSION_LIFETIME, HIT_BURST_LIFETIME};
use super::effects::{BeamEmitter, CameraShake, EffectKind, EffectRequest, EncounterEffect};
use super::patterns::ActivePattern;
use super::spatial::position_of;

/// Damage dealt to the boss. Source attribution is external; the boss only
/// cares about the amount.
#[derive(Event)]
pub struct DamageEvent {
    pub amount: f32,
}

/// Fired exactly once, on the tick the boss's health first reaches zero.
#[derive(Event)]
pub struct EncounterComplete {
    pub boss_position: Vec2,
}

/// Drain this tick's damage events into the boss.
///
/// A dying boss ignores damage entirely. When health crosses zero the whole
/// teardown happens here, in one pass: pattern cancelled, scheduler stopped,
/// velocity zeroed, motion ownership cleared, beam shut off, every in-flight
/// effect despawned, and the completion signal sent.
#[allow(clippy::too_many_arguments)]
pub fn apply_damage(
    config: Res<EncounterConfig>,
    mut rng: ResMut<GameRng>,
    mut commands: Commands,
    mut events: EventReader<DamageEvent>,
    mut bosses: Query<(
        Entity,
        &mut BossEncounter,
        &mut Scheduler,
        &Transform,
        &mut Velocity,
    )>,
    live_effects: Query<Entity, With<EncounterEffect>>,
    mut effects: EventWriter<EffectRequest>,
    mut complete: EventWriter<EncounterComplete>,
    mut beam: ResMut<BeamEmitter>,
    mut shake: ResMut<CameraShake>,
    mut log: ResMut<EncounterLog>,
) {
    for event in events.read() {
        for (entity, mut boss, mut scheduler, transform, mut velocity) in bosses.iter_mut() {
            if boss.dying {
                continue;
            }

            boss.health -= event.amount;
            log.log(
                EncounterLogEventType::BossDamaged,
                format!(
                    "Boss took {:.0} damage ({:.0}/{:.0})",
                    event.amount, boss.health, boss.max_health
                ),
            );

            let boss_pos = position_of(transform);

            if boss.health > 0.0 {
                // Hit feedback only while alive; the killing blow must leave
                // nothing behind for the teardown below to miss.
                commands.entity(entity).insert(HitFlash {
                    remaining: config.hit_flash_time,
                });
                let offset = Vec2::new(
                    rng.random_range(-config.hit_effect_offset, config.hit_effect_offset),
                    rng.random_range(-config.hit_effect_offset, config.hit_effect_offset),
                );
                effects.send(EffectRequest {
                    kind: EffectKind::HitBurst,
                    position: boss_pos + offset,
                    scale: 1.0,
                    lifetime: HIT_BURST_LIFETIME,
                    phase: boss.phase,
                });
                continue;
            }

            // Death teardown. The dying flag is the reentrancy guard: any
            // further events in this batch (or later ticks) are ignored.
            boss.dying = true;
            boss.is_rushing = false;
            boss.is_descending = false;
            boss.motion_owner = MotionOwner::None;
            velocity.0 = Vec2::ZERO;
            scheduler.state = SchedulerState::Stopped;
            beam.active = false;
            shake.intensity = 0.0;
            shake.remaining = 0.0;

            commands.entity(entity).remove::<ActivePattern>();
            for effect_entity in live_effects.iter() {
                commands.entity(effect_entity).despawn();
            }

            commands.entity(entity).insert(DyingState {
                bursts_left: config.death_burst_count,
                next_burst_in: 0.0,
                despawn_in: config.death_despawn_delay,
            });

            log.log(
                EncounterLogEventType::Death,
                format!("Boss died at ({:.1}, {:.1})", boss_pos.x, boss_pos.y),
            );
            complete.send(EncounterComplete {
                boss_position: boss_pos,
            });
        }
    }
}

/// Run the death cosmetic sequence: spaced explosion bursts around the boss,
/// then entity removal once the despawn delay expires.
pub fn update_dying(
    time: Res<Time>,
    config: Res<EncounterConfig>,
    mut rng: ResMut<GameRng>,
    mut commands: Commands,
    mut bosses: Query<(Entity, &mut DyingState, &Transform, &BossEncounter)>,
    mut effects: EventWriter<EffectRequest>,
) {
    let dt = time.delta_secs();

    for (entity, mut dying, transform, boss) in bosses.iter_mut() {
        let boss_pos = position_of(transform);

        dying.next_burst_in -= dt;
        while dying.next_burst_in <= 0.0 && dying.bursts_left > 0 {
            let angle = rng.random_range(0.0, std::f32::consts::TAU);
            let radius = rng.random_range(0.0, config.death_burst_radius);
            let offset = Vec2::new(angle.cos(), angle.sin()) * radius;
            effects.send(EffectRequest {
                kind: EffectKind::DeathExplosion,
                position: boss_pos + offset,
                scale: 1.0,
                lifetime: DEATH_EXPLOSION_LIFETIME,
                phase: boss.phase,
            });
            dying.bursts_left -= 1;
            dying.next_burst_in += config.death_burst_interval;
        }

        dying.despawn_in -= dt;
        if dying.despawn_in <= 0.0 {
            commands.entity(entity).despawn();
        }
    }
}

/// Tick the hit flash and clear it when it expires.
pub fn update_hit_flash(
    time: Res<Time>,
    mut commands: Commands,
    mut flashes: Query<(Entity, &mut HitFlash)>,
) {
    let dt = time.delta_secs();
    for (entity, mut flash) in flashes.iter_mut() {
        flash.remaining -= dt;
        if flash.remaining <= 0.0 {
            commands.entity(entity).remove::<HitFlash>();
        }
    }
}
