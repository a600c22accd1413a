//! Encounter Scheduler
//!
//! The top-level behavior loop on each boss: wait out the idle delay, run the
//! one-time rage check, pick the next pattern, dispatch it, then go quiet
//! until the pattern hands control back. Death moves the scheduler to
//! `Stopped` and nothing here runs again.

use bevy::prelude::*;

use crate::log::{EncounterLog, EncounterLogEventType};

use super::components::{
    BossEncounter, GameRng, MotionOwner, Phase, Scheduler, SchedulerState, Velocity,
};
use super::config::EncounterConfig;
use super::constants::RAGE_ENTER_SHAKE_INTENSITY;
use super::effects::{CameraShakeRequest, EffectKind, EffectRequest};
use super::patterns::{ActivePattern, PatternKind};
use super::selector::select_pattern;
use super::spatial::position_of;

/// Tick idle and settle timers and dispatch the next pattern when they fire.
///
/// Bosses with an [`ActivePattern`] are skipped entirely; their scheduler
/// sits in `Running` until the pattern driver hands control back.
pub fn run_scheduler(
    time: Res<Time>,
    config: Res<EncounterConfig>,
    mut rng: ResMut<GameRng>,
    mut commands: Commands,
    mut bosses: Query<
        (
            Entity,
            &mut BossEncounter,
            &mut Scheduler,
            &Transform,
            &mut Velocity,
        ),
        Without<ActivePattern>,
    >,
    mut effects: EventWriter<EffectRequest>,
    mut shakes: EventWriter<CameraShakeRequest>,
    mut log: ResMut<EncounterLog>,
) {
    let dt = time.delta_secs();

    for (entity, mut boss, mut scheduler, transform, mut velocity) in bosses.iter_mut() {
        if boss.dying {
            continue;
        }

        match scheduler.state {
            SchedulerState::Stopped | SchedulerState::Running => continue,
            SchedulerState::Idle { remaining } => {
                let remaining = remaining - dt;
                if remaining > 0.0 {
                    scheduler.state = SchedulerState::Idle { remaining };
                    continue;
                }

                // Rage check runs exactly here, between idle and selection
                if boss.should_enrage() {
                    boss.phase = Phase::Rage;
                    boss.last_pattern = [None, None];
                    effects.send(EffectRequest {
                        kind: EffectKind::RageAura,
                        position: position_of(transform),
                        scale: 1.0,
                        // The aura outlives every pattern; death cancels it
                        lifetime: f32::INFINITY,
                        phase: Phase::Rage,
                    });
                    effects.send(EffectRequest {
                        kind: EffectKind::RageTint,
                        position: position_of(transform),
                        scale: 1.0,
                        // Persists alongside the aura until death cancels it
                        lifetime: f32::INFINITY,
                        phase: Phase::Rage,
                    });
                    shakes.send(CameraShakeRequest {
                        intensity: RAGE_ENTER_SHAKE_INTENSITY,
                        duration: config.shake_duration,
                    });
                    log.log(
                        EncounterLogEventType::RageEntered,
                        format!("Rage mode entered at {:.0} health", boss.health),
                    );
                    scheduler.state = SchedulerState::RageSettle {
                        remaining: config.rage_settle_time,
                    };
                    continue;
                }

                dispatch(
                    entity,
                    &mut boss,
                    &mut scheduler,
                    &mut velocity,
                    &config,
                    &mut rng,
                    &mut commands,
                    &mut log,
                );
            }
            SchedulerState::RageSettle { remaining } => {
                let remaining = remaining - dt;
                if remaining > 0.0 {
                    scheduler.state = SchedulerState::RageSettle { remaining };
                    continue;
                }

                dispatch(
                    entity,
                    &mut boss,
                    &mut scheduler,
                    &mut velocity,
                    &config,
                    &mut rng,
                    &mut commands,
                    &mut log,
                );
            }
        }
    }
}

/// Select the next pattern for the boss's current phase and start it.
#[allow(clippy::too_many_arguments)]
fn dispatch(
    entity: Entity,
    boss: &mut BossEncounter,
    scheduler: &mut Scheduler,
    velocity: &mut Velocity,
    config: &EncounterConfig,
    rng: &mut GameRng,
    commands: &mut Commands,
    log: &mut EncounterLog,
) {
    let phase = boss.phase;
    let count = EncounterConfig::pattern_count(phase);
    let last = boss.last_pattern[phase.index()];
    let id = select_pattern(rng, count, last);
    boss.last_pattern[phase.index()] = Some(id);

    let kind = PatternKind::from_id(phase, id);
    log.log(
        EncounterLogEventType::PatternStarted,
        format!("Pattern {} started ({})", kind.name(), phase.name()),
    );

    velocity.0 = Vec2::ZERO;
    boss.motion_owner = MotionOwner::Pattern;
    scheduler.state = SchedulerState::Running;
    commands
        .entity(entity)
        .insert(ActivePattern::start(kind, config, phase));
}
