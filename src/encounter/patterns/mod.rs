//! Pattern Executors
//!
//! Each attack pattern is an explicit state machine stored on the boss as part
//! of [`ActivePattern`] and advanced one tick at a time by [`drive_patterns`].
//! A pattern owns the boss exclusively while active: the scheduler sits in
//! `Running` and the follow AI is locked out through the motion owner token.
//!
//! Combo is not a machine of its own. It is a queue of ordinary patterns that
//! run back to back under a single `ActivePattern`, so the scheduler sees one
//! pattern from dispatch to completion.

pub mod laser;
pub mod rush;
pub mod slam;
pub mod wave;

use bevy::prelude::*;
use smallvec::SmallVec;

use crate::log::{EncounterLog, EncounterLogEventType};

use super::components::{
    BossEncounter, Phase, Player, PlayerKilled, Scheduler, SchedulerState, Velocity,
};
use super::config::EncounterConfig;
use super::effects::{BeamEmitter, CameraShakeRequest, EffectRequest};
use super::spatial::position_of;

use laser::LaserState;
use rush::RushState;
use slam::SlamState;
use wave::WaveState;

/// The attack patterns the scheduler can dispatch.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PatternKind {
    Slam,
    EnergyWave,
    Rush,
    Laser,
    Combo,
}

impl PatternKind {
    /// Map a selected pattern id to a kind. Ids 0..3 are shared between
    /// phases; 3 and 4 only exist in rage.
    pub fn from_id(phase: Phase, id: usize) -> PatternKind {
        match (phase, id) {
            (_, 0) => PatternKind::Slam,
            (_, 1) => PatternKind::EnergyWave,
            (_, 2) => PatternKind::Rush,
            (Phase::Rage, 3) => PatternKind::Laser,
            (Phase::Rage, 4) => PatternKind::Combo,
            _ => PatternKind::Slam,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            PatternKind::Slam => "Slam",
            PatternKind::EnergyWave => "EnergyWave",
            PatternKind::Rush => "Rush",
            PatternKind::Laser => "Laser",
            PatternKind::Combo => "ComboAttack",
        }
    }
}

/// Per-pattern execution state.
pub enum PatternState {
    Slam(SlamState),
    Wave(WaveState),
    Rush(RushState),
    Laser(LaserState),
}

impl PatternState {
    /// Fresh state for a concrete (non-combo) pattern.
    fn for_kind(kind: PatternKind, config: &EncounterConfig, phase: Phase) -> PatternState {
        match kind {
            PatternKind::Slam => PatternState::Slam(SlamState::new(config.slam(phase))),
            PatternKind::EnergyWave => PatternState::Wave(WaveState::new()),
            PatternKind::Rush => PatternState::Rush(RushState::new(config.rush(phase))),
            // Combo never executes directly; its steps are queued instead
            PatternKind::Laser | PatternKind::Combo => {
                PatternState::Laser(LaserState::new(config.laser(phase)))
            }
        }
    }

    /// Name of the sub-pattern currently executing.
    pub fn step_name(&self) -> &'static str {
        match self {
            PatternState::Slam(_) => "Slam",
            PatternState::Wave(_) => "EnergyWave",
            PatternState::Rush(_) => "Rush",
            PatternState::Laser(_) => "Laser",
        }
    }
}

/// The pattern currently owning the boss. Present on the boss entity only
/// while a pattern runs; removal hands the boss back to the scheduler.
#[derive(Component)]
pub struct ActivePattern {
    /// What the scheduler dispatched (Combo keeps this name throughout)
    pub kind: PatternKind,
    /// The sub-pattern state machine currently ticking
    pub state: PatternState,
    /// Remaining combo steps, executed front to back
    pub queue: SmallVec<[PatternKind; 2]>,
}

impl ActivePattern {
    /// Start executing `kind`. Combo expands into its fixed step sequence:
    /// Rush first, then Slam, then EnergyWave.
    pub fn start(kind: PatternKind, config: &EncounterConfig, phase: Phase) -> ActivePattern {
        match kind {
            PatternKind::Combo => ActivePattern {
                kind,
                state: PatternState::for_kind(PatternKind::Rush, config, phase),
                queue: SmallVec::from_slice(&[PatternKind::Slam, PatternKind::EnergyWave]),
            },
            _ => ActivePattern {
                kind,
                state: PatternState::for_kind(kind, config, phase),
                queue: SmallVec::new(),
            },
        }
    }
}

/// Advance the active pattern on each boss by one tick.
///
/// On completion the boss is handed back: motion returns to the follow AI,
/// the scheduler re-enters its idle wait, and `ActivePattern` is removed.
pub fn drive_patterns(
    time: Res<Time>,
    config: Res<EncounterConfig>,
    mut commands: Commands,
    mut bosses: Query<(
        Entity,
        &mut BossEncounter,
        &mut ActivePattern,
        &mut Scheduler,
        &Transform,
        &mut Velocity,
    )>,
    mut players: Query<(&Transform, &mut Player), Without<BossEncounter>>,
    mut effects: EventWriter<EffectRequest>,
    mut shakes: EventWriter<CameraShakeRequest>,
    mut killed: EventWriter<PlayerKilled>,
    mut beam: ResMut<BeamEmitter>,
    mut log: ResMut<EncounterLog>,
) {
    let dt = time.delta_secs();

    let Ok((player_transform, mut player)) = players.get_single_mut() else {
        return;
    };
    let player_pos = position_of(player_transform);

    for (entity, mut boss, mut pattern, mut scheduler, transform, mut velocity) in
        bosses.iter_mut()
    {
        if boss.dying {
            continue;
        }

        let phase = boss.phase;
        let boss_pos = position_of(transform);

        let finished = match &mut pattern.state {
            PatternState::Slam(state) => slam::step(
                state,
                dt,
                config.slam(phase),
                &config,
                phase,
                boss_pos,
                player_pos,
                &mut player,
                &mut effects,
                &mut shakes,
                &mut killed,
                &mut log,
            ),
            PatternState::Wave(state) => wave::step(
                state,
                dt,
                config.wave(phase),
                &config,
                phase,
                boss_pos,
                player_pos,
                &mut effects,
            ),
            PatternState::Rush(state) => rush::step(
                state,
                dt,
                config.rush(phase),
                &config,
                phase,
                boss_pos,
                player_pos,
                &mut boss,
                &mut velocity,
                &mut player,
                &mut effects,
                &mut shakes,
                &mut killed,
                &mut log,
            ),
            PatternState::Laser(state) => laser::step(state, dt, &mut beam, &mut log),
        };

        if !finished {
            continue;
        }

        if let Some(&next) = pattern.queue.first() {
            pattern.queue.remove(0);
            log.log(
                EncounterLogEventType::EncounterEvent,
                format!("{} step: {}", pattern.kind.name(), next.name()),
            );
            pattern.state = PatternState::for_kind(next, &config, phase);
            continue;
        }

        log.log(
            EncounterLogEventType::PatternEnded,
            format!("Pattern {} completed", pattern.kind.name()),
        );
        velocity.0 = Vec2::ZERO;
        boss.motion_owner = super::components::MotionOwner::FollowAi;
        scheduler.state = SchedulerState::Idle {
            remaining: config.idle_delay,
        };
        commands.entity(entity).remove::<ActivePattern>();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rage_id_mapping_covers_all_five_patterns() {
        assert_eq!(PatternKind::from_id(Phase::Rage, 0), PatternKind::Slam);
        assert_eq!(PatternKind::from_id(Phase::Rage, 1), PatternKind::EnergyWave);
        assert_eq!(PatternKind::from_id(Phase::Rage, 2), PatternKind::Rush);
        assert_eq!(PatternKind::from_id(Phase::Rage, 3), PatternKind::Laser);
        assert_eq!(PatternKind::from_id(Phase::Rage, 4), PatternKind::Combo);
    }

    #[test]
    fn combo_queues_slam_then_wave_after_rush() {
        let config = EncounterConfig::default();
        let pattern = ActivePattern::start(PatternKind::Combo, &config, Phase::Rage);
        assert!(matches!(pattern.state, PatternState::Rush(_)));
        assert_eq!(
            pattern.queue.as_slice(),
            &[PatternKind::Slam, PatternKind::EnergyWave]
        );
    }

    #[test]
    fn laser_id_is_rage_only() {
        assert_eq!(PatternKind::from_id(Phase::Normal, 2), PatternKind::Rush);
        // Normal phase never produces ids above 2; the fallback is harmless
        assert_eq!(PatternKind::from_id(Phase::Normal, 3), PatternKind::Slam);
    }
}
