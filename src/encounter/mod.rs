//! Boss Encounter Core
//!
//! Everything that drives one boss encounter: the scheduler loop, the pattern
//! executors, the follow AI, damage intake and the death lifecycle. The
//! module is presentation-free; visuals leave as [`effects::EffectRequest`]
//! events and player death leaves as [`components::PlayerKilled`].

pub mod components;
pub mod config;
pub mod constants;
pub mod damage;
pub mod effects;
pub mod follow;
pub mod patterns;
pub mod scheduler;
pub mod selector;
pub mod spatial;

use bevy::prelude::*;

use crate::log::EncounterLog;

pub use components::{
    BossEncounter, GameRng, MotionOwner, Phase, Player, PlayerKilled, Scheduler, SchedulerState,
    Velocity,
};
pub use config::{EncounterConfig, EncounterConfigPlugin};
pub use damage::{DamageEvent, EncounterComplete};
pub use effects::{BeamEmitter, CameraShake, CameraShakeRequest, EffectKind, EffectRequest};
pub use patterns::{ActivePattern, PatternKind};

/// Execution phases for the encounter systems, run in order each tick.
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub enum EncounterSystemPhase {
    /// Clock, effect lifetimes, camera shake, hit flash
    Feedback,
    /// Scheduler, pattern executors, follow AI, motion integration
    Behavior,
    /// Effect materialization, damage intake, death sequence
    Resolution,
}

/// Plugin wiring the full encounter core into an app.
///
/// Resources already present (a seeded [`GameRng`], a file-loaded
/// [`EncounterConfig`]) are kept; only missing ones get defaults.
pub struct EncounterPlugin;

impl Plugin for EncounterPlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<DamageEvent>()
            .add_event::<EncounterComplete>()
            .add_event::<EffectRequest>()
            .add_event::<CameraShakeRequest>()
            .add_event::<PlayerKilled>()
            .init_resource::<EncounterLog>()
            .init_resource::<CameraShake>()
            .init_resource::<BeamEmitter>()
            .init_resource::<GameRng>()
            .init_resource::<EncounterConfig>();

        app.configure_sets(
            Update,
            (
                EncounterSystemPhase::Feedback,
                EncounterSystemPhase::Behavior,
                EncounterSystemPhase::Resolution,
            )
                .chain(),
        );

        app.add_systems(
            Update,
            (
                crate::log::tick_encounter_time,
                effects::tick_effects,
                effects::update_camera_shake,
                damage::update_hit_flash,
            )
                .in_set(EncounterSystemPhase::Feedback),
        );
        app.add_systems(
            Update,
            (
                scheduler::run_scheduler,
                patterns::drive_patterns,
                follow::follow_player,
                follow::apply_velocity,
            )
                .chain()
                .in_set(EncounterSystemPhase::Behavior),
        );
        app.add_systems(
            Update,
            (
                effects::materialize_effect_requests,
                damage::apply_damage,
                damage::update_dying,
            )
                .chain()
                .in_set(EncounterSystemPhase::Resolution),
        );
    }
}

/// Spawn a boss entity ready for scheduling.
pub fn spawn_boss(commands: &mut Commands, config: &EncounterConfig, position: Vec2) -> Entity {
    commands
        .spawn((
            BossEncounter::new(config.max_health),
            Scheduler::new(config.idle_delay),
            Velocity::default(),
            Transform::from_translation(position.extend(0.0)),
        ))
        .id()
}

/// Spawn the player collaborator entity.
pub fn spawn_player(commands: &mut Commands, position: Vec2) -> Entity {
    commands
        .spawn((
            Player::default(),
            Velocity::default(),
            Transform::from_translation(position.extend(0.0)),
        ))
        .id()
}
