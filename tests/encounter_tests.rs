//! Integration tests for the encounter core
//!
//! These tests drive a full Bevy app tick by tick with a manually advanced
//! clock, so every run is deterministic:
//! - The scheduler waits out its idle delay before the first pattern
//! - Rage triggers exactly once, at half health, at an idle boundary
//! - Death tears everything down atomically and signals exactly once
//! - A dying boss ignores further damage
//! - Motion ownership is exclusive between the follow AI and patterns

use bevy::ecs::event::Events;
use bevy::prelude::*;
use std::time::Duration;

use bossim::encounter::effects::{EffectKind, EncounterEffect};
use bossim::encounter::{
    ActivePattern, BossEncounter, DamageEvent, EncounterComplete, EncounterConfig,
    EncounterPlugin, GameRng, MotionOwner, Player, Scheduler, SchedulerState, Velocity,
};
use bossim::log::{EncounterLog, EncounterLogEventType};

const FRAME: f32 = 1.0 / 60.0;

/// Build a deterministic test app with a boss and a player spawned.
fn encounter_app(seed: u64, boss_pos: Vec2, player_pos: Vec2) -> App {
    let mut app = App::new();
    let config = EncounterConfig::default();

    app.insert_resource(GameRng::from_seed(seed));
    app.insert_resource(config.clone());
    app.add_plugins(EncounterPlugin);
    app.init_resource::<Time>();

    app.world_mut().spawn((
        BossEncounter::new(config.max_health),
        Scheduler::new(config.idle_delay),
        Velocity::default(),
        Transform::from_translation(boss_pos.extend(0.0)),
    ));
    app.world_mut().spawn((
        Player::default(),
        Velocity::default(),
        Transform::from_translation(player_pos.extend(0.0)),
    ));

    app
}

/// Advance the app in fixed frames until `seconds` have elapsed.
fn advance(app: &mut App, seconds: f32) {
    let frames = (seconds / FRAME).ceil() as u32;
    for _ in 0..frames {
        app.world_mut()
            .resource_mut::<Time>()
            .advance_by(Duration::from_secs_f32(FRAME));
        app.update();
    }
}

fn boss(app: &mut App) -> &BossEncounter {
    let world = app.world_mut();
    let mut query = world.query::<&BossEncounter>();
    query.single(world)
}

fn has_active_pattern(app: &mut App) -> bool {
    let world = app.world_mut();
    let mut query = world.query_filtered::<Entity, With<ActivePattern>>();
    query.iter(world).next().is_some()
}

fn effect_count(app: &mut App) -> usize {
    let world = app.world_mut();
    let mut query = world.query_filtered::<Entity, With<EncounterEffect>>();
    query.iter(world).count()
}

fn effect_kind_count(app: &mut App, kind: EffectKind) -> usize {
    let world = app.world_mut();
    let mut query = world.query::<&EncounterEffect>();
    query.iter(world).filter(|e| e.kind == kind).count()
}

fn log_count(app: &App, event_type: EncounterLogEventType) -> usize {
    app.world()
        .resource::<EncounterLog>()
        .filter_by_type(event_type)
        .len()
}

#[test]
fn scheduler_waits_idle_delay_before_first_pattern() {
    let mut app = encounter_app(1, Vec2::new(0.0, -3.0), Vec2::new(8.0, -3.0));

    advance(&mut app, 2.8);
    assert!(!has_active_pattern(&mut app));
    assert_eq!(log_count(&app, EncounterLogEventType::PatternStarted), 0);

    advance(&mut app, 0.4);
    assert!(has_active_pattern(&mut app));
    assert_eq!(log_count(&app, EncounterLogEventType::PatternStarted), 1);
    assert_eq!(boss(&mut app).motion_owner, MotionOwner::Pattern);
}

#[test]
fn follow_ai_chases_horizontally_during_idle() {
    let mut app = encounter_app(2, Vec2::new(0.0, -3.0), Vec2::new(12.0, -3.0));

    advance(&mut app, 1.0);

    let world = app.world_mut();
    let mut query = world.query::<(&BossEncounter, &Transform)>();
    let (boss, transform) = query.single(world);
    assert_eq!(boss.motion_owner, MotionOwner::FollowAi);
    // ~10 units/s toward the player, still short of it
    assert!(transform.translation.x > 5.0);
    assert!(transform.translation.x < 12.0);
    // The chase never moves the boss vertically
    assert!((transform.translation.y - (-3.0)).abs() < 1e-3);
}

#[test]
fn follow_ai_stops_within_stop_distance() {
    let mut app = encounter_app(3, Vec2::new(0.0, -3.0), Vec2::new(0.3, -3.0));

    advance(&mut app, 1.0);

    let world = app.world_mut();
    let mut query = world.query_filtered::<(&Transform, &Velocity), With<BossEncounter>>();
    let (transform, velocity) = query.single(world);
    assert!(transform.translation.x.abs() < 0.5);
    assert_eq!(velocity.0, Vec2::ZERO);
}

#[test]
fn rage_triggers_once_at_half_health() {
    let mut app = encounter_app(4, Vec2::new(0.0, -3.0), Vec2::new(8.0, -3.0));

    app.world_mut().send_event(DamageEvent { amount: 600.0 });
    advance(&mut app, FRAME * 2.0);

    // Damage landed but rage waits for the next idle boundary
    assert_eq!(boss(&mut app).health, 400.0);
    assert_eq!(log_count(&app, EncounterLogEventType::RageEntered), 0);

    advance(&mut app, 3.1);
    assert_eq!(log_count(&app, EncounterLogEventType::RageEntered), 1);
    assert_eq!(boss(&mut app).phase.name(), "Rage");
    // Rage entry resets the repeat-avoidance memory; the Normal slot stays
    // clear because that phase never runs again
    assert!(boss(&mut app).last_pattern[0].is_none());

    // Never again, no matter how long the encounter runs
    advance(&mut app, 30.0);
    assert_eq!(log_count(&app, EncounterLogEventType::RageEntered), 1);
}

#[test]
fn rage_triggers_once_under_staggered_damage_ticks() {
    let mut app = encounter_app(12, Vec2::new(0.0, -3.0), Vec2::new(8.0, -3.0));

    // Five small hits straddle the half-health threshold mid-stream
    for _ in 0..5 {
        app.world_mut().send_event(DamageEvent { amount: 150.0 });
        advance(&mut app, 0.2);
    }
    assert_eq!(boss(&mut app).health, 250.0);
    assert_eq!(log_count(&app, EncounterLogEventType::RageEntered), 0);

    // The transition still waits for the idle boundary and fires once
    advance(&mut app, 3.0);
    assert_eq!(log_count(&app, EncounterLogEventType::RageEntered), 1);
    assert_eq!(boss(&mut app).phase.name(), "Rage");

    advance(&mut app, 20.0);
    assert_eq!(log_count(&app, EncounterLogEventType::RageEntered), 1);
}

#[test]
fn rage_entry_requests_aura_and_tint() {
    let mut app = encounter_app(13, Vec2::new(0.0, -3.0), Vec2::new(8.0, -3.0));

    app.world_mut().send_event(DamageEvent { amount: 600.0 });
    advance(&mut app, 3.5);

    assert_eq!(log_count(&app, EncounterLogEventType::RageEntered), 1);
    assert_eq!(effect_kind_count(&mut app, EffectKind::RageAura), 1);
    assert_eq!(effect_kind_count(&mut app, EffectKind::RageTint), 1);
}

#[test]
fn damage_above_half_health_keeps_normal_phase() {
    let mut app = encounter_app(5, Vec2::new(0.0, -3.0), Vec2::new(8.0, -3.0));

    app.world_mut().send_event(DamageEvent { amount: 400.0 });
    advance(&mut app, 4.0);

    assert_eq!(boss(&mut app).phase.name(), "Normal");
    assert_eq!(log_count(&app, EncounterLogEventType::RageEntered), 0);
}

#[test]
fn death_is_atomic_and_signals_exactly_once() {
    let mut app = encounter_app(6, Vec2::new(0.0, -3.0), Vec2::new(8.0, -3.0));

    // Let a pattern start so death has something to cancel
    advance(&mut app, 4.0);
    assert!(has_active_pattern(&mut app));
    assert!(effect_count(&mut app) > 0);

    // Two lethal hits in the same frame: the dying flag makes the second a no-op
    app.world_mut().send_event(DamageEvent { amount: 700.0 });
    app.world_mut().send_event(DamageEvent { amount: 700.0 });
    advance(&mut app, FRAME);

    assert_eq!(log_count(&app, EncounterLogEventType::Death), 1);
    assert_eq!(
        app.world().resource::<Events<EncounterComplete>>().len(),
        1
    );

    let world = app.world_mut();
    let mut query = world.query::<(&BossEncounter, &Scheduler, &Velocity)>();
    let (boss, scheduler, velocity) = query.single(world);
    assert!(boss.dying);
    assert_eq!(boss.motion_owner, MotionOwner::None);
    assert!(!boss.is_rushing);
    assert!(!boss.is_descending);
    assert_eq!(scheduler.state, SchedulerState::Stopped);
    assert_eq!(velocity.0, Vec2::ZERO);

    assert!(!has_active_pattern(&mut app));
    // Every in-flight effect was despawned with the pattern
    assert_eq!(effect_count(&mut app), 0);
}

#[test]
fn killing_blow_spawns_no_hit_feedback() {
    let mut app = encounter_app(14, Vec2::new(0.0, -3.0), Vec2::new(8.0, -3.0));

    // A survivable hit produces a burst entity on the following frame
    app.world_mut().send_event(DamageEvent { amount: 100.0 });
    advance(&mut app, FRAME * 2.0);
    assert!(effect_kind_count(&mut app, EffectKind::HitBurst) > 0);

    advance(&mut app, 0.5);
    assert_eq!(effect_kind_count(&mut app, EffectKind::HitBurst), 0);

    // The killing blow goes straight to teardown; no burst may appear after
    // the cancel-all, not even one requested on the death frame
    app.world_mut().send_event(DamageEvent { amount: 1500.0 });
    advance(&mut app, FRAME * 2.0);
    assert!(boss(&mut app).dying);
    assert_eq!(effect_kind_count(&mut app, EffectKind::HitBurst), 0);
}

#[test]
fn dying_boss_ignores_further_damage() {
    let mut app = encounter_app(7, Vec2::new(0.0, -3.0), Vec2::new(8.0, -3.0));

    app.world_mut().send_event(DamageEvent { amount: 1200.0 });
    advance(&mut app, FRAME * 1.5);
    let health_at_death = boss(&mut app).health;
    assert!(health_at_death <= 0.0);

    app.world_mut().send_event(DamageEvent { amount: 500.0 });
    advance(&mut app, 0.5);

    assert_eq!(boss(&mut app).health, health_at_death);
    assert_eq!(log_count(&app, EncounterLogEventType::Death), 1);
}

#[test]
fn dead_boss_despawns_after_death_sequence() {
    let mut app = encounter_app(8, Vec2::new(0.0, -3.0), Vec2::new(8.0, -3.0));

    app.world_mut().send_event(DamageEvent { amount: 1500.0 });
    advance(&mut app, 1.5);

    // Death explosion bursts are being requested on a timer
    assert!(log_count(&app, EncounterLogEventType::Effect) > 0);
    {
        let world = app.world_mut();
        let mut query = world.query::<&BossEncounter>();
        assert_eq!(query.iter(world).count(), 1);
    }

    advance(&mut app, 2.0);
    let world = app.world_mut();
    let mut query = world.query::<&BossEncounter>();
    assert_eq!(query.iter(world).count(), 0);
}

#[test]
fn scheduler_resumes_after_pattern_completes() {
    let mut app = encounter_app(9, Vec2::new(0.0, -3.0), Vec2::new(2.0, -3.0));

    advance(&mut app, 3.2);
    assert!(has_active_pattern(&mut app));

    // Long enough for any normal-phase pattern to finish (rush worst case:
    // 4 iterations of warning + dash + cooldown)
    let mut ended = false;
    for _ in 0..(30.0 / 0.5) as u32 {
        advance(&mut app, 0.5);
        if log_count(&app, EncounterLogEventType::PatternEnded) > 0 {
            ended = true;
            break;
        }
    }
    assert!(ended, "first pattern never completed");

    // Control returns to the follow AI, then a second pattern starts
    advance(&mut app, 3.5);
    assert!(log_count(&app, EncounterLogEventType::PatternStarted) >= 2);
}

#[test]
fn pattern_selection_never_immediately_repeats() {
    let mut app = encounter_app(10, Vec2::new(0.0, -3.0), Vec2::new(2.0, -3.0));

    // Run long enough for several pattern cycles
    advance(&mut app, 90.0);

    let log = app.world().resource::<EncounterLog>();
    let started: Vec<String> = log
        .filter_by_type(EncounterLogEventType::PatternStarted)
        .iter()
        .map(|e| e.message.clone())
        .collect();
    assert!(started.len() >= 2, "expected multiple patterns in 90s");
    for pair in started.windows(2) {
        assert_ne!(pair[0], pair[1], "pattern repeated back to back");
    }
}

#[test]
fn seeded_runs_pick_identical_patterns() {
    let mut first = encounter_app(77, Vec2::new(0.0, -3.0), Vec2::new(2.0, -3.0));
    let mut second = encounter_app(77, Vec2::new(0.0, -3.0), Vec2::new(2.0, -3.0));

    advance(&mut first, 45.0);
    advance(&mut second, 45.0);

    let messages = |app: &App| -> Vec<String> {
        app.world()
            .resource::<EncounterLog>()
            .filter_by_type(EncounterLogEventType::PatternStarted)
            .iter()
            .map(|e| e.message.clone())
            .collect()
    };
    assert_eq!(messages(&first), messages(&second));
}
