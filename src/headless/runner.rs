//! Headless encounter execution
//!
//! Runs boss encounters without any graphical output, suitable for automated
//! testing and balance analysis. Scripted damage stands in for the player's
//! attacks; the boss behaves exactly as in an interactive run.

use bevy::app::ScheduleRunnerPlugin;
use bevy::prelude::*;
use std::path::Path;
use std::time::Duration;

use crate::encounter::config::{load_encounter_config_from, EncounterConfig, EncounterConfigPlugin};
use crate::encounter::{
    spawn_boss, spawn_player, BossEncounter, DamageEvent, EncounterComplete, EncounterPlugin,
    EncounterSystemPhase, GameRng,
};
use crate::log::{EncounterLog, EncounterLogEventType, EncounterMetadata};

use super::config::HeadlessEncounterConfig;

/// Result of a completed headless encounter, for programmatic consumers.
#[derive(Debug, Clone)]
pub struct EncounterResult {
    /// Whether the boss was defeated before the timeout
    pub boss_defeated: bool,
    /// Elapsed run time in seconds
    pub encounter_time: f32,
    /// Boss health when the run ended
    pub final_health: f32,
    /// Phase name the boss ended in
    pub final_phase: String,
    /// Patterns that ran to completion
    pub patterns_executed: u32,
    /// How many times pattern damage killed the player
    pub player_deaths: u32,
    /// Random seed used (if deterministic)
    pub random_seed: Option<u64>,
}

/// Resource tracking headless run state.
#[derive(Resource)]
pub struct HeadlessEncounterState {
    /// Maximum run duration before declaring a timeout
    pub max_duration: f32,
    /// Elapsed run time
    pub elapsed_time: f32,
    /// Custom output path for the encounter log
    pub output_path: Option<String>,
    /// Scripted damage schedule, sorted by time
    pub damage_script: Vec<super::config::ScriptedDamage>,
    /// Next unfired script entry
    pub next_damage: usize,
    /// Whether the run has ended
    pub run_complete: bool,
    /// Random seed for deterministic replay (if provided)
    pub random_seed: Option<u64>,
    /// Populated when the run ends
    pub result: Option<EncounterResult>,
}

/// Plugin for headless encounter execution.
pub struct HeadlessPlugin {
    pub config: HeadlessEncounterConfig,
}

impl Plugin for HeadlessPlugin {
    fn build(&self, app: &mut App) {
        // A scenario may pin its own tuning file; otherwise the shipped asset
        // applies, with built-in values as the last resort.
        match &self.config.encounter_config {
            Some(path) => {
                let encounter_config = load_encounter_config_from(Path::new(path))
                    .expect("Invalid encounter configuration");
                app.insert_resource(encounter_config);
            }
            None => {
                app.add_plugins(EncounterConfigPlugin);
            }
        }

        let mut damage_script = self.config.damage_script.clone();
        damage_script.sort_by(|a, b| a.at.total_cmp(&b.at));

        app.insert_resource(HeadlessEncounterState {
                max_duration: self.config.max_duration_secs,
                elapsed_time: 0.0,
                output_path: self.config.output_path.clone(),
                damage_script,
                next_damage: 0,
                run_complete: false,
                random_seed: self.config.random_seed,
                result: None,
            })
            .insert_resource(HeadlessSpawns {
                boss: Vec2::from(self.config.boss_position),
                player: Vec2::from(self.config.player_position),
            })
            .add_plugins(EncounterPlugin);

        app.add_systems(Startup, headless_setup)
            .add_systems(
                Update,
                (headless_drive_damage, headless_track_time, headless_check_end)
                    .chain()
                    .after(EncounterSystemPhase::Resolution),
            )
            .add_systems(PostUpdate, headless_exit_on_complete);
    }
}

/// Starting positions carried from the scenario into setup.
#[derive(Resource)]
struct HeadlessSpawns {
    boss: Vec2,
    player: Vec2,
}

fn headless_setup(
    mut commands: Commands,
    config: Res<EncounterConfig>,
    spawns: Res<HeadlessSpawns>,
    state: Res<HeadlessEncounterState>,
    mut log: ResMut<EncounterLog>,
) {
    log.clear();
    log.log(
        EncounterLogEventType::EncounterEvent,
        "Encounter started (headless mode)".to_string(),
    );

    let game_rng = match state.random_seed {
        Some(seed) => {
            info!("Using deterministic RNG with seed: {}", seed);
            GameRng::from_seed(seed)
        }
        None => {
            info!("Using non-deterministic RNG (no seed provided)");
            GameRng::from_entropy()
        }
    };
    commands.insert_resource(game_rng);

    spawn_boss(&mut commands, &config, spawns.boss);
    spawn_player(&mut commands, spawns.player);

    info!(
        "Headless encounter setup complete: boss at ({:.1}, {:.1}), player at ({:.1}, {:.1})",
        spawns.boss.x, spawns.boss.y, spawns.player.x, spawns.player.y
    );
}

/// Fire scripted damage whose time has come.
fn headless_drive_damage(
    mut state: ResMut<HeadlessEncounterState>,
    mut damage: EventWriter<DamageEvent>,
) {
    if state.run_complete {
        return;
    }
    while state.next_damage < state.damage_script.len()
        && state.damage_script[state.next_damage].at <= state.elapsed_time
    {
        damage.send(DamageEvent {
            amount: state.damage_script[state.next_damage].amount,
        });
        state.next_damage += 1;
    }
}

/// Track elapsed run time for scripted damage and timeout detection.
fn headless_track_time(time: Res<Time>, mut state: ResMut<HeadlessEncounterState>) {
    if !state.run_complete {
        state.elapsed_time += time.delta_secs();
    }
}

/// End the run on the completion signal or on timeout.
fn headless_check_end(
    mut complete_events: EventReader<EncounterComplete>,
    bosses: Query<&BossEncounter>,
    log: Res<EncounterLog>,
    mut state: ResMut<HeadlessEncounterState>,
) {
    if state.run_complete {
        return;
    }

    let boss_defeated = complete_events.read().next().is_some();
    let timed_out = state.elapsed_time >= state.max_duration;
    if !boss_defeated && !timed_out {
        return;
    }

    if boss_defeated {
        info!(
            "Encounter ended after {:.1}s: boss defeated",
            state.elapsed_time
        );
    } else {
        info!(
            "Encounter timed out after {:.1}s with the boss alive",
            state.elapsed_time
        );
    }

    let (final_health, final_phase) = bosses
        .get_single()
        .map(|boss| (boss.health, boss.phase.name().to_string()))
        .unwrap_or((0.0, "Normal".to_string()));

    let result = EncounterResult {
        boss_defeated,
        encounter_time: state.elapsed_time,
        final_health,
        final_phase: final_phase.clone(),
        patterns_executed: log
            .filter_by_type(EncounterLogEventType::PatternEnded)
            .len() as u32,
        player_deaths: log
            .filter_by_type(EncounterLogEventType::PlayerKilled)
            .len() as u32,
        random_seed: state.random_seed,
    };

    let metadata = EncounterMetadata {
        boss_defeated: result.boss_defeated,
        final_health: result.final_health,
        final_phase: result.final_phase.clone(),
        duration: result.encounter_time,
        patterns_executed: result.patterns_executed,
        player_deaths: result.player_deaths,
        random_seed: result.random_seed,
    };
    match log.save_to_file(&metadata, state.output_path.as_deref()) {
        Ok(filename) => {
            println!("Encounter complete. Log saved to: {}", filename);
        }
        Err(e) => {
            eprintln!("Failed to save encounter log: {}", e);
        }
    }

    state.result = Some(result);
    state.run_complete = true;
}

/// Exit the app when the run is complete.
fn headless_exit_on_complete(
    state: Res<HeadlessEncounterState>,
    mut exit: EventWriter<AppExit>,
) {
    if state.run_complete {
        exit.send(AppExit::Success);
    }
}

/// Run a headless encounter with the given scenario.
pub fn run_headless_encounter(config: HeadlessEncounterConfig) -> Result<(), String> {
    config.validate()?;

    println!("Starting headless encounter simulation...");
    println!("  Scripted hits: {}", config.damage_script.len());
    println!("  Max duration: {:.0}s", config.max_duration_secs);

    App::new()
        // Minimal plugins - no window, no rendering
        .add_plugins(
            MinimalPlugins.set(ScheduleRunnerPlugin::run_loop(Duration::from_secs_f64(
                1.0 / 60.0,
            ))),
        )
        // Transform and hierarchy plugins needed for entity positions
        .add_plugins(TransformPlugin)
        .add_plugins(HeadlessPlugin { config })
        .run();

    Ok(())
}
