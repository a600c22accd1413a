//! Data-Driven Encounter Configuration
//!
//! All boss tuning values are loaded from `assets/config/encounter.ron` instead
//! of being hardcoded in pattern code. Ground level and other level-specific
//! values live here too.
//!
//! ## Benefits
//! - Balance changes don't require recompilation
//! - Rage-tier escalation rules are validated at startup
//!
//! ## Usage
//! ```ignore
//! fn my_system(config: Res<EncounterConfig>) {
//!     let slam = config.slam(Phase::Rage);
//!     println!("Rage slam radius: {}", slam.radius);
//! }
//! ```

use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use std::path::Path;

use super::components::Phase;

/// Tuning for one tier of the Slam pattern.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SlamTuning {
    /// Number of slam repetitions
    pub count: u32,
    /// Seconds per repetition (half windup, half recover)
    pub interval: f32,
    /// Damage radius around the boss
    pub radius: f32,
    /// Camera shake intensity multiplier for this tier
    pub shake_multiplier: f32,
}

/// Tuning for one tier of the EnergyWave pattern.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct WaveTuning {
    /// Number of wave projectiles per direction
    pub count: u32,
    /// Seconds between consecutive spawns
    pub interval: f32,
    /// Horizontal spacing between consecutive spawn points
    pub spacing: f32,
    /// Whether waves fire in both directions simultaneously
    pub mirrored: bool,
    /// Pause after the last wave before the pattern ends
    pub settle: f32,
}

/// Tuning for one tier of the Rush pattern.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RushTuning {
    /// Number of dash iterations
    pub times: u32,
    /// Dash speed in units per second
    pub speed: f32,
    /// Dash duration in seconds
    pub duration: f32,
    /// Pause between dash iterations
    pub cooldown: f32,
    /// Extra distance past the player when picking the dash target
    pub overshoot: f32,
    /// Warning indicator display time before the dash
    pub warning_time: f32,
    /// Forced-fall speed for the post-dash descent stage
    pub descent_speed: f32,
}

/// Tuning for one tier of the Laser pattern.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct LaserTuning {
    /// Delay before the beam emitter is activated
    pub windup: f32,
    /// How long the beam stays active
    pub hold: f32,
}

/// Resource containing all encounter tuning values.
///
/// Loaded from `assets/config/encounter.ron` at startup by
/// [`EncounterConfigPlugin`]; `Default` carries the built-in values so unit
/// tests don't depend on the asset file.
#[derive(Resource, Clone, Debug, Serialize, Deserialize)]
pub struct EncounterConfig {
    // === Boss stats ===
    pub max_health: f32,

    // === Follow AI ===
    pub follow_speed: f32,
    pub follow_stop_distance: f32,

    // === Scheduler ===
    /// Idle wait between pattern selections
    pub idle_delay: f32,
    /// Extra settle time after entering rage mode
    pub rage_settle_time: f32,

    // === Level geometry (injected, level-specific) ===
    /// Y coordinate of the ground the boss descends to
    pub ground_level: f32,
    /// Boss counts as airborne above ground_level + this
    pub airborne_epsilon: f32,
    /// Descent ends when boss Y is within this of ground_level
    pub landing_epsilon: f32,
    /// Hold time after touching down before the descent stage clears
    pub landed_hold: f32,

    // === EnergyWave shared ===
    /// Waves spawn this far below the boss position
    pub wave_ground_offset: f32,
    /// Lifetime of each spawned wave projectile
    pub wave_lifetime: f32,

    // === Rush shared ===
    /// Player dies within this distance of the boss during a dash
    pub rush_damage_radius: f32,
    /// Horizontal velocity multiplier applied each descent tick
    pub rush_horizontal_damping: f32,

    // === Feedback ===
    pub shake_intensity: f32,
    pub shake_duration: f32,
    /// Duration of the red hit flash on the boss sprite
    pub hit_flash_time: f32,
    /// Max random offset of the hit-burst effect from the boss position
    pub hit_effect_offset: f32,

    // === Death ===
    pub death_burst_count: u32,
    pub death_burst_interval: f32,
    pub death_burst_radius: f32,
    /// Delay before the boss entity is removed, so death effects can finish
    pub death_despawn_delay: f32,

    // === Per-pattern tiers ===
    pub slam: SlamTuning,
    pub rage_slam: SlamTuning,
    pub wave: WaveTuning,
    pub rage_wave: WaveTuning,
    pub rush: RushTuning,
    pub rage_rush: RushTuning,
    pub laser: LaserTuning,
    pub rage_laser: LaserTuning,
}

impl Default for EncounterConfig {
    fn default() -> Self {
        Self {
            max_health: 1000.0,
            follow_speed: 10.0,
            follow_stop_distance: 0.5,
            idle_delay: 3.0,
            rage_settle_time: 1.5,
            ground_level: -3.0,
            airborne_epsilon: 0.5,
            landing_epsilon: 0.1,
            landed_hold: 0.2,
            wave_ground_offset: 1.5,
            wave_lifetime: 1.0,
            rush_damage_radius: 4.0,
            rush_horizontal_damping: 0.8,
            shake_intensity: 20.0,
            shake_duration: 1.5,
            hit_flash_time: 0.1,
            hit_effect_offset: 0.5,
            death_burst_count: 10,
            death_burst_interval: 0.1,
            death_burst_radius: 3.0,
            death_despawn_delay: 3.0,
            slam: SlamTuning {
                count: 3,
                interval: 0.8,
                radius: 4.0,
                shake_multiplier: 1.0,
            },
            rage_slam: SlamTuning {
                count: 5,
                interval: 0.5,
                radius: 6.0,
                shake_multiplier: 1.5,
            },
            wave: WaveTuning {
                count: 10,
                interval: 0.3,
                spacing: 1.5,
                mirrored: false,
                settle: 0.5,
            },
            rage_wave: WaveTuning {
                count: 15,
                interval: 0.15,
                spacing: 2.0,
                mirrored: true,
                settle: 0.3,
            },
            rush: RushTuning {
                times: 4,
                speed: 25.0,
                duration: 1.2,
                cooldown: 0.4,
                overshoot: 8.0,
                warning_time: 0.8,
                descent_speed: 20.0,
            },
            rage_rush: RushTuning {
                times: 6,
                speed: 35.0,
                duration: 1.0,
                cooldown: 0.3,
                overshoot: 12.0,
                warning_time: 0.5,
                descent_speed: 25.0,
            },
            laser: LaserTuning {
                windup: 0.8,
                hold: 3.0,
            },
            rage_laser: LaserTuning {
                windup: 0.8,
                hold: 4.0,
            },
        }
    }
}

impl EncounterConfig {
    /// Slam tuning for the given phase.
    pub fn slam(&self, phase: Phase) -> &SlamTuning {
        match phase {
            Phase::Normal => &self.slam,
            Phase::Rage => &self.rage_slam,
        }
    }

    /// EnergyWave tuning for the given phase.
    pub fn wave(&self, phase: Phase) -> &WaveTuning {
        match phase {
            Phase::Normal => &self.wave,
            Phase::Rage => &self.rage_wave,
        }
    }

    /// Rush tuning for the given phase.
    pub fn rush(&self, phase: Phase) -> &RushTuning {
        match phase {
            Phase::Normal => &self.rush,
            Phase::Rage => &self.rage_rush,
        }
    }

    /// Laser tuning for the given phase.
    pub fn laser(&self, phase: Phase) -> &LaserTuning {
        match phase {
            Phase::Normal => &self.laser,
            Phase::Rage => &self.rage_laser,
        }
    }

    /// Number of selectable patterns per phase (3 normal, 5 rage).
    pub fn pattern_count(phase: Phase) -> usize {
        match phase {
            Phase::Normal => 3,
            Phase::Rage => 5,
        }
    }

    /// Validate the configuration. Zero or negative stage durations would
    /// starve the scheduler, so they are rejected up front rather than
    /// handled at runtime.
    pub fn validate(&self) -> Result<(), String> {
        if self.max_health <= 0.0 {
            return Err("max_health must be positive".to_string());
        }
        if self.idle_delay <= 0.0 {
            return Err("idle_delay must be positive".to_string());
        }
        if self.rage_settle_time < 0.0 {
            return Err("rage_settle_time must not be negative".to_string());
        }
        if self.follow_speed <= 0.0 {
            return Err("follow_speed must be positive".to_string());
        }
        if self.rush_damage_radius <= 0.0 {
            return Err("rush_damage_radius must be positive".to_string());
        }
        if self.rush_horizontal_damping <= 0.0 || self.rush_horizontal_damping > 1.0 {
            return Err("rush_horizontal_damping must be in (0, 1]".to_string());
        }
        if self.death_burst_interval <= 0.0 {
            return Err("death_burst_interval must be positive".to_string());
        }

        for (name, slam) in [("slam", &self.slam), ("rage_slam", &self.rage_slam)] {
            if slam.count == 0 {
                return Err(format!("{name}.count must be at least 1"));
            }
            if slam.interval <= 0.0 {
                return Err(format!("{name}.interval must be positive"));
            }
            if slam.radius <= 0.0 {
                return Err(format!("{name}.radius must be positive"));
            }
        }
        for (name, wave) in [("wave", &self.wave), ("rage_wave", &self.rage_wave)] {
            if wave.count == 0 {
                return Err(format!("{name}.count must be at least 1"));
            }
            if wave.interval <= 0.0 {
                return Err(format!("{name}.interval must be positive"));
            }
            if wave.spacing <= 0.0 {
                return Err(format!("{name}.spacing must be positive"));
            }
        }
        for (name, rush) in [("rush", &self.rush), ("rage_rush", &self.rage_rush)] {
            if rush.times == 0 {
                return Err(format!("{name}.times must be at least 1"));
            }
            if rush.speed <= 0.0 || rush.descent_speed <= 0.0 {
                return Err(format!("{name} speeds must be positive"));
            }
            if rush.duration <= 0.0 {
                return Err(format!("{name}.duration must be positive"));
            }
            if rush.warning_time <= 0.0 {
                return Err(format!("{name}.warning_time must be positive"));
            }
        }
        for (name, laser) in [("laser", &self.laser), ("rage_laser", &self.rage_laser)] {
            if laser.hold <= 0.0 {
                return Err(format!("{name}.hold must be positive"));
            }
            if laser.windup < 0.0 {
                return Err(format!("{name}.windup must not be negative"));
            }
        }

        // Rage escalates: larger radii and counts, never smaller; intervals
        // shorten, never lengthen.
        if self.rage_slam.radius < self.slam.radius {
            return Err("rage_slam.radius must not be smaller than slam.radius".to_string());
        }
        if self.rage_slam.count < self.slam.count {
            return Err("rage_slam.count must not be smaller than slam.count".to_string());
        }
        if self.rage_slam.interval > self.slam.interval {
            return Err("rage_slam.interval must not exceed slam.interval".to_string());
        }
        if self.rage_wave.count < self.wave.count {
            return Err("rage_wave.count must not be smaller than wave.count".to_string());
        }
        if self.rage_wave.interval > self.wave.interval {
            return Err("rage_wave.interval must not exceed wave.interval".to_string());
        }
        if self.rage_rush.times < self.rush.times {
            return Err("rage_rush.times must not be smaller than rush.times".to_string());
        }

        Ok(())
    }
}

/// Default on-disk location of the encounter tuning file.
pub const DEFAULT_CONFIG_PATH: &str = "assets/config/encounter.ron";

/// Load the encounter configuration from the default RON file.
pub fn load_encounter_config() -> Result<EncounterConfig, String> {
    load_encounter_config_from(Path::new(DEFAULT_CONFIG_PATH))
}

/// Load and validate an encounter configuration from a RON file.
pub fn load_encounter_config_from(path: &Path) -> Result<EncounterConfig, String> {
    let contents = std::fs::read_to_string(path)
        .map_err(|e| format!("Failed to read encounter config {}: {}", path.display(), e))?;

    let config: EncounterConfig =
        ron::from_str(&contents).map_err(|e| format!("Failed to parse encounter config: {}", e))?;

    config.validate()?;
    Ok(config)
}

/// Plugin that loads the encounter configuration at startup.
///
/// A missing tuning file falls back to the built-in values; a file that is
/// present but invalid is a startup failure, not a mid-pattern surprise.
pub struct EncounterConfigPlugin;

impl Plugin for EncounterConfigPlugin {
    fn build(&self, app: &mut App) {
        let path = Path::new(DEFAULT_CONFIG_PATH);
        if !path.exists() {
            warn!(
                "Encounter config {} not found, using built-in defaults",
                path.display()
            );
            app.insert_resource(EncounterConfig::default());
            return;
        }
        match load_encounter_config_from(path) {
            Ok(config) => {
                app.insert_resource(config);
            }
            Err(e) => {
                panic!("Failed to load encounter configuration: {}", e);
            }
        }
    }
}
