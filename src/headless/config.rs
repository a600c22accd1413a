//! JSON scenario parsing for headless mode
//!
//! A scenario describes one automated encounter run: where the boss and the
//! player start, a scripted damage schedule standing in for player attacks,
//! and run limits.

use serde::{Deserialize, Serialize};
use std::path::Path;

/// A scripted hit on the boss at a fixed time into the run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScriptedDamage {
    /// Seconds into the run
    pub at: f32,
    /// Damage amount
    pub amount: f32,
}

/// Headless encounter scenario loaded from JSON.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HeadlessEncounterConfig {
    /// Optional path to a RON tuning file; built-in defaults otherwise
    #[serde(default)]
    pub encounter_config: Option<String>,
    /// Boss starting position
    #[serde(default = "default_boss_position")]
    pub boss_position: [f32; 2],
    /// Player starting position
    #[serde(default = "default_player_position")]
    pub player_position: [f32; 2],
    /// Damage applied to the boss on a schedule
    #[serde(default)]
    pub damage_script: Vec<ScriptedDamage>,
    /// Custom output path for the encounter log (optional)
    #[serde(default)]
    pub output_path: Option<String>,
    /// Maximum run duration in seconds before declaring a timeout
    #[serde(default = "default_max_duration")]
    pub max_duration_secs: f32,
    /// Random seed for deterministic replay
    #[serde(default)]
    pub random_seed: Option<u64>,
}

fn default_boss_position() -> [f32; 2] {
    [0.0, -3.0]
}

fn default_player_position() -> [f32; 2] {
    [8.0, -3.0]
}

fn default_max_duration() -> f32 {
    120.0
}

impl Default for HeadlessEncounterConfig {
    fn default() -> Self {
        Self {
            encounter_config: None,
            boss_position: default_boss_position(),
            player_position: default_player_position(),
            damage_script: Vec::new(),
            output_path: None,
            max_duration_secs: default_max_duration(),
            random_seed: None,
        }
    }
}

impl HeadlessEncounterConfig {
    /// Load a scenario from a JSON file.
    pub fn load_from_file(path: &Path) -> Result<Self, String> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read scenario file: {}", e))?;

        let mut config: HeadlessEncounterConfig =
            serde_json::from_str(&contents).map_err(|e| format!("Failed to parse JSON: {}", e))?;

        config.validate()?;
        // The damage driver walks the script front to back
        config.damage_script.sort_by(|a, b| a.at.total_cmp(&b.at));
        Ok(config)
    }

    /// Validate the scenario.
    pub fn validate(&self) -> Result<(), String> {
        if self.max_duration_secs <= 0.0 {
            return Err("max_duration_secs must be positive".to_string());
        }
        for (i, hit) in self.damage_script.iter().enumerate() {
            if hit.at < 0.0 {
                return Err(format!("damage_script[{}].at must not be negative", i));
            }
            if hit.amount <= 0.0 {
                return Err(format!("damage_script[{}].amount must be positive", i));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_scenario_is_valid() {
        assert!(HeadlessEncounterConfig::default().validate().is_ok());
    }

    #[test]
    fn negative_damage_time_is_rejected() {
        let mut config = HeadlessEncounterConfig::default();
        config.damage_script.push(ScriptedDamage {
            at: -1.0,
            amount: 100.0,
        });
        assert!(config.validate().is_err());
    }

    #[test]
    fn scenario_parses_from_json() {
        let json = r#"{
            "damage_script": [
                { "at": 1.0, "amount": 250.0 },
                { "at": 5.0, "amount": 250.0 }
            ],
            "max_duration_secs": 60,
            "random_seed": 42
        }"#;
        let config: HeadlessEncounterConfig = serde_json::from_str(json).unwrap();
        assert!(config.validate().is_ok());
        assert_eq!(config.damage_script.len(), 2);
        assert_eq!(config.random_seed, Some(42));
        assert_eq!(config.boss_position, [0.0, -3.0]);
    }
}
