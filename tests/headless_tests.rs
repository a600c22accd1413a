//! Integration tests for headless encounter execution
//!
//! These tests verify that:
//! - Scenario files parse and validate correctly
//! - Encounter results are accessible programmatically
//! - CLI overrides map onto the scenario

use bossim::headless::{EncounterResult, HeadlessEncounterConfig, ScriptedDamage};

fn scripted_scenario(seed: Option<u64>) -> HeadlessEncounterConfig {
    HeadlessEncounterConfig {
        encounter_config: None,
        boss_position: [0.0, -3.0],
        player_position: [8.0, -3.0],
        damage_script: vec![
            ScriptedDamage {
                at: 2.0,
                amount: 300.0,
            },
            ScriptedDamage {
                at: 8.0,
                amount: 400.0,
            },
            ScriptedDamage {
                at: 15.0,
                amount: 400.0,
            },
        ],
        output_path: None,
        max_duration_secs: 60.0,
        random_seed: seed,
    }
}

#[test]
fn scripted_scenario_validates() {
    let config = scripted_scenario(Some(12345));
    assert!(config.validate().is_ok());
    assert_eq!(config.random_seed, Some(12345));
    assert_eq!(config.damage_script.len(), 3);
}

#[test]
fn zero_duration_scenario_is_rejected() {
    let mut config = scripted_scenario(None);
    config.max_duration_secs = 0.0;
    assert!(config.validate().is_err());
}

#[test]
fn zero_damage_hit_is_rejected() {
    let mut config = scripted_scenario(None);
    config.damage_script.push(ScriptedDamage {
        at: 20.0,
        amount: 0.0,
    });
    assert!(config.validate().is_err());
}

#[test]
fn encounter_result_reports_defeat() {
    let result = EncounterResult {
        boss_defeated: true,
        encounter_time: 32.5,
        final_health: 0.0,
        final_phase: "Rage".to_string(),
        patterns_executed: 6,
        player_deaths: 1,
        random_seed: Some(42),
    };

    assert!(result.boss_defeated);
    assert_eq!(result.final_phase, "Rage");
    assert_eq!(result.random_seed, Some(42));
}

#[test]
fn minimal_scenario_uses_defaults() {
    let config: HeadlessEncounterConfig = serde_json::from_str("{}").unwrap();
    assert!(config.validate().is_ok());
    assert_eq!(config.max_duration_secs, 120.0);
    assert_eq!(config.player_position, [8.0, -3.0]);
    assert!(config.damage_script.is_empty());
    assert!(config.random_seed.is_none());
}
