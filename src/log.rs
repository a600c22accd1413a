//! Encounter logging
//!
//! Records all encounter events for post-run analysis and for the headless
//! runner's saved reports.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// A single entry in the encounter log
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EncounterLogEntry {
    /// Timestamp in encounter time (seconds since encounter start)
    pub timestamp: f32,
    /// The type of event
    pub event_type: EncounterLogEventType,
    /// Human-readable description of the event
    pub message: String,
}

/// Types of encounter log events for filtering
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EncounterLogEventType {
    /// A pattern executor started
    PatternStarted,
    /// A pattern executor ran to completion
    PatternEnded,
    /// The boss entered rage mode
    RageEntered,
    /// The boss took damage
    BossDamaged,
    /// A pattern's damage query killed the player
    PlayerKilled,
    /// A visual effect or camera shake was requested
    Effect,
    /// The boss died
    Death,
    /// Encounter lifecycle event (start, completion signal, etc.)
    EncounterEvent,
}

/// The encounter log resource storing all events
#[derive(Resource, Default)]
pub struct EncounterLog {
    /// All log entries in chronological order
    pub entries: Vec<EncounterLogEntry>,
    /// Current encounter time
    pub encounter_time: f32,
}

impl EncounterLog {
    /// Clear the log for a new encounter
    pub fn clear(&mut self) {
        self.entries.clear();
        self.encounter_time = 0.0;
    }

    /// Add a new entry to the log
    pub fn log(&mut self, event_type: EncounterLogEventType, message: String) {
        self.entries.push(EncounterLogEntry {
            timestamp: self.encounter_time,
            event_type,
            message,
        });
    }

    /// Get entries filtered by event type
    pub fn filter_by_type(&self, event_type: EncounterLogEventType) -> Vec<&EncounterLogEntry> {
        self.entries
            .iter()
            .filter(|e| e.event_type == event_type)
            .collect()
    }

    /// Get the last N entries
    pub fn recent(&self, count: usize) -> Vec<&EncounterLogEntry> {
        self.entries.iter().rev().take(count).rev().collect()
    }

    /// Save the log and metadata as JSON, returning the filename written.
    ///
    /// With no explicit path, writes `encounter_log_<seconds>.json` in the
    /// working directory.
    pub fn save_to_file(
        &self,
        metadata: &EncounterMetadata,
        output_path: Option<&str>,
    ) -> Result<String, String> {
        let report = EncounterReport {
            metadata: metadata.clone(),
            entries: self.entries.clone(),
        };

        let json = serde_json::to_string_pretty(&report)
            .map_err(|e| format!("Failed to serialize encounter log: {}", e))?;

        let filename = match output_path {
            Some(path) => path.to_string(),
            None => {
                let stamp = std::time::SystemTime::now()
                    .duration_since(std::time::UNIX_EPOCH)
                    .map(|d| d.as_secs())
                    .unwrap_or(0);
                format!("encounter_log_{}.json", stamp)
            }
        };

        if let Some(parent) = Path::new(&filename).parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)
                    .map_err(|e| format!("Failed to create log directory: {}", e))?;
            }
        }

        std::fs::write(&filename, json).map_err(|e| format!("Failed to write log: {}", e))?;
        Ok(filename)
    }
}

/// Summary of a finished encounter, saved alongside the event trace.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EncounterMetadata {
    /// Whether the boss was defeated (false = timeout or player loss)
    pub boss_defeated: bool,
    /// Boss health when the run ended
    pub final_health: f32,
    /// Phase the boss ended in
    pub final_phase: String,
    /// Total encounter duration in seconds
    pub duration: f32,
    /// Number of patterns that ran to completion
    pub patterns_executed: u32,
    /// How many times pattern damage killed the player
    pub player_deaths: u32,
    /// Random seed used (if deterministic)
    pub random_seed: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct EncounterReport {
    metadata: EncounterMetadata,
    entries: Vec<EncounterLogEntry>,
}

/// Advance the log clock each tick.
pub fn tick_encounter_time(time: Res<Time>, mut log: ResMut<EncounterLog>) {
    log.encounter_time += time.delta_secs();
}
