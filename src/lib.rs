//! Bossim - Boss Encounter Behavior Simulator
//!
//! A deterministic, presentation-free boss encounter core: pattern
//! scheduling, explicit pattern state machines, damage intake and the death
//! lifecycle, driven headlessly for automated testing.
//!
//! This library exposes the core modules for testing and reuse.

pub mod cli;
pub mod encounter;
pub mod headless;
pub mod log;

// Re-export commonly used types
pub use encounter::{
    BossEncounter, DamageEvent, EncounterComplete, EncounterConfig, EncounterPlugin, GameRng,
    Phase, Player, PlayerKilled,
};
pub use headless::HeadlessEncounterConfig;
pub use log::{EncounterLog, EncounterLogEventType};
