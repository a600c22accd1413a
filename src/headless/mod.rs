//! Headless mode for automated testing
//!
//! This module runs boss encounters without any graphical output, suitable
//! for automated testing, balance tuning, and replay analysis.
//!
//! ## Usage
//!
//! ```bash
//! # Run a headless encounter scenario
//! cargo run --release -- --scenario scenario.json
//! ```
//!
//! ## JSON Scenario
//!
//! ```json
//! {
//!   "damage_script": [
//!     { "at": 2.0, "amount": 300.0 },
//!     { "at": 10.0, "amount": 400.0 }
//!   ],
//!   "max_duration_secs": 120,
//!   "random_seed": 42
//! }
//! ```

pub mod config;
pub mod runner;

pub use config::{HeadlessEncounterConfig, ScriptedDamage};
pub use runner::{run_headless_encounter, EncounterResult, HeadlessPlugin};
