//! Bossim - Boss Encounter Behavior Simulator
//!
//! Runs a boss encounter headlessly from a JSON scenario: the boss cycles
//! through its attack patterns against a stationary player while scripted
//! damage drives it through rage mode and (usually) death. The full event
//! trace is saved as JSON for analysis.

use std::process::ExitCode;

use bossim::cli;
use bossim::headless::{run_headless_encounter, HeadlessEncounterConfig};

fn main() -> ExitCode {
    let args = cli::parse_args();

    let mut config = match &args.scenario {
        Some(path) => match HeadlessEncounterConfig::load_from_file(path) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("Error loading scenario: {}", e);
                return ExitCode::FAILURE;
            }
        },
        None => HeadlessEncounterConfig::default(),
    };

    if let Some(output) = &args.output {
        config.output_path = Some(output.display().to_string());
    }
    if let Some(max_duration) = args.max_duration {
        config.max_duration_secs = max_duration;
    }
    if let Some(seed) = args.seed {
        config.random_seed = Some(seed);
    }

    match run_headless_encounter(config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error running encounter: {}", e);
            ExitCode::FAILURE
        }
    }
}
