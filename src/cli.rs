//! Command-line interface for the boss encounter simulator

use clap::Parser;
use std::path::PathBuf;

/// Boss encounter behavior simulator
#[derive(Parser, Debug)]
#[command(name = "bossim")]
#[command(about = "Boss encounter behavior simulator")]
#[command(version)]
pub struct Args {
    /// JSON scenario file; a default scenario runs when omitted
    #[arg(long, value_name = "SCENARIO_FILE")]
    pub scenario: Option<PathBuf>,

    /// Output path for the encounter log
    #[arg(long, value_name = "OUTPUT_PATH")]
    pub output: Option<PathBuf>,

    /// Maximum run duration in seconds (overrides the scenario value)
    #[arg(long)]
    pub max_duration: Option<f32>,

    /// Random seed for deterministic replay (overrides the scenario value)
    #[arg(long)]
    pub seed: Option<u64>,
}

pub fn parse_args() -> Args {
    Args::parse()
}
