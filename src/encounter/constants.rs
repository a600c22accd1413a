//! Encounter Constants
//!
//! Centralized location for cosmetic timing values used by the effect
//! requests. Mechanical tuning lives in [`super::config::EncounterConfig`];
//! these only control how long requested visuals linger.

/// Lifetime of the radial slam cue (normal tier)
pub const SLAM_EFFECT_LIFETIME: f32 = 1.5;

/// Lifetime of the radial slam cue (rage tier, larger and longer)
pub const RAGE_SLAM_EFFECT_LIFETIME: f32 = 2.0;

/// Lifetime of the expanding shockwave ring
pub const SHOCKWAVE_LIFETIME: f32 = 0.8;

/// Lifetime of the trail effect following a dash
pub const RUSH_TRAIL_LIFETIME: f32 = 0.5;

/// Lifetime of the dust effect during a descent
pub const DESCENT_EFFECT_LIFETIME: f32 = 0.8;

/// Lifetime of the white burst shown where a hit landed
pub const HIT_BURST_LIFETIME: f32 = 0.3;

/// Lifetime of one death explosion burst
pub const DEATH_EXPLOSION_LIFETIME: f32 = 1.0;

/// Camera shake duration after a landing
pub const LANDING_SHAKE_DURATION: f32 = 0.5;

/// Camera shake intensity when entering rage mode
pub const RAGE_ENTER_SHAKE_INTENSITY: f32 = 10.0;
