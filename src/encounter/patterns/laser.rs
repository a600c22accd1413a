//! Laser pattern (rage only)
//!
//! Windup, then activate the externally-owned beam emitter for the hold
//! duration, then deactivate. The beam's collision behavior belongs to the
//! emitter; this machine only toggles it and keeps the boss planted.

use crate::log::{EncounterLog, EncounterLogEventType};

use super::super::config::LaserTuning;
use super::super::effects::BeamEmitter;

pub struct LaserState {
    pub stage: LaserStage,
    /// Hold duration captured from tuning at pattern start
    hold: f32,
}

pub enum LaserStage {
    /// Telegraphed delay before the beam comes on
    Windup { remaining: f32 },
    /// Beam is active
    Hold { remaining: f32 },
}

impl LaserState {
    pub fn new(tuning: &LaserTuning) -> LaserState {
        LaserState {
            stage: LaserStage::Windup {
                remaining: tuning.windup,
            },
            hold: tuning.hold,
        }
    }
}

/// Advance the laser by one tick. Returns true once the beam has shut off.
pub fn step(state: &mut LaserState, dt: f32, beam: &mut BeamEmitter, log: &mut EncounterLog) -> bool {
    match &mut state.stage {
        LaserStage::Windup { remaining } => {
            *remaining -= dt;
            if *remaining <= 0.0 {
                beam.active = true;
                log.log(
                    EncounterLogEventType::EncounterEvent,
                    "Laser beam activated".to_string(),
                );
                state.stage = LaserStage::Hold {
                    remaining: state.hold,
                };
            }
            false
        }
        LaserStage::Hold { remaining } => {
            *remaining -= dt;
            if *remaining <= 0.0 {
                beam.active = false;
                log.log(
                    EncounterLogEventType::EncounterEvent,
                    "Laser beam deactivated".to_string(),
                );
                return true;
            }
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use super::super::super::config::EncounterConfig;

    #[test]
    fn beam_toggles_on_after_windup_and_off_after_hold() {
        let config = EncounterConfig::default();
        let tuning = config.rage_laser.clone();
        let mut state = LaserState::new(&tuning);
        let mut beam = BeamEmitter::default();
        let mut log = EncounterLog::default();

        assert!(!step(&mut state, tuning.windup + 0.01, &mut beam, &mut log));
        assert!(beam.active);
        assert!(step(&mut state, tuning.hold + 0.01, &mut beam, &mut log));
        assert!(!beam.active);
    }
}
