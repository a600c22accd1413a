//! Component Definitions for the Boss Encounter
//!
//! All per-encounter mutable state lives on ECS components and resources so a
//! second encounter (or a test world) is just another entity.

use bevy::prelude::*;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Seedable random number generator for deterministic encounters.
///
/// When created from a seed, the whole encounter (pattern choices, death burst
/// offsets) replays identically.
#[derive(Resource)]
pub struct GameRng {
    rng: StdRng,
    /// The seed used to initialize this RNG (if deterministic)
    pub seed: Option<u64>,
}

impl GameRng {
    /// Create a new GameRng with a specific seed for deterministic behavior
    pub fn from_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            seed: Some(seed),
        }
    }

    /// Create a new GameRng with random entropy (non-deterministic)
    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_entropy(),
            seed: None,
        }
    }

    /// Generate a random f32 in the range [0.0, 1.0)
    pub fn random_f32(&mut self) -> f32 {
        self.rng.gen()
    }

    /// Generate a random f32 in the given range
    pub fn random_range(&mut self, min: f32, max: f32) -> f32 {
        min + self.random_f32() * (max - min)
    }

    /// Pick a uniformly random index below `len` (len must be non-zero)
    pub fn random_index(&mut self, len: usize) -> usize {
        self.rng.gen_range(0..len)
    }
}

impl Default for GameRng {
    fn default() -> Self {
        Self::from_entropy()
    }
}

// ============================================================================
// Enums
// ============================================================================

/// Encounter difficulty tier. Escalates once, never de-escalates.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Phase {
    Normal,
    Rage,
}

impl Phase {
    /// Index into per-phase storage such as `last_pattern`
    pub fn index(self) -> usize {
        match self {
            Phase::Normal => 0,
            Phase::Rage => 1,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Phase::Normal => "Normal",
            Phase::Rage => "Rage",
        }
    }
}

/// Who may write the boss's velocity this tick. Exactly one owner at a time;
/// `None` means the boss is frozen (dying).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MotionOwner {
    None,
    FollowAi,
    Pattern,
}

// ============================================================================
// Boss components
// ============================================================================

/// The aggregate root for one boss encounter.
#[derive(Component)]
pub struct BossEncounter {
    /// Maximum health (also the starting health)
    pub max_health: f32,
    /// Current health. May dip below zero transiently; the death check runs
    /// after subtraction, not before.
    pub health: f32,
    /// Current difficulty tier
    pub phase: Phase,
    /// Last pattern id chosen per phase, for repeat avoidance only
    pub last_pattern: [Option<usize>; 2],
    /// Exclusive motion ownership token
    pub motion_owner: MotionOwner,
    /// True during the Rush execution stage
    pub is_rushing: bool,
    /// True during the post-dash descent stage
    pub is_descending: bool,
    /// Death teardown has begun; damage and scheduling are ignored from here on
    pub dying: bool,
}

impl BossEncounter {
    pub fn new(max_health: f32) -> Self {
        Self {
            max_health,
            health: max_health,
            phase: Phase::Normal,
            last_pattern: [None, None],
            motion_owner: MotionOwner::FollowAi,
            is_rushing: false,
            is_descending: false,
            dying: false,
        }
    }

    /// The one-time rage threshold: at or below half health.
    pub fn should_enrage(&self) -> bool {
        self.phase == Phase::Normal && self.health <= self.max_health * 0.5
    }
}

/// Linear velocity applied to the transform each tick.
#[derive(Component, Default)]
pub struct Velocity(pub Vec2);

/// The encounter scheduler: the top-level repeating loop that alternates
/// between idle waits and pattern dispatch.
#[derive(Component)]
pub struct Scheduler {
    pub state: SchedulerState,
}

impl Scheduler {
    pub fn new(idle_delay: f32) -> Self {
        Self {
            state: SchedulerState::Idle {
                remaining: idle_delay,
            },
        }
    }
}

/// Named scheduler states; each timed wait is an explicit countdown field.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum SchedulerState {
    /// Waiting out the idle delay before the next selection
    Idle { remaining: f32 },
    /// Just entered rage; waiting out the settle time before resuming
    RageSettle { remaining: f32 },
    /// A pattern executor owns the boss until it completes
    Running,
    /// Terminal. Entered by death, never left.
    Stopped,
}

/// Boss hit feedback: sprite flashes red for a short time after taking damage.
#[derive(Component)]
pub struct HitFlash {
    pub remaining: f32,
}

/// Death teardown in progress: spaced explosion bursts, then entity removal.
#[derive(Component)]
pub struct DyingState {
    /// Explosion bursts still to request
    pub bursts_left: u32,
    /// Countdown until the next burst
    pub next_burst_in: f32,
    /// Countdown until the boss entity is despawned
    pub despawn_in: f32,
}

// ============================================================================
// Player collaborator
// ============================================================================

/// The player actor as seen by the boss: a position plus a dead flag.
///
/// The player's own death/respawn handling is external; `kill` is idempotent
/// because the dead flag guards it, so repeated rush contacts are no-ops.
#[derive(Component, Default)]
pub struct Player {
    pub dead: bool,
}

impl Player {
    /// Returns true if the player actually died (was alive before the call).
    pub fn kill(&mut self) -> bool {
        if self.dead {
            return false;
        }
        self.dead = true;
        true
    }
}

/// Fired once per actual player death, for external consumers.
#[derive(Event)]
pub struct PlayerKilled {
    /// Position of the boss when the kill landed
    pub at: Vec2,
}
