//! Hop Runner - simulation core for an endless side-scrolling platformer
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, level generation, combo scoring)
//! - `session`: Session controller (run lifecycle, revives, progression bookkeeping)
//! - `persistence`: Key/value store backends for progress
//! - `profile`: Progress that survives across runs (high score, coins, skins)
//! - `challenges`: Daily challenge catalog and progress tracking
//! - `shop`: Skin and revive purchases
//! - `tuning`: Data-driven game balance
//! - `host`: Browser/native differences (calendar day)

pub mod challenges;
pub mod error;
pub mod host;
pub mod persistence;
pub mod profile;
pub mod session;
pub mod shop;
pub mod sim;
pub mod tuning;

pub use challenges::{Challenge, ChallengeBoard, ChallengeKind};
pub use error::{SessionError, SessionResult, StoreError, TuningError};
pub use persistence::{FileStore, KeyValueStore, MemoryStore};
pub use profile::Profile;
pub use session::{Reward, Session, Snapshot};
pub use tuning::Tuning;

/// Game configuration constants
pub mod consts {
    /// Simulation rate (ticks per second)
    pub const TICK_RATE: u32 = 60;
    /// Fixed simulation timestep
    pub const SIM_DT: f32 = 1.0 / TICK_RATE as f32;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Playfield dimensions (pixels)
    pub const GAME_WIDTH: f32 = 800.0;
    pub const GAME_HEIGHT: f32 = 600.0;

    /// Downward acceleration per tick
    pub const GRAVITY: f32 = 0.7;
    /// Vertical velocity applied by a jump (negative is up)
    pub const JUMP_FORCE: f32 = -10.0;
    /// Base horizontal drift per tick
    pub const MOVE_SPEED: f32 = 5.0;
    /// Jumps available before landing again
    pub const MAX_JUMP_COUNT: u8 = 2;
    /// Jump impulse multiplier while jump boost is active
    pub const JUMP_BOOST_FACTOR: f32 = 1.5;
    /// Rotation while airborne (degrees per tick)
    pub const SPIN_PER_TICK: f32 = 6.0;

    /// Player is a square sprite
    pub const PLAYER_SIZE: f32 = 45.0;
    /// Player spawn x
    pub const PLAYER_START_X: f32 = 100.0;
    /// Platforms share a fixed thickness; the top band is the landing zone
    pub const PLATFORM_HEIGHT: f32 = 20.0;
    pub const COIN_SIZE: f32 = 20.0;
    pub const POWERUP_SIZE: f32 = 30.0;

    /// Player's top edge below this line ends the run (sprite fully out of view)
    pub const FALL_LIMIT: f32 = GAME_HEIGHT;

    /// Speed curve: +0.1 every 500 points, capped at 3x
    pub const SPEED_STEP_SCORE: u64 = 500;
    pub const SPEED_STEP: f32 = 0.1;
    pub const MAX_GAME_SPEED: f32 = 3.0;
    /// Time scale while slow motion is active
    pub const SLOW_MOTION_SCALE: f32 = 0.5;

    /// Landing rotation tolerance for a perfect landing (degrees)
    pub const PERFECT_TOLERANCE: f32 = 15.0;
    /// Maximum bonus a single perfect landing awards
    pub const MAX_COMBO_BONUS: u32 = 10;
}

/// Normalize an angle in degrees to [0, 360)
#[inline]
pub fn normalize_degrees(angle: f32) -> f32 {
    let a = angle.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360.0 for tiny negative inputs
    if a >= 360.0 { 0.0 } else { a }
}

/// Shortest angular distance between two angles in degrees, in [0, 180]
#[inline]
pub fn angle_distance(a: f32, b: f32) -> f32 {
    let d = normalize_degrees(a - b);
    d.min(360.0 - d)
}

/// Horizontal drift multiplier for a given score
#[inline]
pub fn speed_for_score(score: u64) -> f32 {
    let steps = (score / consts::SPEED_STEP_SCORE) as f32;
    (1.0 + steps * consts::SPEED_STEP).min(consts::MAX_GAME_SPEED)
}
