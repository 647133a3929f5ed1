//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Delayed effects go through the tick-driven schedule, never a wall clock
//! - No rendering, audio or storage dependencies

pub mod autopilot;
pub mod clock;
pub mod collision;
pub mod combo;
pub mod effects;
pub mod generator;
pub mod physics;
pub mod schedule;
pub mod state;
pub mod tick;

pub use clock::FixedStep;
pub use collision::{Aabb, Landing, find_landing, lands_on};
pub use combo::{LandingGrade, grade_landing, snap_angle};
pub use effects::ActiveEffects;
pub use generator::{CoinPattern, gap_bounds, generate_platform, max_jump_travel};
pub use physics::jump;
pub use schedule::{Schedule, ScheduledAction};
pub use state::{
    Coin, GameEvent, GamePhase, GameState, Platform, PlatformKind, Player, PowerUp, PowerUpKind,
};
pub use tick::{TickFrame, revive_run, start_run, tick};
