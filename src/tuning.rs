//! Game balance knobs
//!
//! Loaded once at startup from an optional JSON file. Missing fields fall back
//! to the shipped defaults so a partial file only overrides what it names.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::TICK_RATE;
use crate::error::TuningError;

/// Data-driven balance values
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Level generation ===
    /// Chance that a freshly generated gap gets a coin pattern
    pub coin_spawn_chance: f64,
    /// Independent chance that a gap gets a power-up
    pub powerup_spawn_chance: f64,
    /// Chance a platform is moving or disappearing instead of normal
    pub special_platform_chance: f64,
    /// Platforms generated after the starting platform
    pub initial_platforms: usize,
    /// Platforms generated after the safe platform on revive
    pub revive_platforms: usize,
    /// How far behind the camera entities survive before pruning (pixels)
    pub prune_margin: f32,

    // === Power-ups (seconds) ===
    pub jump_boost_secs: u32,
    pub slow_motion_secs: u32,
    pub shield_secs: u32,

    // === Delayed effects (ticks) ===
    /// Delay between landing on a disappearing platform and it vanishing
    pub disappear_delay_ticks: u64,
    /// How long the perfect-landing flash stays up
    pub combo_flash_ticks: u64,

    // === Progression ===
    /// Challenges active per day
    pub active_challenges: usize,
    pub skin_price: u64,
    pub revive_price: u64,
    /// Game speed removed on revive (never below 1.0)
    pub revive_slowdown: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            coin_spawn_chance: 0.2,
            powerup_spawn_chance: 0.0,
            special_platform_chance: 0.2,
            initial_platforms: 8,
            revive_platforms: 5,
            prune_margin: 300.0,

            jump_boost_secs: 5,
            slow_motion_secs: 5,
            shield_secs: 20,

            disappear_delay_ticks: u64::from(TICK_RATE) / 2,
            combo_flash_ticks: u64::from(TICK_RATE) * 4 / 5,

            active_challenges: 3,
            skin_price: 1000,
            revive_price: 200,
            revive_slowdown: 0.5,
        }
    }
}

impl Tuning {
    /// Parse tuning from a JSON string
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load tuning from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, TuningError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let tuning = Self::from_json(&json)?;
        log::info!("Loaded tuning from {}", path.display());
        Ok(tuning)
    }

    /// Load tuning if a path was given, otherwise (or on failure) use defaults
    pub fn load_or_default(path: Option<&Path>) -> Self {
        match path.map(Self::load) {
            Some(Ok(tuning)) => tuning,
            Some(Err(e)) => {
                log::warn!("{e}, using default tuning");
                Self::default()
            }
            None => Self::default(),
        }
    }
}
