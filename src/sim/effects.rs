//! Timed status effects
//!
//! Jump boost and slow motion count down in ticks; the shield is a one-shot
//! flag consumed by a rescue.

use serde::{Deserialize, Serialize};

use super::state::PowerUpKind;
use crate::consts::TICK_RATE;

/// Active power-up effects
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActiveEffects {
    /// Ticks remaining
    pub jump_boost: u32,
    /// Ticks remaining
    pub slow_motion: u32,
    pub shield: bool,
}

impl ActiveEffects {
    /// Apply a collected power-up. Timed effects restart at full duration.
    pub fn apply(&mut self, kind: PowerUpKind, duration_secs: u32) {
        let ticks = duration_secs.saturating_mul(TICK_RATE);
        match kind {
            PowerUpKind::JumpBoost => self.jump_boost = ticks,
            PowerUpKind::SlowMotion => self.slow_motion = ticks,
            PowerUpKind::Shield => self.shield = true,
        }
    }

    /// Count timers down by one tick (floored at zero)
    pub fn decay(&mut self) {
        self.jump_boost = self.jump_boost.saturating_sub(1);
        self.slow_motion = self.slow_motion.saturating_sub(1);
    }

    /// Spend the shield. Returns false if there was none.
    pub fn consume_shield(&mut self) -> bool {
        std::mem::replace(&mut self.shield, false)
    }

    /// Multiplier on the jump impulse
    pub fn jump_multiplier(&self) -> f32 {
        if self.jump_boost > 0 {
            crate::consts::JUMP_BOOST_FACTOR
        } else {
            1.0
        }
    }
}
