//! Frame time to fixed ticks

use crate::consts::{MAX_SUBSTEPS, SIM_DT};

/// Longest frame delta honoured (a stalled tab should not fast-forward)
pub const MAX_FRAME_DT: f32 = 0.1;

/// Accumulates frame time and hands out whole simulation ticks
#[derive(Debug, Clone, Default)]
pub struct FixedStep {
    accumulator: f32,
}

impl FixedStep {
    /// Add `dt` seconds and return how many ticks to run now
    pub fn advance(&mut self, dt: f32) -> u32 {
        self.accumulator += dt.clamp(0.0, MAX_FRAME_DT);

        let mut ticks = 0;
        while self.accumulator >= SIM_DT && ticks < MAX_SUBSTEPS {
            self.accumulator -= SIM_DT;
            ticks += 1;
        }
        ticks
    }

    /// Forget any partial tick (after a pause or phase change)
    pub fn reset(&mut self) {
        self.accumulator = 0.0;
    }
}
