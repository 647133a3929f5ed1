//! Landing precision and combo scoring
//!
//! A landing after a jump snaps the runner to the nearest quarter turn. If
//! the rotation was already within the tolerance of that side, the landing is
//! perfect and grows the combo; anything else breaks the streak.

use super::schedule::ScheduledAction;
use super::state::{GameEvent, GameState};
use crate::consts::{MAX_COMBO_BONUS, PERFECT_TOLERANCE};
use crate::tuning::Tuning;
use crate::{angle_distance, normalize_degrees};

/// How a landing rotation grades
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LandingGrade {
    /// Nearest of 0/90/180/270
    pub snapped: f32,
    pub perfect: bool,
}

/// Nearest quarter turn to `rotation` (always within 45 degrees)
pub fn snap_angle(rotation: f32) -> f32 {
    let quarter = (normalize_degrees(rotation) / 90.0).round() as u32 % 4;
    quarter as f32 * 90.0
}

pub fn grade_landing(rotation: f32) -> LandingGrade {
    let rotation = normalize_degrees(rotation);
    let snapped = snap_angle(rotation);
    LandingGrade {
        snapped,
        perfect: angle_distance(rotation, snapped) < PERFECT_TOLERANCE,
    }
}

/// Bonus score for reaching `combo`
pub fn combo_bonus(combo: u32) -> u32 {
    combo.min(MAX_COMBO_BONUS)
}

/// Score a landing that followed a jump. Returns the snapped rotation.
pub fn register_landing(state: &mut GameState, tuning: &Tuning, rotation: f32) -> f32 {
    let grade = grade_landing(rotation);
    if grade.perfect {
        state.combo += 1;
        state.max_combo = state.max_combo.max(state.combo);
        state.score += u64::from(combo_bonus(state.combo));

        // Flash stays up until the newest perfect landing's timer runs out
        state.combo_flash = true;
        state.combo_flash_token += 1;
        state.schedule.push(
            state.time_ticks + tuning.combo_flash_ticks,
            ScheduledAction::EndComboFlash {
                token: state.combo_flash_token,
            },
        );
    } else {
        state.combo = 0;
    }
    state.push_event(GameEvent::Landed {
        perfect: grade.perfect,
        combo: state.combo,
    });
    grade.snapped
}
