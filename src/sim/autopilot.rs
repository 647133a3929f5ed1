//! Idle/demo mode - the AI plays the game
//!
//! Not a solver; it jumps near platform edges and spends the second jump when
//! a fall would come up short. Good enough for attract screens and soak runs.

use super::state::{GameState, Platform};
use crate::consts::*;

/// How close (in ticks of drift) to an edge the autopilot takes off
const TAKEOFF_TICKS: f32 = 3.0;
/// Feet within this distance of a platform top count as standing on it
const STANDING_SLACK: f32 = 2.0;

fn standing_on<'a>(state: &'a GameState) -> Option<&'a Platform> {
    let player = &state.player;
    state.platforms.iter().find(|p| {
        p.is_solid()
            && player.pos.x + PLAYER_SIZE > p.pos.x
            && player.pos.x < p.right()
            && (player.bottom() - p.pos.y).abs() < STANDING_SLACK
    })
}

/// Next platform whose left edge is ahead of the player
fn next_target(state: &GameState) -> Option<&Platform> {
    let player_right = state.player.pos.x + PLAYER_SIZE;
    state
        .platforms
        .iter()
        .find(|p| p.is_solid() && p.pos.x > player_right)
}

/// Should the autopilot request a jump this tick?
pub fn wants_jump(state: &GameState) -> bool {
    if !state.is_running() {
        return false;
    }
    let player = &state.player;
    if player.jump_count >= MAX_JUMP_COUNT {
        return false;
    }

    let drift = MOVE_SPEED * state.game_speed * state.time_scale();

    if player.jump_count == 0 && !player.is_jumping {
        return match standing_on(state) {
            Some(platform) => player.pos.x + PLAYER_SIZE + drift * TAKEOFF_TICKS >= platform.right(),
            // Walked off an edge
            None => player.vel.y > GRAVITY * 2.0,
        };
    }

    // Falling with a jump left: spend it if the feet are already below the target
    if player.vel.y > 0.0 {
        return match next_target(state) {
            Some(target) => player.bottom() > target.pos.y,
            None => true,
        };
    }
    false
}
