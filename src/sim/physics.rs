//! Player physics
//!
//! Jumping, per-tick integration against the platform list, pickup
//! consumption and the shield rescue.

use glam::Vec2;

use super::collision::find_landing;
use super::generator::safe_platform;
use super::state::{GameEvent, GameState};
use crate::consts::*;
use crate::normalize_degrees;

/// What happened to the player during integration
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PlayerStep {
    /// Still in the air (or walking; the next fall step re-lands)
    Airborne,
    /// Came to rest on `platforms[index]`
    Landed { index: usize, was_jumping: bool },
    /// Dropped below the playfield
    FellOut,
}

/// Try to jump. Returns false when no run is live or all jumps are spent.
pub fn jump(state: &mut GameState) -> bool {
    if !state.is_running() {
        return false;
    }
    let player = &mut state.player;
    if player.jump_count >= MAX_JUMP_COUNT {
        return false;
    }
    player.vel.y = JUMP_FORCE * player.effects.jump_multiplier();
    player.is_jumping = true;
    player.jump_count += 1;
    let jump_count = player.jump_count;
    state.push_event(GameEvent::Jumped { jump_count });
    true
}

/// Move the player one tick and resolve landings.
///
/// `scroll` is this tick's horizontal drift; `time_scale` scales gravity and
/// spin.
pub fn integrate_player(state: &mut GameState, scroll: f32, time_scale: f32) -> PlayerStep {
    let player = &mut state.player;
    let prev_pos = player.pos;
    let prev_vel_y = player.vel.y;

    player.vel.x = scroll;
    player.vel.y += GRAVITY * time_scale;
    let new_pos = prev_pos + player.vel;

    if player.is_jumping {
        player.rotation = normalize_degrees(player.rotation + SPIN_PER_TICK * time_scale);
    }

    if let Some(landing) = find_landing(prev_pos, new_pos, prev_vel_y, &state.platforms) {
        let was_jumping = player.is_jumping;
        player.pos.x = new_pos.x;
        player.stand_on(landing.surface_y);
        return PlayerStep::Landed {
            index: landing.index,
            was_jumping,
        };
    }

    player.pos = new_pos;
    if player.pos.y > FALL_LIMIT {
        PlayerStep::FellOut
    } else {
        PlayerStep::Airborne
    }
}

/// Consume every coin and power-up the player overlaps
pub fn collect_pickups(state: &mut GameState) {
    let bounds = state.player.bounds();
    let mut events = Vec::new();

    for coin in state.coins.iter_mut().filter(|c| !c.collected) {
        if bounds.overlaps(&coin.bounds()) {
            coin.collected = true;
            state.run_coins += u64::from(coin.value);
            events.push(GameEvent::CoinCollected { value: coin.value });
        }
    }

    for power_up in state.power_ups.iter_mut().filter(|p| !p.collected) {
        if bounds.overlaps(&power_up.bounds()) {
            power_up.collected = true;
            state.player.effects.apply(power_up.kind, power_up.duration_secs);
            events.push(GameEvent::PowerUpCollected {
                kind: power_up.kind,
            });
        }
    }

    for event in events {
        state.push_event(event);
    }
}

/// Spend the shield to catch a falling player on a fresh platform.
/// Returns false if no shield was active.
pub fn rescue_with_shield(state: &mut GameState) -> bool {
    if !state.player.effects.consume_shield() {
        return false;
    }
    let safe = safe_platform(state);
    let (safe_x, safe_y) = (safe.pos.x, safe.pos.y);
    state.insert_platform(safe);

    let player = &mut state.player;
    player.pos.x = safe_x + 50.0;
    player.stand_on(safe_y);
    player.rotation = 0.0;
    log::debug!("Shield consumed, rescue platform at x={safe_x:.0}");
    state.push_event(GameEvent::ShieldConsumed);
    true
}

/// Re-seat the player on a safe platform (revive)
pub fn place_on(state: &mut GameState, surface: Vec2) {
    let player = &mut state.player;
    player.pos.x = surface.x + 50.0;
    player.stand_on(surface.y);
    player.rotation = 0.0;
}
