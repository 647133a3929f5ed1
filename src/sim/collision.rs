//! Collision detection for axis-aligned boxes
//!
//! Everything in the world is a box: the player sprite, platform slabs, coins
//! and power-ups. Landings use a swept test against the platform's top band so
//! fast falls cannot tunnel through it.

use glam::Vec2;

use super::state::Platform;
use crate::consts::{PLATFORM_HEIGHT, PLAYER_SIZE};

/// Axis-aligned bounding box (y grows downward)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min: Vec2,
    pub max: Vec2,
}

impl Aabb {
    pub fn from_size(top_left: Vec2, size: Vec2) -> Self {
        Self {
            min: top_left,
            max: top_left + size,
        }
    }

    /// Strict overlap; touching edges do not count
    pub fn overlaps(&self, other: &Aabb) -> bool {
        self.min.x < other.max.x
            && self.max.x > other.min.x
            && self.min.y < other.max.y
            && self.max.y > other.min.y
    }
}

/// Result of a landing test for one tick of motion
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Landing {
    /// Index into the platform list
    pub index: usize,
    /// Surface height the player snaps onto
    pub surface_y: f32,
}

/// Does a player moving from `prev_pos` to `new_pos` land on `platform`?
///
/// The player must have been falling on the prior tick, its lower edge must
/// end below the platform top after starting above the bottom of the top
/// band, and the horizontal extents must overlap at the new position.
pub fn lands_on(prev_pos: Vec2, new_pos: Vec2, prev_vel_y: f32, platform: &Platform) -> bool {
    if prev_vel_y <= 0.0 || !platform.is_solid() {
        return false;
    }
    let prev_bottom = prev_pos.y + PLAYER_SIZE;
    let new_bottom = new_pos.y + PLAYER_SIZE;
    let top = platform.pos.y;

    let crosses_band = new_bottom > top && prev_bottom < top + PLATFORM_HEIGHT;
    let overlaps_x = new_pos.x + PLAYER_SIZE > platform.pos.x && new_pos.x < platform.right();
    crosses_band && overlaps_x
}

/// First platform (in list order) the player lands on this tick
pub fn find_landing(
    prev_pos: Vec2,
    new_pos: Vec2,
    prev_vel_y: f32,
    platforms: &[Platform],
) -> Option<Landing> {
    platforms
        .iter()
        .position(|p| lands_on(prev_pos, new_pos, prev_vel_y, p))
        .map(|index| Landing {
            index,
            surface_y: platforms[index].pos.y,
        })
}
