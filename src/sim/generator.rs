//! Procedural level generation
//!
//! Platforms are appended at the frontier as the camera advances and pruned
//! once they fall far enough behind it. Every gap is bounded by the distance
//! a double jump covers at the current speed, so the level is always
//! traversable without power-ups.

use std::f32::consts::PI;

use glam::Vec2;
use rand::Rng;
use rand_pcg::Pcg32;

use super::state::{Coin, GameState, Platform, PlatformKind, PowerUp, PowerUpKind};
use crate::consts::*;
use crate::tuning::Tuning;

/// Platform width range
pub const MIN_PLATFORM_WIDTH: f32 = 80.0;
pub const MAX_PLATFORM_WIDTH: f32 = 130.0;
/// Preferred gap range before the reachability cap
pub const MIN_GAP: f32 = 80.0;
pub const MAX_GAP: f32 = 140.0;
/// Largest vertical step between neighbouring platforms
pub const MAX_RISE: f32 = 150.0;
/// Allowed platform heights
pub const MIN_PLATFORM_Y: f32 = 100.0;
pub const MAX_PLATFORM_Y: f32 = GAME_HEIGHT - 100.0;
/// Double jump covers more ground than two apexes of a single jump
pub const DOUBLE_JUMP_MARGIN: f32 = 1.6;
/// Share of the double-jump reach a gap may use
pub const GAP_REACH_SHARE: f32 = 0.6;

/// Starting platform under the spawn point
pub const ORIGIN_X: f32 = 50.0;
pub const ORIGIN_Y: f32 = GAME_HEIGHT - 50.0;
pub const ORIGIN_WIDTH: f32 = 200.0;

/// Rescue/revive platforms
pub const SAFE_PLATFORM_WIDTH: f32 = 200.0;
pub const SAFE_PLATFORM_Y: f32 = GAME_HEIGHT - 150.0;

/// Horizontal distance covered by a double jump at `speed_factor`
pub fn max_jump_travel(speed_factor: f32) -> f32 {
    let time_to_apex = JUMP_FORCE.abs() / GRAVITY;
    MOVE_SPEED * speed_factor * 2.0 * time_to_apex * DOUBLE_JUMP_MARGIN
}

/// Inclusive gap range at `speed_factor`
pub fn gap_bounds(speed_factor: f32) -> (f32, f32) {
    let max_gap = MAX_GAP.min(max_jump_travel(speed_factor) * GAP_REACH_SHARE);
    // At very low speed the reachability cap wins over the preferred minimum
    (MIN_GAP.min(max_gap), max_gap)
}

fn roll(rng: &mut Pcg32, chance: f64) -> bool {
    rng.random::<f64>() < chance
}

/// Generate the platform after one ending at `last_x` with top `last_y`.
///
/// With no previous height the platform sits at ground height.
pub fn generate_platform(
    rng: &mut Pcg32,
    id: u32,
    last_x: f32,
    last_y: Option<f32>,
    speed_factor: f32,
    tuning: &Tuning,
) -> Platform {
    let width = rng.random_range(MIN_PLATFORM_WIDTH..=MAX_PLATFORM_WIDTH);

    let (min_gap, max_gap) = gap_bounds(speed_factor);
    let gap = rng.random_range(min_gap..=max_gap);
    let x = last_x + gap;

    let y = match last_y {
        Some(last_y) => {
            let offset = rng.random_range(-MAX_RISE..=MAX_RISE);
            (last_y + offset).clamp(MIN_PLATFORM_Y, MAX_PLATFORM_Y)
        }
        None => MAX_PLATFORM_Y,
    };

    let kind = if roll(rng, tuning.special_platform_chance) {
        if rng.random_bool(0.5) {
            PlatformKind::Moving {
                direction: if rng.random_bool(0.5) { 1.0 } else { -1.0 },
                start_x: x,
                move_distance: (width * 1.5).min(100.0),
            }
        } else {
            PlatformKind::Disappearing {
                visible: true,
                crumbling: false,
            }
        }
    } else {
        PlatformKind::Normal
    };

    Platform::new(id, Vec2::new(x, y), width, kind)
}

/// Coin layouts placed in the gap between two platforms
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CoinPattern {
    /// Five coins on a sine-curved path between platform centers
    Arc,
    /// Four evenly spaced coins across the gap
    Row,
    /// Two rows of three over the middle of the gap
    Grid,
}

impl CoinPattern {
    pub const ALL: [CoinPattern; 3] = [CoinPattern::Arc, CoinPattern::Row, CoinPattern::Grid];

    pub fn layout(self, prev: &Platform, next: &Platform) -> Vec<Coin> {
        let high = prev.pos.y.min(next.pos.y);
        match self {
            CoinPattern::Arc => {
                let count = 5;
                let start = Vec2::new(prev.pos.x + prev.width / 2.0, prev.pos.y - 50.0);
                let end = Vec2::new(next.pos.x + next.width / 2.0, next.pos.y - 50.0);
                (0..count)
                    .map(|i| {
                        let t = i as f32 / (count - 1) as f32;
                        let lift = (t * PI).sin() * 40.0;
                        Coin::new(start.lerp(end, t) - Vec2::new(0.0, lift))
                    })
                    .collect()
            }
            CoinPattern::Row => {
                let count = 4;
                let start_x = prev.right();
                let spacing = (next.pos.x - start_x) / (count + 1) as f32;
                (0..count)
                    .map(|i| Coin::new(Vec2::new(start_x + spacing * (i + 1) as f32, high - 60.0)))
                    .collect()
            }
            CoinPattern::Grid => {
                let (rows, cols, spacing) = (2, 3, 25.0);
                let start_x = (prev.right() + next.pos.x) / 2.0 - (cols as f32 * spacing) / 2.0;
                let start_y = high - 80.0;
                (0..rows)
                    .flat_map(|row| {
                        (0..cols).map(move |col| {
                            Coin::new(Vec2::new(
                                start_x + col as f32 * spacing,
                                start_y + row as f32 * spacing,
                            ))
                        })
                    })
                    .collect()
            }
        }
    }
}

/// Roll coins and power-ups for the gap between `prev` and `next`
pub fn spawn_collectibles(
    rng: &mut Pcg32,
    prev: &Platform,
    next: &Platform,
    tuning: &Tuning,
) -> (Vec<Coin>, Option<PowerUp>) {
    let coins = if roll(rng, tuning.coin_spawn_chance) {
        let pattern = CoinPattern::ALL[rng.random_range(0..CoinPattern::ALL.len())];
        pattern.layout(prev, next)
    } else {
        Vec::new()
    };

    let power_up = roll(rng, tuning.powerup_spawn_chance).then(|| {
        let kind = PowerUpKind::ALL[rng.random_range(0..PowerUpKind::ALL.len())];
        let duration_secs = match kind {
            PowerUpKind::JumpBoost => tuning.jump_boost_secs,
            PowerUpKind::SlowMotion => tuning.slow_motion_secs,
            PowerUpKind::Shield => tuning.shield_secs,
        };
        PowerUp {
            pos: Vec2::new(
                (prev.right() + next.pos.x) / 2.0,
                prev.pos.y.min(next.pos.y) - 60.0,
            ),
            kind,
            collected: false,
            duration_secs,
        }
    });

    (coins, power_up)
}

/// Lay out the starting level: the origin platform plus the initial run
pub fn init_level(state: &mut GameState, tuning: &Tuning) {
    state.platforms.clear();
    state.coins.clear();
    state.power_ups.clear();

    let id = state.next_entity_id();
    state.platforms.push(Platform::new(
        id,
        Vec2::new(ORIGIN_X, ORIGIN_Y),
        ORIGIN_WIDTH,
        PlatformKind::Normal,
    ));
    append_platforms(state, tuning, tuning.initial_platforms, 1.0);
}

/// Append `count` generated platforms after the frontier without collectibles
pub fn append_platforms(state: &mut GameState, tuning: &Tuning, count: usize, speed_factor: f32) {
    for _ in 0..count {
        let Some(frontier) = state.frontier() else {
            log::error!("Cannot append platforms to an empty level");
            return;
        };
        let (last_x, last_y) = (frontier.anchor_right(), frontier.pos.y);
        let id = state.next_entity_id();
        let platform =
            generate_platform(&mut state.rng, id, last_x, Some(last_y), speed_factor, tuning);
        state.platforms.push(platform);
    }
}

/// Generate ahead of the camera and spawn collectibles in each new gap
pub fn extend_level(state: &mut GameState, tuning: &Tuning, speed_factor: f32) {
    loop {
        let Some(frontier) = state.frontier().cloned() else {
            log::error!("Level has no platforms; skipping generation");
            return;
        };
        if state.camera_offset + GAME_WIDTH <= frontier.pos.x {
            return;
        }

        let id = state.next_entity_id();
        let next = generate_platform(
            &mut state.rng,
            id,
            frontier.anchor_right(),
            Some(frontier.pos.y),
            speed_factor,
            tuning,
        );
        let (coins, power_up) = spawn_collectibles(&mut state.rng, &frontier, &next, tuning);
        state.coins.extend(coins);
        state.power_ups.extend(power_up);
        state.platforms.push(next);
    }
}

/// Drop entities far enough behind the camera, and consumed collectibles
pub fn prune(state: &mut GameState, margin: f32) {
    let cutoff = state.camera_offset - margin;
    state.platforms.retain(|p| p.right() > cutoff);
    state
        .coins
        .retain(|c| !c.collected && c.pos.x + COIN_SIZE > cutoff);
    state
        .power_ups
        .retain(|p| !p.collected && p.pos.x + POWERUP_SIZE > cutoff);
}

/// Safe platform placed a quarter screen ahead of the camera
pub fn safe_platform(state: &mut GameState) -> Platform {
    let id = state.next_entity_id();
    Platform::new(
        id,
        Vec2::new(state.camera_offset + GAME_WIDTH / 4.0, SAFE_PLATFORM_Y),
        SAFE_PLATFORM_WIDTH,
        PlatformKind::Normal,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::SeedableRng;

    #[test]
    fn test_gap_bounds_at_base_speed() {
        let (lo, hi) = gap_bounds(1.0);
        assert_eq!(lo, MIN_GAP);
        // 5 * 2 * (10 / 0.7) * 1.6 * 0.6 ~= 137.1
        assert!((hi - 137.142_86).abs() < 0.01, "hi = {hi}");
    }

    #[test]
    fn test_gap_bounds_slow_motion_caps_minimum() {
        let (lo, hi) = gap_bounds(0.5);
        assert!(lo <= hi);
        assert!(hi <= max_jump_travel(0.5));
    }

    #[test]
    fn test_first_platform_at_ground_height() {
        let mut rng = Pcg32::seed_from_u64(3);
        let p = generate_platform(&mut rng, 1, 0.0, None, 1.0, &Tuning::default());
        assert_eq!(p.pos.y, MAX_PLATFORM_Y);
    }

    #[test]
    fn test_moving_platform_amplitude_from_width() {
        let tuning = Tuning {
            special_platform_chance: 1.0,
            ..Default::default()
        };
        let mut rng = Pcg32::seed_from_u64(11);
        let mut seen_moving = false;
        for i in 0..64 {
            let p = generate_platform(&mut rng, i, 0.0, Some(300.0), 1.0, &tuning);
            match p.kind {
                PlatformKind::Moving {
                    direction,
                    start_x,
                    move_distance,
                } => {
                    seen_moving = true;
                    assert!(direction == 1.0 || direction == -1.0);
                    assert_eq!(start_x, p.pos.x);
                    assert_eq!(move_distance, (p.width * 1.5).min(100.0));
                }
                PlatformKind::Disappearing { visible, crumbling } => {
                    assert!(visible);
                    assert!(!crumbling);
                }
                PlatformKind::Normal => panic!("special chance is 1.0"),
            }
        }
        assert!(seen_moving);
    }

    #[test]
    fn test_init_level_layout() {
        let mut state = GameState::new(42);
        init_level(&mut state, &Tuning::default());
        assert_eq!(state.platforms.len(), 9);
        let origin = &state.platforms[0];
        assert_eq!(origin.pos, Vec2::new(ORIGIN_X, ORIGIN_Y));
        assert_eq!(origin.width, ORIGIN_WIDTH);
        for pair in state.platforms.windows(2) {
            let gap = pair[1].pos.x - pair[0].right();
            assert!((MIN_GAP..=137.15).contains(&gap), "gap {gap}");
        }
        assert!(state.coins.is_empty());
    }

    #[test]
    fn test_extend_level_reaches_past_screen() {
        let mut state = GameState::new(7);
        init_level(&mut state, &Tuning::default());
        state.camera_offset = 5000.0;
        extend_level(&mut state, &Tuning::default(), 1.0);
        let frontier = state.frontier().unwrap();
        assert!(frontier.pos.x >= state.camera_offset + GAME_WIDTH);
        assert!(state.platforms.windows(2).all(|w| w[0].pos.x < w[1].pos.x));
    }

    #[test]
    fn test_extend_level_empty_is_noop() {
        let mut state = GameState::new(7);
        extend_level(&mut state, &Tuning::default(), 1.0);
        assert!(state.platforms.is_empty());
    }

    #[test]
    fn test_moving_frontier_anchors_on_spawn_position() {
        let tuning = Tuning::default();
        for drift in [-40.0, 40.0] {
            let mut state = GameState::new(21);
            let mut frontier = Platform::new(
                1,
                Vec2::new(300.0, 400.0),
                100.0,
                PlatformKind::Moving {
                    direction: 1.0,
                    start_x: 300.0,
                    move_distance: 100.0,
                },
            );
            frontier.pos.x += drift;
            state.platforms.push(frontier);

            extend_level(&mut state, &tuning, 1.0);

            let (lo, hi) = gap_bounds(1.0);
            let gap = state.platforms[1].pos.x - 400.0;
            assert!(gap >= lo - 1e-3 && gap <= hi + 1e-3, "drift {drift}: gap {gap}");
        }
    }

    #[test]
    fn test_prune_behind_camera() {
        let mut state = GameState::new(7);
        init_level(&mut state, &Tuning::default());
        state.camera_offset = 1000.0;
        state.coins.push(Coin::new(Vec2::new(100.0, 100.0)));
        state.coins.push(Coin::new(Vec2::new(1200.0, 100.0)));
        let mut taken = Coin::new(Vec2::new(1300.0, 100.0));
        taken.collected = true;
        state.coins.push(taken);
        prune(&mut state, 300.0);
        assert!(state.platforms.iter().all(|p| p.right() > 700.0));
        assert_eq!(state.coins.len(), 1);
        assert_eq!(state.coins[0].pos.x, 1200.0);
    }

    #[test]
    fn test_coin_patterns() {
        let prev = Platform::new(1, Vec2::new(0.0, 400.0), 100.0, PlatformKind::Normal);
        let next = Platform::new(2, Vec2::new(220.0, 350.0), 100.0, PlatformKind::Normal);

        let arc = CoinPattern::Arc.layout(&prev, &next);
        assert_eq!(arc.len(), 5);
        assert_eq!(arc[0].pos, Vec2::new(50.0, 350.0));
        assert_eq!(arc[4].pos.x, 270.0);
        // Apex is lifted above the straight line
        assert!(arc[2].pos.y < 325.0 - 39.0);

        let row = CoinPattern::Row.layout(&prev, &next);
        assert_eq!(row.len(), 4);
        assert_eq!(row[0].pos, Vec2::new(124.0, 290.0));
        assert_eq!(row[3].pos.x, 196.0);

        let grid = CoinPattern::Grid.layout(&prev, &next);
        assert_eq!(grid.len(), 6);
        assert_eq!(grid[0].pos, Vec2::new(122.5, 270.0));
        assert_eq!(grid[5].pos, Vec2::new(172.5, 295.0));
        assert!(grid.iter().chain(&row).chain(&arc).all(|c| c.value == 1 && !c.collected));
    }

    #[test]
    fn test_spawn_collectibles_respects_chances() {
        let prev = Platform::new(1, Vec2::new(0.0, 400.0), 100.0, PlatformKind::Normal);
        let next = Platform::new(2, Vec2::new(220.0, 350.0), 100.0, PlatformKind::Normal);
        let mut rng = Pcg32::seed_from_u64(5);

        let none = Tuning {
            coin_spawn_chance: 0.0,
            powerup_spawn_chance: 0.0,
            ..Default::default()
        };
        for _ in 0..50 {
            let (coins, power_up) = spawn_collectibles(&mut rng, &prev, &next, &none);
            assert!(coins.is_empty());
            assert!(power_up.is_none());
        }

        let all = Tuning {
            coin_spawn_chance: 1.0,
            powerup_spawn_chance: 1.0,
            ..Default::default()
        };
        let (coins, power_up) = spawn_collectibles(&mut rng, &prev, &next, &all);
        assert!(!coins.is_empty());
        let power_up = power_up.unwrap();
        assert_eq!(power_up.pos, Vec2::new(160.0, 290.0));
        let expected = if power_up.kind == PowerUpKind::Shield { 20 } else { 5 };
        assert_eq!(power_up.duration_secs, expected);
    }

    proptest! {
        #[test]
        fn prop_gap_within_double_jump_reach(
            seed in any::<u64>(),
            speed in 0.5f32..=3.0,
            last_x in 0.0f32..10_000.0,
            last_y in MIN_PLATFORM_Y..=MAX_PLATFORM_Y,
        ) {
            let mut rng = Pcg32::seed_from_u64(seed);
            let p = generate_platform(&mut rng, 1, last_x, Some(last_y), speed, &Tuning::default());
            let gap = p.pos.x - last_x;
            let (lo, hi) = gap_bounds(speed);
            prop_assert!(gap >= lo - 0.01 && gap <= hi + 0.01);
            prop_assert!(gap <= max_jump_travel(speed));
        }

        #[test]
        fn prop_platform_shape_in_range(seed in any::<u64>(), last_y in 0.0f32..GAME_HEIGHT) {
            let mut rng = Pcg32::seed_from_u64(seed);
            let p = generate_platform(&mut rng, 1, 0.0, Some(last_y), 1.0, &Tuning::default());
            prop_assert!((MIN_PLATFORM_WIDTH..=MAX_PLATFORM_WIDTH).contains(&p.width));
            prop_assert!((MIN_PLATFORM_Y..=MAX_PLATFORM_Y).contains(&p.pos.y));
        }
    }
}
