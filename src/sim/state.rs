//! Game state and core simulation types
//!
//! Everything a run needs to advance deterministically lives here.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::collision::Aabb;
use super::effects::ActiveEffects;
use super::schedule::Schedule;
use crate::consts::*;
use crate::speed_for_score;

/// Session lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GamePhase {
    /// Menu; no run in progress
    #[default]
    NotStarted,
    /// Tick loop is live
    Running,
    /// Player fell out; simulation suspended until revive or skip
    GameOverPending,
}

/// The player's runner
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    /// Top-left corner
    pub pos: Vec2,
    pub vel: Vec2,
    /// Jumps used since the last landing
    pub jump_count: u8,
    /// Airborne after a jump (a walk-off does not set this)
    pub is_jumping: bool,
    /// Degrees in [0, 360)
    pub rotation: f32,
    pub effects: ActiveEffects,
}

impl Player {
    pub fn new(pos: Vec2) -> Self {
        Self {
            pos,
            vel: Vec2::ZERO,
            jump_count: 0,
            is_jumping: false,
            rotation: 0.0,
            effects: ActiveEffects::default(),
        }
    }

    pub fn bounds(&self) -> Aabb {
        Aabb::from_size(self.pos, Vec2::splat(PLAYER_SIZE))
    }

    pub fn bottom(&self) -> f32 {
        self.pos.y + PLAYER_SIZE
    }

    /// Put the player at rest on a surface at height `surface_y`
    pub fn stand_on(&mut self, surface_y: f32) {
        self.pos.y = surface_y - PLAYER_SIZE;
        self.vel.y = 0.0;
        self.is_jumping = false;
        self.jump_count = 0;
    }
}

/// Platform behavior
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum PlatformKind {
    Normal,
    /// Oscillates horizontally around `start_x`
    Moving {
        direction: f32,
        start_x: f32,
        move_distance: f32,
    },
    /// Vanishes shortly after being landed on
    Disappearing {
        visible: bool,
        /// A vanish is already scheduled
        crumbling: bool,
    },
}

/// Horizontal speed of moving platforms (pixels per tick)
pub const MOVING_PLATFORM_SPEED: f32 = 1.0;

/// A platform (axis-aligned slab of fixed height)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Platform {
    pub id: u32,
    /// Top-left corner
    pub pos: Vec2,
    pub width: f32,
    pub kind: PlatformKind,
}

impl Platform {
    pub fn new(id: u32, pos: Vec2, width: f32, kind: PlatformKind) -> Self {
        Self { id, pos, width, kind }
    }

    pub fn right(&self) -> f32 {
        self.pos.x + self.width
    }

    /// Right edge at the spawn position; moving platforms report their track
    /// center so drift never widens the next gap
    pub fn anchor_right(&self) -> f32 {
        match self.kind {
            PlatformKind::Moving { start_x, .. } => start_x + self.width,
            _ => self.right(),
        }
    }

    /// Whether the platform takes part in landing tests
    pub fn is_solid(&self) -> bool {
        !matches!(self.kind, PlatformKind::Disappearing { visible: false, .. })
    }

    /// Advance platform behavior by one tick
    pub fn advance(&mut self, time_scale: f32) {
        if let PlatformKind::Moving {
            ref mut direction,
            start_x,
            move_distance,
        } = self.kind
        {
            let new_x = self.pos.x + *direction * MOVING_PLATFORM_SPEED * time_scale;
            // Reverse at the ends of the track instead of overshooting
            if new_x < start_x - move_distance || new_x > start_x + move_distance {
                *direction = -*direction;
            } else {
                self.pos.x = new_x;
            }
        }
    }

    /// Mark a disappearing platform as crumbling. Returns true the first time.
    pub fn start_crumbling(&mut self) -> bool {
        match self.kind {
            PlatformKind::Disappearing {
                visible: true,
                ref mut crumbling,
            } if !*crumbling => {
                *crumbling = true;
                true
            }
            _ => false,
        }
    }

    pub fn vanish(&mut self) {
        if let PlatformKind::Disappearing { ref mut visible, .. } = self.kind {
            *visible = false;
        }
    }
}

/// A coin
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Coin {
    pub pos: Vec2,
    pub collected: bool,
    pub value: u32,
}

impl Coin {
    pub fn new(pos: Vec2) -> Self {
        Self {
            pos,
            collected: false,
            value: 1,
        }
    }

    pub fn bounds(&self) -> Aabb {
        Aabb::from_size(self.pos, Vec2::splat(COIN_SIZE))
    }
}

/// Power-up types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PowerUpKind {
    JumpBoost,
    SlowMotion,
    Shield,
}

impl PowerUpKind {
    pub const ALL: [PowerUpKind; 3] = [
        PowerUpKind::JumpBoost,
        PowerUpKind::SlowMotion,
        PowerUpKind::Shield,
    ];
}

/// A power-up pickup
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PowerUp {
    pub pos: Vec2,
    pub kind: PowerUpKind,
    pub collected: bool,
    /// Effect length in seconds; converted to ticks on pickup
    pub duration_secs: u32,
}

impl PowerUp {
    pub fn bounds(&self) -> Aabb {
        Aabb::from_size(self.pos, Vec2::splat(POWERUP_SIZE))
    }
}

/// Things that happened during a tick (or an input), for the session to act on
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    /// A jump was performed
    Jumped { jump_count: u8 },
    /// Landed after a jump; `perfect` landings grow the combo
    Landed { perfect: bool, combo: u32 },
    CoinCollected { value: u32 },
    PowerUpCollected { kind: PowerUpKind },
    /// Shield saved the player from a fall
    ShieldConsumed,
    PlatformVanished { id: u32 },
    /// Perfect-landing flash ended
    ComboFlashEnded,
    /// Player fell out with no shield
    GameOver { score: u64 },
}

/// Complete run state (deterministic)
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub rng: Pcg32,
    pub phase: GamePhase,
    /// Ticks simulated this run
    pub time_ticks: u64,
    pub score: u64,
    /// Consecutive perfect landings
    pub combo: u32,
    pub max_combo: u32,
    /// Coin value collected this run
    pub run_coins: u64,
    /// Left edge of the visible window in world space
    pub camera_offset: f32,
    /// Speed multiplier used by the most recent tick
    pub game_speed: f32,
    /// Speed handed back by revives, subtracted from the score curve
    pub speed_relief: f32,
    /// Perfect-landing flash is showing
    pub combo_flash: bool,
    /// Identifies the flash that a pending clear belongs to
    pub combo_flash_token: u64,
    pub player: Player,
    /// Ascending by x; the last entry is the generation frontier
    pub platforms: Vec<Platform>,
    pub coins: Vec<Coin>,
    pub power_ups: Vec<PowerUp>,
    /// Delayed actions (vanishing platforms, flash expiry)
    pub schedule: Schedule,
    /// Events since the last drain
    events: Vec<GameEvent>,
    next_id: u32,
}

impl GameState {
    /// Create an idle state with the given seed (no run in progress)
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            phase: GamePhase::NotStarted,
            time_ticks: 0,
            score: 0,
            combo: 0,
            max_combo: 0,
            run_coins: 0,
            camera_offset: 0.0,
            game_speed: 1.0,
            speed_relief: 0.0,
            combo_flash: false,
            combo_flash_token: 0,
            player: Player::new(Vec2::new(PLAYER_START_X, GAME_HEIGHT - 100.0)),
            platforms: Vec::new(),
            coins: Vec::new(),
            power_ups: Vec::new(),
            schedule: Schedule::default(),
            events: Vec::new(),
            next_id: 1,
        }
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    pub fn push_event(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Take all events recorded since the last drain
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// 0.5 under slow motion, otherwise 1.0
    pub fn time_scale(&self) -> f32 {
        if self.player.effects.slow_motion > 0 {
            SLOW_MOTION_SCALE
        } else {
            1.0
        }
    }

    /// Speed multiplier derived from score, less any revive relief
    pub fn derived_game_speed(&self) -> f32 {
        (speed_for_score(self.score) - self.speed_relief).max(1.0)
    }

    /// Rightmost platform, the anchor for generation
    pub fn frontier(&self) -> Option<&Platform> {
        self.platforms.last()
    }

    /// Insert a platform keeping ascending x order without moving existing ones
    pub fn insert_platform(&mut self, platform: Platform) {
        let idx = self
            .platforms
            .partition_point(|p| p.pos.x <= platform.pos.x);
        self.platforms.insert(idx, platform);
    }

    pub fn is_running(&self) -> bool {
        self.phase == GamePhase::Running
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn moving(start_x: f32, direction: f32) -> Platform {
        Platform::new(
            1,
            Vec2::new(start_x, 300.0),
            100.0,
            PlatformKind::Moving {
                direction,
                start_x,
                move_distance: 2.0,
            },
        )
    }

    #[test]
    fn test_moving_platform_reverses_at_track_end() {
        let mut p = moving(100.0, 1.0);
        p.advance(1.0);
        p.advance(1.0);
        assert_eq!(p.pos.x, 102.0);
        // Next step would overshoot: direction flips, position holds
        p.advance(1.0);
        assert_eq!(p.pos.x, 102.0);
        assert!(matches!(p.kind, PlatformKind::Moving { direction, .. } if direction < 0.0));
        p.advance(1.0);
        assert_eq!(p.pos.x, 101.0);
    }

    #[test]
    fn test_slow_motion_halves_platform_speed() {
        let mut p = moving(100.0, -1.0);
        p.advance(0.5);
        assert_eq!(p.pos.x, 99.5);
    }

    #[test]
    fn test_anchor_right_ignores_drift() {
        let mut moving = Platform::new(
            1,
            Vec2::new(200.0, 300.0),
            90.0,
            PlatformKind::Moving {
                direction: -1.0,
                start_x: 200.0,
                move_distance: 50.0,
            },
        );
        for _ in 0..30 {
            moving.advance(1.0);
        }
        assert_eq!(moving.right(), 260.0);
        assert_eq!(moving.anchor_right(), 290.0);
        let normal = Platform::new(2, Vec2::new(10.0, 300.0), 90.0, PlatformKind::Normal);
        assert_eq!(normal.anchor_right(), normal.right());
    }

    #[test]
    fn test_crumbling_only_once() {
        let mut p = Platform::new(
            7,
            Vec2::new(0.0, 0.0),
            90.0,
            PlatformKind::Disappearing {
                visible: true,
                crumbling: false,
            },
        );
        assert!(p.is_solid());
        assert!(p.start_crumbling());
        assert!(!p.start_crumbling());
        p.vanish();
        assert!(!p.is_solid());
        assert!(!p.start_crumbling());
    }

    #[test]
    fn test_insert_platform_keeps_order() {
        let mut state = GameState::new(1);
        for x in [0.0, 200.0, 400.0] {
            let id = state.next_entity_id();
            state
                .platforms
                .push(Platform::new(id, Vec2::new(x, 500.0), 100.0, PlatformKind::Normal));
        }
        let id = state.next_entity_id();
        state.insert_platform(Platform::new(id, Vec2::new(250.0, 450.0), 200.0, PlatformKind::Normal));
        let xs: Vec<f32> = state.platforms.iter().map(|p| p.pos.x).collect();
        assert_eq!(xs, vec![0.0, 200.0, 250.0, 400.0]);
        assert_eq!(state.frontier().map(|p| p.pos.x), Some(400.0));
    }

    #[test]
    fn test_revive_relief_never_below_base_speed() {
        let mut state = GameState::new(1);
        state.speed_relief = 0.5;
        assert_eq!(state.derived_game_speed(), 1.0);
        state.score = 5000;
        assert!((state.derived_game_speed() - 1.5).abs() < 1e-5);
    }
}
