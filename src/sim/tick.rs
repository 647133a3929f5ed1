//! Fixed timestep simulation tick
//!
//! Core game loop that advances a run deterministically. One tick runs these
//! phases in order: speed/time scale, camera, scheduled actions, platform
//! behavior, player physics and landing, pickups, level generation and
//! cleanup, score, effect timer decay.

use super::combo::register_landing;
use super::generator::{self, extend_level, prune};
use super::physics::{self, PlayerStep, collect_pickups, integrate_player, rescue_with_shield};
use super::schedule::ScheduledAction;
use super::state::{GameEvent, GamePhase, GameState};
use crate::consts::*;
use crate::tuning::Tuning;

/// Values every phase of a tick reads, captured before anything mutates
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TickFrame {
    pub game_speed: f32,
    pub time_scale: f32,
    /// Horizontal drift this tick (pixels)
    pub scroll: f32,
}

impl TickFrame {
    pub fn capture(state: &GameState) -> Self {
        let game_speed = state.derived_game_speed();
        let time_scale = state.time_scale();
        Self {
            game_speed,
            time_scale,
            scroll: MOVE_SPEED * game_speed * time_scale,
        }
    }

    /// Speed used for gap reachability
    pub fn speed_factor(&self) -> f32 {
        self.game_speed * self.time_scale
    }
}

/// Start a fresh run on `state`: reset counters and lay out the level
pub fn start_run(state: &mut GameState, tuning: &Tuning) {
    let seed = state.seed;
    *state = GameState::new(seed);
    generator::init_level(state, tuning);
    state.phase = GamePhase::Running;
    log::info!(
        "Run started (seed {seed}, {} platforms)",
        state.platforms.len()
    );
}

/// Bring a run back from `GameOverPending` with a safe platform and a
/// slower pace
pub fn revive_run(state: &mut GameState, tuning: &Tuning) {
    state.speed_relief += tuning.revive_slowdown;
    state.game_speed = state.derived_game_speed();
    state.combo = 0;
    state.combo_flash = false;
    state.schedule.clear();
    state.coins.clear();
    state.power_ups.clear();
    state.platforms.clear();

    let safe = generator::safe_platform(state);
    let surface = safe.pos;
    state.platforms.push(safe);
    let speed = state.game_speed;
    generator::append_platforms(state, tuning, tuning.revive_platforms, speed);
    physics::place_on(state, surface);
    state.phase = GamePhase::Running;
    log::info!(
        "Revived at x={:.0}, speed {:.1}",
        surface.x,
        state.game_speed
    );
}

/// Advance the game state by one fixed timestep
pub fn tick(state: &mut GameState, tuning: &Tuning) {
    if !state.is_running() {
        return;
    }
    state.time_ticks += 1;

    // Speed and time scale
    let frame = TickFrame::capture(state);
    state.game_speed = frame.game_speed;

    // Camera
    state.camera_offset += frame.scroll;

    run_scheduled(state);

    // Platform behavior
    for platform in &mut state.platforms {
        platform.advance(frame.time_scale);
    }

    // Player physics and collision
    match integrate_player(state, frame.scroll, frame.time_scale) {
        PlayerStep::Landed { index, was_jumping } => {
            if was_jumping {
                let rotation = state.player.rotation;
                state.player.rotation = register_landing(state, tuning, rotation);
            }
            let now = state.time_ticks;
            let platform = &mut state.platforms[index];
            if platform.start_crumbling() {
                let id = platform.id;
                state.schedule.push(
                    now + tuning.disappear_delay_ticks,
                    ScheduledAction::HidePlatform { id },
                );
            }
        }
        PlayerStep::FellOut => {
            if !rescue_with_shield(state) {
                state.phase = GamePhase::GameOverPending;
                let score = state.score;
                log::info!("Game over at score {score}");
                state.push_event(GameEvent::GameOver { score });
                // Nothing else mutates once the run has stopped
                return;
            }
        }
        PlayerStep::Airborne => {}
    }

    // Coins and power-ups
    collect_pickups(state);

    // Generation and cleanup
    extend_level(state, tuning, frame.speed_factor());
    prune(state, tuning.prune_margin);

    // Score
    state.score += 1;

    // Effect timers
    state.player.effects.decay();
}

/// Fire delayed actions due this tick
fn run_scheduled(state: &mut GameState) {
    for action in state.schedule.take_due(state.time_ticks) {
        match action {
            ScheduledAction::HidePlatform { id } => {
                if let Some(platform) = state.platforms.iter_mut().find(|p| p.id == id) {
                    platform.vanish();
                    log::debug!("Platform {id} vanished");
                    state.push_event(GameEvent::PlatformVanished { id });
                }
            }
            ScheduledAction::EndComboFlash { token } => {
                if token == state.combo_flash_token && state.combo_flash {
                    state.combo_flash = false;
                    state.push_event(GameEvent::ComboFlashEnded);
                }
            }
        }
    }
}
