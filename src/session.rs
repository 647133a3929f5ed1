//! Session controller
//!
//! Owns one run of the simulation plus everything that outlives it (profile,
//! daily challenges, the store). Player inputs arrive as method calls; after
//! every batch of changes the persisted fields are written back.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::Serialize;

use crate::challenges::{Challenge, ChallengeBoard, ChallengeKind, Progress};
use crate::consts::TICK_RATE;
use crate::error::{SessionError, SessionResult};
use crate::persistence::KeyValueStore;
use crate::profile::Profile;
use crate::shop;
use crate::sim::{
    self, Coin, FixedStep, GameEvent, GamePhase, GameState, Platform, Player, PowerUp,
};
use crate::tuning::Tuning;

/// Rewards granted by an external flow (ads, promotions) after it finishes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reward {
    /// Revive the pending run without spending a held revive
    Revive,
    /// Claim a completed challenge at twice its reward
    DoubleChallengeReward(ChallengeKind),
    Coins(u64),
}

/// Read-only view of everything a front end draws
#[derive(Debug, Clone, Serialize)]
pub struct Snapshot {
    pub phase: GamePhase,
    pub score: u64,
    pub high_score: u64,
    pub combo: u32,
    pub max_combo: u32,
    pub combo_flash: bool,
    pub run_coins: u64,
    pub total_coins: u64,
    pub revives: u32,
    pub game_speed: f32,
    pub camera_offset: f32,
    pub player: Player,
    pub platforms: Vec<Platform>,
    pub coins: Vec<Coin>,
    pub power_ups: Vec<PowerUp>,
    pub challenges: Vec<Challenge>,
    pub selected_skin: String,
    pub unlocked_skins: Vec<String>,
}

pub struct Session<S: KeyValueStore> {
    state: GameState,
    tuning: Tuning,
    profile: Profile,
    board: ChallengeBoard,
    store: S,
    clock: FixedStep,
    /// Seeds each run; also drives the daily challenge draw
    rng: Pcg32,
}

impl<S: KeyValueStore> Session<S> {
    /// Load progress from `store` and run the daily challenge check for `today`
    pub fn new(store: S, tuning: Tuning, seed: u64, today: &str) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        let profile = Profile::load(&store);
        let board = ChallengeBoard::load(&store, &mut rng, today, tuning.active_challenges);
        let mut session = Self {
            state: GameState::new(seed),
            tuning,
            profile,
            board,
            store,
            clock: FixedStep::default(),
            rng,
        };
        session.persist();
        session
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn phase(&self) -> GamePhase {
        self.state.phase
    }

    pub fn profile(&self) -> &Profile {
        &self.profile
    }

    pub fn challenges(&self) -> &[Challenge] {
        &self.board.active
    }

    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Begin a new run. Any run in progress is discarded.
    pub fn start_game(&mut self) {
        self.state.seed = self.rng.random();
        sim::start_run(&mut self.state, &self.tuning);
        self.clock.reset();
        self.board.update(ChallengeKind::PlayGames, Progress::Add(1));
        self.persist();
    }

    /// Request a jump and return the events it produced (empty when refused)
    pub fn jump(&mut self) -> Vec<GameEvent> {
        if sim::jump(&mut self.state) {
            self.settle()
        } else {
            Vec::new()
        }
    }

    /// Run one fixed tick and return the events it produced
    pub fn tick(&mut self) -> Vec<GameEvent> {
        let before = self.state.time_ticks;
        sim::tick(&mut self.state, &self.tuning);
        if self.state.time_ticks == before {
            return Vec::new();
        }

        let score = self.state.score;
        self.board.update(ChallengeKind::ReachScore, Progress::Set(score));
        if self.state.time_ticks % u64::from(TICK_RATE) == 0 {
            self.board.update(ChallengeKind::Survival, Progress::Add(1));
        }
        self.settle()
    }

    /// Feed a frame delta; runs as many fixed ticks as are due
    pub fn advance(&mut self, dt: f32) -> Vec<GameEvent> {
        let mut events = Vec::new();
        for _ in 0..self.clock.advance(dt) {
            if !self.state.is_running() {
                break;
            }
            events.extend(self.tick());
        }
        events
    }

    /// Spend a held revive on a run waiting in `GameOverPending`
    pub fn revive(&mut self) -> SessionResult<()> {
        self.ensure_awaiting_revive()?;
        if self.profile.revives == 0 {
            return Err(SessionError::NoRevivesLeft);
        }
        self.profile.revives -= 1;
        self.resume_run();
        Ok(())
    }

    /// Decline the revive: commit the score and return to the menu
    pub fn skip_revive(&mut self) -> SessionResult<()> {
        self.ensure_awaiting_revive()?;
        self.profile.record_score(self.state.score);
        self.state.phase = GamePhase::NotStarted;
        self.persist();
        Ok(())
    }

    pub fn select_skin(&mut self, skin: &str) -> SessionResult<()> {
        shop::select_skin(&mut self.profile, skin)?;
        self.persist();
        Ok(())
    }

    pub fn purchase_skin(&mut self, skin: &str) -> SessionResult<()> {
        shop::unlock_skin(&mut self.profile, skin, &self.tuning)?;
        self.persist();
        Ok(())
    }

    pub fn purchase_revive(&mut self) -> SessionResult<()> {
        shop::buy_revive(&mut self.profile, &self.tuning)?;
        self.persist();
        Ok(())
    }

    /// Claim a completed challenge; returns the coins credited
    pub fn claim_challenge(&mut self, kind: ChallengeKind) -> SessionResult<u64> {
        self.claim_with_multiplier(kind, 1)
    }

    pub fn grant_reward(&mut self, reward: Reward) -> SessionResult<()> {
        match reward {
            Reward::Revive => {
                self.ensure_awaiting_revive()?;
                self.resume_run();
            }
            Reward::DoubleChallengeReward(kind) => {
                self.claim_with_multiplier(kind, 2)?;
            }
            Reward::Coins(amount) => {
                self.profile.total_coins = self.profile.total_coins.saturating_add(amount);
                self.persist();
            }
        }
        Ok(())
    }

    /// Re-run the daily check (e.g. the app stayed open past midnight)
    pub fn refresh_daily(&mut self, today: &str) -> bool {
        let count = self.tuning.active_challenges;
        let reset = self.board.refresh_daily(today, &mut self.rng, count);
        if reset {
            self.persist();
        }
        reset
    }

    pub fn snapshot(&self) -> Snapshot {
        let state = &self.state;
        Snapshot {
            phase: state.phase,
            score: state.score,
            high_score: self.profile.high_score,
            combo: state.combo,
            max_combo: state.max_combo,
            combo_flash: state.combo_flash,
            run_coins: state.run_coins,
            total_coins: self.profile.total_coins,
            revives: self.profile.revives,
            game_speed: state.game_speed,
            camera_offset: state.camera_offset,
            player: state.player.clone(),
            platforms: state.platforms.clone(),
            coins: state.coins.iter().filter(|c| !c.collected).cloned().collect(),
            power_ups: state.power_ups.iter().filter(|p| !p.collected).cloned().collect(),
            challenges: self.board.active.clone(),
            selected_skin: self.profile.selected_skin.clone(),
            unlocked_skins: self.profile.unlocked_skins.clone(),
        }
    }

    fn ensure_awaiting_revive(&self) -> SessionResult<()> {
        if self.state.phase == GamePhase::GameOverPending {
            Ok(())
        } else {
            Err(SessionError::NotAwaitingRevive)
        }
    }

    fn resume_run(&mut self) {
        sim::revive_run(&mut self.state, &self.tuning);
        self.clock.reset();
        self.persist();
    }

    fn claim_with_multiplier(&mut self, kind: ChallengeKind, multiplier: u64) -> SessionResult<u64> {
        let coins = self.board.claim(kind, multiplier)?;
        self.profile.total_coins = self.profile.total_coins.saturating_add(coins);
        log::info!("Claimed {kind:?} for {coins} coins");
        self.persist();
        Ok(coins)
    }

    /// Fold pending sim events into profile and challenges, then persist
    fn settle(&mut self) -> Vec<GameEvent> {
        let events = self.state.drain_events();
        for event in &events {
            match *event {
                GameEvent::Jumped { .. } => {
                    self.board.update(ChallengeKind::BigJump, Progress::Add(1));
                }
                GameEvent::Landed { perfect: true, combo } => {
                    self.board
                        .update(ChallengeKind::PerfectLandings, Progress::Set(u64::from(combo)));
                }
                GameEvent::CoinCollected { value } => {
                    self.profile.total_coins =
                        self.profile.total_coins.saturating_add(u64::from(value));
                    self.board
                        .update(ChallengeKind::CollectCoins, Progress::Add(u64::from(value)));
                }
                GameEvent::PowerUpCollected { .. } => {
                    self.board.update(ChallengeKind::CollectPowerups, Progress::Add(1));
                }
                GameEvent::GameOver { score } => {
                    if self.profile.record_score(score) {
                        log::info!("New high score: {score}");
                    }
                }
                _ => {}
            }
        }
        self.persist();
        events
    }

    /// Store failures never stop the game
    fn persist(&mut self) {
        if let Err(e) = self.profile.save(&mut self.store) {
            log::warn!("Failed to save profile: {e}");
        }
        if let Err(e) = self.board.save(&mut self.store) {
            log::warn!("Failed to save challenges: {e}");
        }
    }
}
