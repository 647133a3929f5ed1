//! Daily challenges
//!
//! A fixed catalog; each calendar day a random subset becomes active. Progress
//! only moves forward and stops moving once the reward is claimed.

use rand::Rng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};

use crate::error::{SessionError, SessionResult, StoreResult};
use crate::persistence::{KeyValueStore, get_json, keys, set_json};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChallengeKind {
    CollectCoins,
    ReachScore,
    PerfectLandings,
    PlayGames,
    Survival,
    BigJump,
    CollectPowerups,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Challenge {
    pub id: ChallengeKind,
    pub description: String,
    pub target: u64,
    pub progress: u64,
    pub completed: bool,
    #[serde(default)]
    pub claimed: bool,
    pub reward: u64,
}

impl Challenge {
    fn new(id: ChallengeKind, description: &str, target: u64, reward: u64) -> Self {
        Self {
            id,
            description: description.to_string(),
            target,
            progress: 0,
            completed: false,
            claimed: false,
            reward,
        }
    }

    pub fn is_claimable(&self) -> bool {
        self.completed && !self.claimed
    }
}

/// Every challenge that can be drawn, fresh
pub fn catalog() -> Vec<Challenge> {
    use ChallengeKind::*;
    vec![
        Challenge::new(CollectCoins, "Collect 30 coins", 30, 12),
        Challenge::new(ReachScore, "Reach 2000 points", 2000, 25),
        Challenge::new(PerfectLandings, "Get a 5x combo", 5, 18),
        Challenge::new(PlayGames, "Play 3 games today", 3, 15),
        Challenge::new(Survival, "Survive for 60 seconds", 60, 20),
        Challenge::new(BigJump, "Make 50 jumps", 50, 10),
        Challenge::new(CollectPowerups, "Collect 5 power ups", 5, 30),
    ]
}

/// How a progress report applies
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Progress {
    /// Increment by n
    Add(u64),
    /// Absolute value; never lowers progress
    Set(u64),
}

/// The active daily set plus the day it was drawn
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ChallengeBoard {
    pub active: Vec<Challenge>,
    pub last_check: Option<String>,
}

impl ChallengeBoard {
    /// Load the board and run the daily check against `today`
    pub fn load<R: Rng + ?Sized>(
        store: &impl KeyValueStore,
        rng: &mut R,
        today: &str,
        count: usize,
    ) -> Self {
        let mut board = Self {
            active: get_json(store, keys::CHALLENGES).unwrap_or_default(),
            last_check: store.get(keys::LAST_CHALLENGE_CHECK),
        };
        if !board.refresh_daily(today, rng, count) && board.active.is_empty() {
            board.draw(rng, count);
        }
        board
    }

    fn draw<R: Rng + ?Sized>(&mut self, rng: &mut R, count: usize) {
        let mut pool = catalog();
        pool.shuffle(rng);
        pool.truncate(count);
        self.active = pool;
    }

    /// Draw a new active set if `today` differs from the last check.
    /// Returns true when a reset happened.
    pub fn refresh_daily<R: Rng + ?Sized>(&mut self, today: &str, rng: &mut R, count: usize) -> bool {
        if self.last_check.as_deref() == Some(today) {
            return false;
        }
        self.draw(rng, count);
        self.last_check = Some(today.to_string());
        log::info!("Daily challenges reset for day {today}");
        true
    }

    pub fn get(&self, kind: ChallengeKind) -> Option<&Challenge> {
        self.active.iter().find(|c| c.id == kind)
    }

    /// Apply progress to the active challenge of `kind`, if any.
    /// Returns true if anything changed.
    pub fn update(&mut self, kind: ChallengeKind, progress: Progress) -> bool {
        let Some(challenge) = self.active.iter_mut().find(|c| c.id == kind) else {
            return false;
        };
        if challenge.claimed {
            return false;
        }
        let next = match progress {
            Progress::Add(n) => challenge.progress.saturating_add(n),
            Progress::Set(v) => challenge.progress.max(v),
        };
        if next == challenge.progress {
            return false;
        }
        challenge.progress = next;
        if !challenge.completed && next >= challenge.target {
            challenge.completed = true;
            log::info!("Challenge complete: {}", challenge.description);
        }
        true
    }

    /// Claim a completed challenge, returning the coins earned
    pub fn claim(&mut self, kind: ChallengeKind, multiplier: u64) -> SessionResult<u64> {
        let challenge = self
            .active
            .iter_mut()
            .find(|c| c.id == kind)
            .ok_or(SessionError::ChallengeNotFound(kind))?;
        if !challenge.is_claimable() {
            return Err(SessionError::ChallengeNotClaimable(kind));
        }
        challenge.claimed = true;
        Ok(challenge.reward * multiplier)
    }

    pub fn save(&self, store: &mut impl KeyValueStore) -> StoreResult<()> {
        set_json(store, keys::CHALLENGES, &self.active)?;
        if let Some(day) = &self.last_check {
            store.set(keys::LAST_CHALLENGE_CHECK, day)?;
        }
        Ok(())
    }
}
