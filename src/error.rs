//! Error types
//!
//! Rejected player actions, store failures and tuning load failures. None of
//! these are fatal to a running session.

use thiserror::Error;

use crate::challenges::ChallengeKind;

/// Failures from a key/value store backend
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("store I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("store encoding failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("browser storage unavailable")]
    Unavailable,
}

/// Failures loading a tuning file
#[derive(Error, Debug)]
pub enum TuningError {
    #[error("cannot read tuning file: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid tuning file: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Player actions the session refused. State is unchanged when one of these
/// is returned.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    #[error("not enough coins: need {needed}, have {available}")]
    NotEnoughCoins { needed: u64, available: u64 },

    #[error("skin already unlocked: {0}")]
    SkinAlreadyUnlocked(String),

    #[error("unknown skin: {0}")]
    UnknownSkin(String),

    #[error("skin not unlocked: {0}")]
    SkinLocked(String),

    #[error("no revives left")]
    NoRevivesLeft,

    #[error("no run is waiting for a revive")]
    NotAwaitingRevive,

    #[error("challenge not active: {0:?}")]
    ChallengeNotFound(ChallengeKind),

    #[error("challenge not claimable: {0:?}")]
    ChallengeNotClaimable(ChallengeKind),
}

pub type StoreResult<T> = Result<T, StoreError>;
pub type SessionResult<T> = Result<T, SessionError>;
