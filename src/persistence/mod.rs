//! Progress persistence
//!
//! The core only ever sees a string key/value store. Backends:
//! - `MemoryStore`: tests and embedding
//! - `FileStore`: native, one JSON object on disk
//! - `LocalStorageStore`: browser LocalStorage (wasm32 only)

mod file;
#[cfg(target_arch = "wasm32")]
mod local;

use std::collections::HashMap;

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::error::StoreResult;

pub use file::FileStore;
#[cfg(target_arch = "wasm32")]
pub use local::LocalStorageStore;

/// Storage keys
pub mod keys {
    pub const HIGH_SCORE: &str = "highScore";
    pub const TOTAL_COINS: &str = "totalCoins";
    pub const REVIVES: &str = "revives";
    pub const SELECTED_SKIN: &str = "selectedSkin";
    pub const UNLOCKED_SKINS: &str = "unlockedSkins";
    pub const CHALLENGES: &str = "challenges";
    pub const LAST_CHALLENGE_CHECK: &str = "lastChallengeCheck";
}

/// String key/value store the session reads at startup and writes after
/// every change
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: &str) -> StoreResult<()>;
}

/// Read and decode a JSON value. Missing keys and undecodable values both
/// come back as `None`; the latter is logged.
pub fn get_json<T: DeserializeOwned>(store: &impl KeyValueStore, key: &str) -> Option<T> {
    let raw = store.get(key)?;
    match serde_json::from_str(&raw) {
        Ok(value) => Some(value),
        Err(e) => {
            log::warn!("Ignoring corrupt value for {key}: {e}");
            None
        }
    }
}

/// Encode a value as JSON and store it
pub fn set_json<T: Serialize + ?Sized>(
    store: &mut impl KeyValueStore,
    key: &str,
    value: &T,
) -> StoreResult<()> {
    let json = serde_json::to_string(value)?;
    store.set(key, &json)
}

/// In-memory store
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> StoreResult<()> {
        self.entries.insert(key.to_owned(), value.to_owned());
        Ok(())
    }
}
