//! Player progress that outlives a run
//!
//! High score, coin balance, revive stock and skins. Loaded from the key/value
//! store with safe defaults; any missing or corrupt key falls back on its own.

use serde::Serialize;

use crate::error::StoreResult;
use crate::persistence::{KeyValueStore, get_json, keys, set_json};

/// Skin every profile starts with
pub const DEFAULT_SKIN: &str = "pink";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Profile {
    pub high_score: u64,
    pub total_coins: u64,
    pub revives: u32,
    pub selected_skin: String,
    pub unlocked_skins: Vec<String>,
}

impl Default for Profile {
    fn default() -> Self {
        Self {
            high_score: 0,
            total_coins: 0,
            revives: 0,
            selected_skin: DEFAULT_SKIN.to_string(),
            unlocked_skins: vec![DEFAULT_SKIN.to_string()],
        }
    }
}

impl Profile {
    /// Load from the store, key by key
    pub fn load(store: &impl KeyValueStore) -> Self {
        let defaults = Self::default();

        let mut unlocked_skins: Vec<String> =
            get_json(store, keys::UNLOCKED_SKINS).unwrap_or(defaults.unlocked_skins);
        if !unlocked_skins.iter().any(|s| s == DEFAULT_SKIN) {
            unlocked_skins.insert(0, DEFAULT_SKIN.to_string());
        }

        // Stored raw, not as a JSON string
        let selected_skin = store
            .get(keys::SELECTED_SKIN)
            .filter(|skin| unlocked_skins.contains(skin))
            .unwrap_or(defaults.selected_skin);

        let profile = Self {
            high_score: get_json(store, keys::HIGH_SCORE).unwrap_or(defaults.high_score),
            total_coins: get_json(store, keys::TOTAL_COINS).unwrap_or(defaults.total_coins),
            revives: get_json(store, keys::REVIVES).unwrap_or(defaults.revives),
            selected_skin,
            unlocked_skins,
        };
        log::info!(
            "Loaded profile: high score {}, {} coins, {} revives",
            profile.high_score,
            profile.total_coins,
            profile.revives
        );
        profile
    }

    /// Write every field back
    pub fn save(&self, store: &mut impl KeyValueStore) -> StoreResult<()> {
        set_json(store, keys::HIGH_SCORE, &self.high_score)?;
        set_json(store, keys::TOTAL_COINS, &self.total_coins)?;
        set_json(store, keys::REVIVES, &self.revives)?;
        store.set(keys::SELECTED_SKIN, &self.selected_skin)?;
        set_json(store, keys::UNLOCKED_SKINS, &self.unlocked_skins)
    }

    /// Commit a finished run's score. Returns true on a new high score.
    pub fn record_score(&mut self, score: u64) -> bool {
        if score > self.high_score {
            self.high_score = score;
            true
        } else {
            false
        }
    }

    pub fn is_unlocked(&self, skin: &str) -> bool {
        self.unlocked_skins.iter().any(|s| s == skin)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::MemoryStore;

    #[test]
    fn test_empty_store_gives_defaults() {
        let store = MemoryStore::new();
        assert_eq!(Profile::load(&store), Profile::default());
    }

    #[test]
    fn test_save_then_load() {
        let mut store = MemoryStore::new();
        let profile = Profile {
            high_score: 4321,
            total_coins: 77,
            revives: 2,
            selected_skin: "blue".to_string(),
            unlocked_skins: vec!["pink".to_string(), "blue".to_string()],
        };
        profile.save(&mut store).unwrap();
        assert_eq!(store.get(keys::SELECTED_SKIN).as_deref(), Some("blue"));
        assert_eq!(store.get(keys::TOTAL_COINS).as_deref(), Some("77"));
        assert_eq!(Profile::load(&store), profile);
    }

    #[test]
    fn test_corrupt_fields_fall_back_individually() {
        let mut store = MemoryStore::new();
        store.set(keys::HIGH_SCORE, "900").unwrap();
        store.set(keys::TOTAL_COINS, "lots").unwrap();
        store.set(keys::UNLOCKED_SKINS, "[\"green\"").unwrap();
        store.set(keys::SELECTED_SKIN, "green").unwrap();

        let profile = Profile::load(&store);
        assert_eq!(profile.high_score, 900);
        assert_eq!(profile.total_coins, 0);
        assert_eq!(profile.unlocked_skins, vec!["pink".to_string()]);
        // Not unlocked, so not selectable
        assert_eq!(profile.selected_skin, "pink");
    }

    #[test]
    fn test_record_score() {
        let mut profile = Profile::default();
        assert!(profile.record_score(10));
        assert!(!profile.record_score(10));
        assert!(!profile.record_score(3));
        assert_eq!(profile.high_score, 10);
    }
}
