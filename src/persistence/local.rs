//! Browser LocalStorage backend

use super::KeyValueStore;
use crate::error::{StoreError, StoreResult};

/// Keys are namespaced with a prefix so several games can share an origin
pub struct LocalStorageStore {
    storage: web_sys::Storage,
    prefix: String,
}

impl LocalStorageStore {
    pub fn open(prefix: &str) -> StoreResult<Self> {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten()
            .ok_or(StoreError::Unavailable)?;
        Ok(Self {
            storage,
            prefix: prefix.to_owned(),
        })
    }

    fn full_key(&self, key: &str) -> String {
        format!("{}{}", self.prefix, key)
    }
}

impl KeyValueStore for LocalStorageStore {
    fn get(&self, key: &str) -> Option<String> {
        self.storage.get_item(&self.full_key(key)).ok().flatten()
    }

    fn set(&mut self, key: &str, value: &str) -> StoreResult<()> {
        self.storage
            .set_item(&self.full_key(key), value)
            .map_err(|_| StoreError::Unavailable)
    }
}
