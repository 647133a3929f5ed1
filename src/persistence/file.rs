//! File-backed store (native)
//!
//! The whole map is one JSON object. Every `set` rewrites it through a
//! temporary file and a rename so a crash mid-write keeps the previous save.

use std::collections::BTreeMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use super::KeyValueStore;
use crate::error::StoreResult;

#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    entries: BTreeMap<String, String>,
}

impl FileStore {
    /// Open (or lazily create) the store at `path`.
    ///
    /// A missing file is an empty store. A corrupt file is logged and treated
    /// as empty; it is replaced on the next write.
    pub fn open(path: impl AsRef<Path>) -> StoreResult<Self> {
        let path = path.as_ref().to_path_buf();
        let entries = match fs::read_to_string(&path) {
            Ok(text) => serde_json::from_str(&text).unwrap_or_else(|e| {
                log::warn!("Corrupt store at {}: {e}; starting fresh", path.display());
                BTreeMap::new()
            }),
            Err(e) if e.kind() == ErrorKind::NotFound => BTreeMap::new(),
            Err(e) => return Err(e.into()),
        };
        log::info!("Opened store {} ({} keys)", path.display(), entries.len());
        Ok(Self { path, entries })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn flush(&self) -> StoreResult<()> {
        if let Some(dir) = self.path.parent().filter(|d| !d.as_os_str().is_empty()) {
            fs::create_dir_all(dir)?;
        }
        let json = serde_json::to_string_pretty(&self.entries)?;
        let tmp = self.path.with_extension("tmp");
        fs::write(&tmp, json)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> StoreResult<()> {
        if self.entries.get(key).map(String::as_str) == Some(value) {
            return Ok(());
        }
        self.entries.insert(key.to_owned(), value.to_owned());
        self.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::keys;

    #[test]
    fn test_reopen_sees_writes() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("save").join("progress.json");

        let mut store = FileStore::open(&path).unwrap();
        assert_eq!(store.path(), path.as_path());
        assert!(store.get(keys::TOTAL_COINS).is_none());
        store.set(keys::TOTAL_COINS, "42").unwrap();
        store.set(keys::SELECTED_SKIN, "\"blue\"").unwrap();

        let reopened = FileStore::open(&path).unwrap();
        assert_eq!(reopened.get(keys::TOTAL_COINS).as_deref(), Some("42"));
        assert_eq!(reopened.get(keys::SELECTED_SKIN).as_deref(), Some("\"blue\""));
        assert!(!path.with_extension("tmp").exists());
    }

    #[test]
    fn test_corrupt_file_starts_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("progress.json");
        fs::write(&path, "][").unwrap();

        let mut store = FileStore::open(&path).unwrap();
        assert!(store.get(keys::HIGH_SCORE).is_none());
        store.set(keys::HIGH_SCORE, "7").unwrap();
        let reopened = FileStore::open(&path).unwrap();
        assert_eq!(reopened.get(keys::HIGH_SCORE).as_deref(), Some("7"));
    }
}
