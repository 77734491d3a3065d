//! Named-slot JSON persistence.
//!
//! Each slot is one JSON file under `<data_dir>/state/`. Writes go through a
//! temp file and a rename so a crash mid-write never corrupts the previous
//! value.

use std::fs;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::StoreError;

pub struct SlotStore {
    dir: PathBuf,
}

impl SlotStore {
    pub fn new<P: AsRef<Path>>(data_dir: P) -> Self {
        Self {
            dir: data_dir.as_ref().join("state"),
        }
    }

    fn slot_path(&self, slot: &str) -> PathBuf {
        self.dir.join(format!("{slot}.json"))
    }

    /// Read a slot. `Ok(None)` when the file does not exist; a parse
    /// failure is an error so the caller can decide to fall back.
    pub fn load<T: DeserializeOwned>(&self, slot: &'static str) -> Result<Option<T>, StoreError> {
        let path = self.slot_path(slot);
        if !path.exists() {
            return Ok(None);
        }
        let raw = fs::read_to_string(&path).map_err(|source| StoreError::Read { slot, source })?;
        let value =
            serde_json::from_str(&raw).map_err(|source| StoreError::Parse { slot, source })?;
        Ok(Some(value))
    }

    /// Serialize and write a slot atomically.
    pub fn save<T: Serialize>(&self, slot: &'static str, value: &T) -> Result<(), StoreError> {
        fs::create_dir_all(&self.dir).map_err(|source| StoreError::Write { slot, source })?;

        let json = serde_json::to_string_pretty(value).map_err(|e| StoreError::Write {
            slot,
            source: std::io::Error::new(std::io::ErrorKind::InvalidData, e),
        })?;

        let path = self.slot_path(slot);
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, json).map_err(|source| StoreError::Write { slot, source })?;
        fs::rename(&tmp, &path).map_err(|source| StoreError::Write { slot, source })?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn missing_slot_loads_as_none() {
        let dir = TempDir::new().unwrap();
        let store = SlotStore::new(dir.path());
        let loaded: Option<Vec<String>> = store.load("backlog").unwrap();
        assert!(loaded.is_none());
    }

    #[test]
    fn save_then_load_round_trips() {
        let dir = TempDir::new().unwrap();
        let store = SlotStore::new(dir.path());
        let value = vec!["tajweed".to_string(), "fiqh of fasting".to_string()];
        store.save("backlog", &value).unwrap();
        let loaded: Option<Vec<String>> = store.load("backlog").unwrap();
        assert_eq!(loaded, Some(value));
    }

    #[test]
    fn corrupt_slot_surfaces_a_parse_error() {
        let dir = TempDir::new().unwrap();
        let store = SlotStore::new(dir.path());
        store.save("backlog", &vec!["x".to_string()]).unwrap();
        std::fs::write(dir.path().join("state/backlog.json"), "{not json").unwrap();
        let result: Result<Option<Vec<String>>, _> = store.load("backlog");
        assert!(matches!(result, Err(StoreError::Parse { .. })));
    }

    #[test]
    fn overwrite_replaces_the_previous_value() {
        let dir = TempDir::new().unwrap();
        let store = SlotStore::new(dir.path());
        store.save("language", &"English").unwrap();
        store.save("language", &"Urdu").unwrap();
        let loaded: Option<String> = store.load("language").unwrap();
        assert_eq!(loaded.as_deref(), Some("Urdu"));
    }
}
