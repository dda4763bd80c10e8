//! Key-value stores backing the persisted snapshot

use std::{
    collections::BTreeMap,
    fs::{self, File},
    io::{self, Write},
    path::{Path, PathBuf},
    sync::Mutex,
};
use thiserror::Error;
use tracing::{debug, info, warn};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("state file I/O failed: {0}")]
    Io(#[from] io::Error),
    #[error("state file encoding failed: {0}")]
    Json(#[from] serde_json::Error),
    #[error("store lock poisoned")]
    Poisoned,
}

/// String keys to string values, in the manner of browser local storage
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> Option<String>;

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError>;

    /// Write several entries. Stores with expensive writes should override
    /// this to commit once.
    fn set_many(&self, entries: &[(&str, String)]) -> Result<(), StoreError> {
        for (key, value) in entries {
            self.set(key, value)?;
        }
        Ok(())
    }

    /// Short description for status output
    fn describe(&self) -> String;
}

/// Volatile store, lost when the process exits
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<BTreeMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a store with existing entries
    pub fn with_entries<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            entries: Mutex::new(
                entries
                    .into_iter()
                    .map(|(k, v)| (k.into(), v.into()))
                    .collect(),
            ),
        }
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.lock().ok()?.get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let mut entries = self.entries.lock().map_err(|_| StoreError::Poisoned)?;
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn describe(&self) -> String {
        "memory".to_string()
    }
}

/// JSON object on disk, cached in memory and rewritten on every commit
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    entries: Mutex<BTreeMap<String, String>>,
}

impl FileStore {
    /// Open the store at `path`. A missing file starts empty; an unreadable or
    /// corrupt one is logged and treated as empty.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let entries = match Self::read_entries(&path) {
            Ok(Some(entries)) => {
                info!("Loaded {} stored entries from {}", entries.len(), path.display());
                entries
            }
            Ok(None) => {
                info!("No state file at {}, starting fresh", path.display());
                BTreeMap::new()
            }
            Err(e) => {
                warn!("Ignoring unreadable state file {}: {}", path.display(), e);
                BTreeMap::new()
            }
        };

        Self {
            path,
            entries: Mutex::new(entries),
        }
    }

    fn read_entries(path: &Path) -> Result<Option<BTreeMap<String, String>>, StoreError> {
        let raw = match fs::read_to_string(path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        // Non-string values are dropped so a hand-edited file still loads
        let value: serde_json::Value = serde_json::from_str(&raw)?;
        let entries = match value {
            serde_json::Value::Object(map) => map
                .into_iter()
                .filter_map(|(k, v)| match v {
                    serde_json::Value::String(s) => Some((k, s)),
                    _ => None,
                })
                .collect(),
            _ => BTreeMap::new(),
        };
        Ok(Some(entries))
    }

    /// Write through a temporary file so a crash never leaves half a snapshot
    fn commit(&self, entries: &BTreeMap<String, String>) -> Result<(), StoreError> {
        let encoded = serde_json::to_string_pretty(entries)?;
        let tmp = self.path.with_extension("tmp");

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        let mut file = File::create(&tmp)?;
        file.write_all(encoded.as_bytes())?;
        file.sync_all()?;
        drop(file);
        fs::rename(&tmp, &self.path)?;

        debug!("Committed {} entries to {}", entries.len(), self.path.display());
        Ok(())
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.lock().ok()?.get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let mut entries = self.entries.lock().map_err(|_| StoreError::Poisoned)?;
        entries.insert(key.to_string(), value.to_string());
        self.commit(&entries)
    }

    fn set_many(&self, new_entries: &[(&str, String)]) -> Result<(), StoreError> {
        let mut entries = self.entries.lock().map_err(|_| StoreError::Poisoned)?;
        for (key, value) in new_entries {
            entries.insert((*key).to_string(), value.clone());
        }
        self.commit(&entries)
    }

    fn describe(&self) -> String {
        format!("file:{}", self.path.display())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_store_overwrites() {
        let store = MemoryStore::new();
        assert_eq!(store.get("seconds"), None);

        store.set("seconds", "1").unwrap();
        store.set("seconds", "2").unwrap();
        assert_eq!(store.get("seconds").as_deref(), Some("2"));
    }

    #[test]
    fn file_store_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("state.json");

        let store = FileStore::open(&path);
        store
            .set_many(&[("seconds", "5".to_string()), ("button", "Pause".to_string())])
            .unwrap();
        drop(store);

        let reopened = FileStore::open(&path);
        assert_eq!(reopened.get("seconds").as_deref(), Some("5"));
        assert_eq!(reopened.get("button").as_deref(), Some("Pause"));
        assert!(!path.with_extension("tmp").exists());
    }

    #[test]
    fn corrupt_file_opens_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("state.json");
        fs::write(&path, "{not json").unwrap();

        let store = FileStore::open(&path);
        assert_eq!(store.get("seconds"), None);

        // The next commit replaces the corrupt file
        store.set("seconds", "3").unwrap();
        assert_eq!(FileStore::open(&path).get("seconds").as_deref(), Some("3"));
    }

    #[test]
    fn leftover_temp_file_is_replaced_on_commit() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("state.json");
        fs::write(path.with_extension("tmp"), "{\"seconds\": \"5").unwrap();

        let store = FileStore::open(&path);
        store.set("seconds", "7").unwrap();

        assert!(!path.with_extension("tmp").exists());
        assert_eq!(FileStore::open(&path).get("seconds").as_deref(), Some("7"));
    }

    #[test]
    fn non_string_values_are_dropped() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("state.json");
        fs::write(&path, r#"{"seconds": 5, "minutes": "2"}"#).unwrap();

        let store = FileStore::open(&path);
        assert_eq!(store.get("seconds"), None);
        assert_eq!(store.get("minutes").as_deref(), Some("2"));
    }

    #[test]
    fn creates_missing_parent_directories() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested/dir/state.json");

        let store = FileStore::open(&path);
        store.set("hours", "1").unwrap();
        assert!(path.exists());
    }
}
