//! File-backed key-value store adapter.
//!
//! Persists the whole keyspace as one JSON object on disk, rewritten on
//! every mutation. Suited to the small snapshot payloads this application
//! stores; not a general-purpose database.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::RwLock;

use tracing::warn;

use crate::ports::{KeyValueStore, StorageError};

/// Key-value storage backed by a single JSON file.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    values: RwLock<HashMap<String, String>>,
}

impl FileStore {
    /// Opens a store at the given path.
    ///
    /// A missing file yields an empty keyspace. An unreadable or malformed
    /// file is treated the same way, with a warning, so a corrupt state file
    /// never prevents startup.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let values = match fs::read_to_string(&path) {
            Ok(json) => match serde_json::from_str(&json) {
                Ok(values) => values,
                Err(err) => {
                    warn!(path = %path.display(), error = %err, "discarding malformed state file");
                    HashMap::new()
                }
            },
            Err(_) => HashMap::new(),
        };

        Self {
            path,
            values: RwLock::new(values),
        }
    }

    /// The backing file path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn flush(&self, values: &HashMap<String, String>) -> Result<(), StorageError> {
        let json = serde_json::to_string_pretty(values)
            .map_err(|e| StorageError::SerializationFailed(e.to_string()))?;

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|e| StorageError::io(e.to_string()))?;
            }
        }
        fs::write(&self.path, json).map_err(|e| StorageError::io(e.to_string()))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.values.read().unwrap().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut values = self.values.write().unwrap();
        values.insert(key.to_string(), value.to_string());
        self.flush(&values)
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        let mut values = self.values.write().unwrap();
        if values.remove(key).is_none() {
            return Ok(());
        }
        self.flush(&values)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn missing_file_opens_empty() {
        let dir = tempdir().unwrap();
        let store = FileStore::open(dir.path().join("state.json"));

        assert!(store.get("k").unwrap().is_none());
    }

    #[test]
    fn values_survive_reopen() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("state.json");

        {
            let store = FileStore::open(&path);
            store.set("raid-log-items", "[{\"id\":1}]").unwrap();
        }

        let reopened = FileStore::open(&path);
        assert_eq!(
            reopened.get("raid-log-items").unwrap().as_deref(),
            Some("[{\"id\":1}]")
        );
    }

    #[test]
    fn malformed_file_opens_empty() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("state.json");
        fs::write(&path, "{broken").unwrap();

        let store = FileStore::open(&path);
        assert!(store.get("anything").unwrap().is_none());
    }

    #[test]
    fn remove_persists_to_disk() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("state.json");

        let store = FileStore::open(&path);
        store.set("a", "1").unwrap();
        store.set("b", "2").unwrap();
        store.remove("a").unwrap();

        let reopened = FileStore::open(&path);
        assert!(reopened.get("a").unwrap().is_none());
        assert_eq!(reopened.get("b").unwrap().as_deref(), Some("2"));
    }

    #[test]
    fn parent_directories_are_created() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("deeper").join("state.json");

        let store = FileStore::open(&path);
        store.set("k", "v").unwrap();

        assert!(path.exists());
    }
}
