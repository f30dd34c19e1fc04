//! JSON-file store backend

use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;
use std::sync::{Mutex, MutexGuard, PoisonError};

use super::{KeyValueStore, StorageError};

/// Durable backend: the whole key space lives in one JSON object file,
/// mirrored in memory and rewritten atomically (temp file + rename) on every
/// mutation. An unreadable or corrupt file degrades to an empty map with an
/// error log; the bytes on disk are left alone until the next write.
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    entries: Mutex<HashMap<String, String>>,
}

impl JsonFileStore {
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let entries = match fs::read_to_string(&path) {
            Ok(raw) => match serde_json::from_str(&raw) {
                Ok(map) => map,
                Err(err) => {
                    tracing::error!(path = %path.display(), error = %err, "store file is corrupt, starting empty");
                    HashMap::new()
                }
            },
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => HashMap::new(),
            Err(err) => {
                tracing::error!(path = %path.display(), error = %err, "store file is unreadable, starting empty");
                HashMap::new()
            }
        };
        Self {
            path,
            entries: Mutex::new(entries),
        }
    }

    pub fn path(&self) -> &std::path::Path {
        &self.path
    }

    fn entries(&self) -> MutexGuard<'_, HashMap<String, String>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn persist(&self, entries: &HashMap<String, String>) -> Result<(), StorageError> {
        let raw = serde_json::to_string_pretty(entries)
            .map_err(|err| StorageError::new("*", format!("unencodable store: {err}")))?;
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)
                    .map_err(|err| StorageError::new("*", format!("create {}: {err}", parent.display())))?;
            }
        }
        let tmp = self.path.with_extension("tmp");
        fs::write(&tmp, raw)
            .map_err(|err| StorageError::new("*", format!("write {}: {err}", tmp.display())))?;
        fs::rename(&tmp, &self.path)
            .map_err(|err| StorageError::new("*", format!("rename into {}: {err}", self.path.display())))
    }
}

impl KeyValueStore for JsonFileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.entries().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut entries = self.entries();
        let previous = entries.insert(key.to_string(), value.to_string());
        if let Err(err) = self.persist(&entries) {
            // Roll back so a later unrelated write cannot resurrect this value.
            match previous {
                Some(old) => entries.insert(key.to_string(), old),
                None => entries.remove(key),
            };
            return Err(StorageError::new(key, err.reason));
        }
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        let mut entries = self.entries();
        let previous = entries.remove(key);
        if let Err(err) = self.persist(&entries) {
            if let Some(old) = previous {
                entries.insert(key.to_string(), old);
            }
            return Err(StorageError::new(key, err.reason));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("store.json");
        {
            let store = JsonFileStore::open(&path);
            store.set("theme", "\"dark\"").unwrap();
            store.set("orders", "[]").unwrap();
        }
        let store = JsonFileStore::open(&path);
        assert_eq!(store.get("theme").unwrap(), Some("\"dark\"".to_string()));
        assert_eq!(store.get("orders").unwrap(), Some("[]".to_string()));
    }

    #[test]
    fn test_corrupt_file_degrades_to_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("store.json");
        fs::write(&path, "{{{{").unwrap();
        let store = JsonFileStore::open(&path);
        assert_eq!(store.get("anything").unwrap(), None);
        // The corrupt bytes stay put until the first successful write.
        assert_eq!(fs::read_to_string(&path).unwrap(), "{{{{");
        store.set("k", "\"v\"").unwrap();
        let reopened = JsonFileStore::open(&path);
        assert_eq!(reopened.get("k").unwrap(), Some("\"v\"".to_string()));
    }

    #[test]
    fn test_remove_persists() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("store.json");
        let store = JsonFileStore::open(&path);
        store.set("k", "1").unwrap();
        store.remove("k").unwrap();
        let reopened = JsonFileStore::open(&path);
        assert_eq!(reopened.get("k").unwrap(), None);
    }

    #[test]
    fn test_creates_parent_directories() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("deep").join("store.json");
        let store = JsonFileStore::open(&path);
        store.set("k", "1").unwrap();
        assert!(path.exists());
    }
}
