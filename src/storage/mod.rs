//! Key-value persistence contract
//!
//! All durable state (catalog, accounts, orders, notification queues, theme)
//! and the session identity pointers go through [`KeyValueStore`]: JSON text
//! blobs under fixed keys. Two scopes exist at runtime, a durable store that
//! survives restarts and a session store cleared with the browsing session,
//! but both speak the same contract, so backends are interchangeable.

use serde::de::DeserializeOwned;
use serde::Serialize;
use thiserror::Error;

pub mod keys;

mod file;
mod memory;

pub use file::JsonFileStore;
pub use memory::MemoryStore;

/// A failed read, write or decode against a store.
///
/// Carries the key and a human-readable reason; callers convert it to a
/// user-facing token or fall back to a default, never propagate it as a panic.
#[derive(Debug, Clone, Error)]
#[error("storage access failed for `{key}`: {reason}")]
pub struct StorageError {
    pub key: String,
    pub reason: String,
}

impl StorageError {
    pub fn new(key: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            reason: reason.into(),
        }
    }
}

/// Minimal key-value contract: `get`/`set`/`remove` over JSON text.
///
/// Any call may fail (quota, serialization, disabled backend). Implementations
/// must leave the previously stored value intact when a write fails.
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;
    fn remove(&self, key: &str) -> Result<(), StorageError>;
}

/// Shared handles count as stores, so one backend can serve several owners.
impl<T: KeyValueStore + ?Sized> KeyValueStore for std::sync::Arc<T> {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        (**self).set(key, value)
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        (**self).remove(key)
    }
}

/// Reads and decodes the value under `key`, `None` when absent.
pub fn read_json<T: DeserializeOwned>(
    store: &dyn KeyValueStore,
    key: &str,
) -> Result<Option<T>, StorageError> {
    match store.get(key)? {
        None => Ok(None),
        Some(raw) => serde_json::from_str(&raw)
            .map(Some)
            .map_err(|err| StorageError::new(key, format!("malformed value: {err}"))),
    }
}

/// Encodes `value` and writes it under `key`.
pub fn write_json<T: Serialize + ?Sized>(
    store: &dyn KeyValueStore,
    key: &str,
    value: &T,
) -> Result<(), StorageError> {
    let raw = serde_json::to_string(value)
        .map_err(|err| StorageError::new(key, format!("unencodable value: {err}")))?;
    store.set(key, &raw)
}

/// Read policy for state loading: a failed or malformed read logs and yields
/// the default instead of surfacing an error to the caller.
pub fn read_or_default<T: DeserializeOwned + Default>(store: &dyn KeyValueStore, key: &str) -> T {
    match read_json(store, key) {
        Ok(Some(value)) => value,
        Ok(None) => T::default(),
        Err(err) => {
            tracing::error!(key, error = %err, "storage read failed, falling back to default");
            T::default()
        }
    }
}

/// Test double that rejects writes to selected keys while delegating
/// everything else to an in-memory map.
#[cfg(test)]
pub(crate) struct FailingStore {
    inner: MemoryStore,
    broken_keys: Vec<String>,
}

#[cfg(test)]
impl FailingStore {
    pub(crate) fn broken_on(keys: &[&str]) -> Self {
        Self {
            inner: MemoryStore::new(),
            broken_keys: keys.iter().map(|k| k.to_string()).collect(),
        }
    }
}

#[cfg(test)]
impl KeyValueStore for FailingStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        self.inner.get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        if self.broken_keys.iter().any(|k| k == key) {
            return Err(StorageError::new(key, "simulated write failure"));
        }
        self.inner.set(key, value)
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.inner.remove(key)
    }
}
