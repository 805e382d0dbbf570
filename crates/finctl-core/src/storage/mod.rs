//! Durable key-value storage for session state.
//!
//! Storage is synchronous: reads and writes complete before the call returns.
//! Multi-key updates go through [`DurableStorage::apply`] so that related keys
//! (token and user) are written or cleared together.

mod file;

pub use file::FileStorage;

use crate::error::{Error, Result};
use std::collections::HashMap;
use std::sync::Mutex;

/// A single step in a storage batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StorageOp {
    Set(String, String),
    Remove(String),
    /// Precondition: the key must be present before the batch runs.
    Require(String),
}

impl StorageOp {
    pub fn set(key: &str, value: impl Into<String>) -> Self {
        StorageOp::Set(key.to_string(), value.into())
    }

    pub fn remove(key: &str) -> Self {
        StorageOp::Remove(key.to_string())
    }

    pub fn require(key: &str) -> Self {
        StorageOp::Require(key.to_string())
    }
}

/// Persistent key-value storage surviving process restarts.
pub trait DurableStorage: Send + Sync {
    /// Read a value.
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Apply a batch of writes atomically.
    ///
    /// Fails with [`Error::MissingKey`] and writes nothing when a
    /// [`StorageOp::Require`] key is absent.
    fn apply(&self, ops: &[StorageOp]) -> Result<()>;

    /// Write a single value.
    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.apply(&[StorageOp::set(key, value)])
    }

    /// Remove a single value.
    fn remove(&self, key: &str) -> Result<()> {
        self.apply(&[StorageOp::remove(key)])
    }
}

/// In-process storage. Contents are lost when the process exits.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored keys.
    pub fn len(&self) -> usize {
        self.entries.lock().map(|e| e.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl DurableStorage for MemoryStorage {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let entries = self.entries.lock().map_err(|_| Error::LockPoisoned)?;
        Ok(entries.get(key).cloned())
    }

    fn apply(&self, ops: &[StorageOp]) -> Result<()> {
        let mut entries = self.entries.lock().map_err(|_| Error::LockPoisoned)?;
        apply_ops(&mut entries, ops)
    }
}

/// Check every precondition, then apply the writes in order.
pub(crate) fn apply_ops(entries: &mut HashMap<String, String>, ops: &[StorageOp]) -> Result<()> {
    for op in ops {
        if let StorageOp::Require(key) = op {
            if !entries.contains_key(key) {
                return Err(Error::MissingKey(key.clone()));
            }
        }
    }

    for op in ops {
        match op {
            StorageOp::Set(key, value) => {
                entries.insert(key.clone(), value.clone());
            }
            StorageOp::Remove(key) => {
                entries.remove(key);
            }
            StorageOp::Require(_) => {}
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_storage_batch() {
        let storage = MemoryStorage::new();
        storage
            .apply(&[StorageOp::set("a", "1"), StorageOp::set("b", "2")])
            .unwrap();
        assert_eq!(storage.get("a").unwrap().as_deref(), Some("1"));
        assert_eq!(storage.len(), 2);

        storage
            .apply(&[StorageOp::remove("a"), StorageOp::remove("b")])
            .unwrap();
        assert!(storage.is_empty());
        assert_eq!(storage.get("a").unwrap(), None);
    }

    #[test]
    fn test_failed_precondition_writes_nothing() {
        let storage = MemoryStorage::new();
        storage.set("token", "old").unwrap();

        let err = storage
            .apply(&[StorageOp::require("user"), StorageOp::set("token", "new")])
            .unwrap_err();

        assert!(matches!(err, Error::MissingKey(ref k) if k == "user"));
        assert_eq!(storage.get("token").unwrap().as_deref(), Some("old"));

        storage.set("user", "{}").unwrap();
        storage
            .apply(&[StorageOp::require("user"), StorageOp::set("token", "new")])
            .unwrap();
        assert_eq!(storage.get("token").unwrap().as_deref(), Some("new"));
    }

    #[test]
    fn test_remove_missing_key_is_noop() {
        let storage = MemoryStorage::new();
        storage.remove("missing").unwrap();
        assert!(storage.is_empty());
    }
}
