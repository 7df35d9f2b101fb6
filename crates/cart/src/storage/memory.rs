//! In-memory storage backend.

use std::collections::HashMap;

use serde_json::Value;

use super::KeyValueStore;
use crate::error::StorageError;

/// Process-local key-value store.
///
/// Nothing outlives the value itself; useful for tests and for callers that
/// persist the cart some other way.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: HashMap<String, Value>,
}

impl MemoryStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-populated with one entry.
    #[must_use]
    pub fn with_entry(key: impl Into<String>, value: Value) -> Self {
        let mut entries = HashMap::new();
        entries.insert(key.into(), value);
        Self { entries }
    }

    /// Borrow the raw value under `key`.
    #[must_use]
    pub fn raw(&self, key: &str) -> Option<&Value> {
        self.entries.get(key)
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<Value>, StorageError> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: Value) -> Result<(), StorageError> {
        self.entries.insert(key.to_string(), value);
        Ok(())
    }
}
