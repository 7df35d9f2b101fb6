//! Key-value storage collaborator used to persist the cart.
//!
//! The store exchanges whole JSON values with the backend; encoding to bytes
//! (if any) is the backend's concern.
//!
//! # Backends
//!
//! - [`MemoryStore`] - process-local map, for tests and embedding
//! - [`JsonFileStore`] - one JSON file per key in a directory

mod file;
mod memory;

pub use file::JsonFileStore;
pub use memory::MemoryStore;

use serde_json::Value;

use crate::error::StorageError;

/// A durable key-value store holding JSON values.
pub trait KeyValueStore {
    /// Fetch the value stored under `key`, or `None` if it was never set.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be read or holds invalid data.
    fn get(&self, key: &str) -> Result<Option<Value>, StorageError>;

    /// Store `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be written.
    fn set(&mut self, key: &str, value: Value) -> Result<(), StorageError>;
}

/// Whether `key` is usable by every backend.
///
/// Keys double as file names for [`JsonFileStore`], so they are restricted to
/// ASCII alphanumerics, `-`, `_` and `.`, and may not start with a dot.
#[must_use]
pub fn is_valid_key(key: &str) -> bool {
    !key.is_empty()
        && !key.starts_with('.')
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'))
}
