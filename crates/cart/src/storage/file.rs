//! JSON file storage backend.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde_json::Value;

use super::{KeyValueStore, is_valid_key};
use crate::error::StorageError;

/// Stores each key as `<dir>/<key>.json`.
///
/// Writes go to a temporary sibling file that is then renamed over the
/// target, so a crash mid-write leaves the previous value intact.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    dir: PathBuf,
}

impl JsonFileStore {
    /// Open (and create if needed) a store rooted at `dir`.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be created.
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self, StorageError> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;
        tracing::debug!(dir = %dir.display(), "Opened JSON file store");
        Ok(Self { dir })
    }

    /// Directory holding the value files.
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// File path used for `key`.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::InvalidKey`] if the key is not a safe file name.
    pub fn path_for(&self, key: &str) -> Result<PathBuf, StorageError> {
        if !is_valid_key(key) {
            return Err(StorageError::InvalidKey(key.to_string()));
        }
        Ok(self.dir.join(format!("{key}.json")))
    }
}

impl KeyValueStore for JsonFileStore {
    fn get(&self, key: &str) -> Result<Option<Value>, StorageError> {
        let path = self.path_for(key)?;
        let contents = match fs::read_to_string(&path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        Ok(Some(serde_json::from_str(&contents)?))
    }

    fn set(&mut self, key: &str, value: Value) -> Result<(), StorageError> {
        let path = self.path_for(key)?;
        let tmp = self.dir.join(format!("{key}.json.tmp"));

        let bytes = serde_json::to_vec_pretty(&value)?;
        fs::write(&tmp, bytes)?;
        fs::rename(&tmp, &path)?;

        tracing::trace!(path = %path.display(), "Wrote storage value");
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_missing_key_is_none() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::open(dir.path()).unwrap();
        assert!(store.get("product-cart").unwrap().is_none());
    }

    #[test]
    fn test_value_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = JsonFileStore::open(dir.path()).unwrap();
        store.set("product-cart", json!([{ "id": 1 }])).unwrap();

        let reopened = JsonFileStore::open(dir.path()).unwrap();
        assert_eq!(
            reopened.get("product-cart").unwrap(),
            Some(json!([{ "id": 1 }]))
        );
        assert!(!dir.path().join("product-cart.json.tmp").exists());
    }

    #[test]
    fn test_creates_nested_directory() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("a").join("b");
        let mut store = JsonFileStore::open(&nested).unwrap();
        store.set("k", json!(true)).unwrap();
        assert!(nested.join("k.json").exists());
        assert_eq!(store.dir(), nested.as_path());
    }

    #[test]
    fn test_invalid_key_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = JsonFileStore::open(dir.path()).unwrap();
        assert!(matches!(
            store.set("../outside", json!(1)),
            Err(StorageError::InvalidKey(_))
        ));
        assert!(matches!(
            store.get(""),
            Err(StorageError::InvalidKey(_))
        ));
    }

    #[test]
    fn test_corrupt_file_is_json_error() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("product-cart.json"), "{not json").unwrap();
        let store = JsonFileStore::open(dir.path()).unwrap();
        assert!(matches!(
            store.get("product-cart"),
            Err(StorageError::Json(_))
        ));
    }
}
