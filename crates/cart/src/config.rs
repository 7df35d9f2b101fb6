//! Cart configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Optional
//! - `CART_STORAGE_KEY` - Key the cart is persisted under (default: product-cart)
//! - `CART_STORAGE_DIR` - Directory for the JSON file backend (default: .cart)

use std::path::PathBuf;

use thiserror::Error;

use crate::storage::is_valid_key;
use crate::store::DEFAULT_STORAGE_KEY;

const DEFAULT_STORAGE_DIR: &str = ".cart";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Cart store configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartConfig {
    /// Storage key the cart is saved under
    pub storage_key: String,
    /// Directory used by the JSON file backend
    pub storage_dir: PathBuf,
}

impl Default for CartConfig {
    fn default() -> Self {
        Self {
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            storage_dir: PathBuf::from(DEFAULT_STORAGE_DIR),
        }
    }
}

impl CartConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set to an unusable value.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable lookup.
    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let storage_key =
            lookup("CART_STORAGE_KEY").unwrap_or_else(|| DEFAULT_STORAGE_KEY.to_string());
        if !is_valid_key(&storage_key) {
            return Err(ConfigError::InvalidEnvVar(
                "CART_STORAGE_KEY".to_string(),
                format!("{storage_key:?} must be non-empty and use only A-Z, a-z, 0-9, '-', '_', '.'"),
            ));
        }

        let storage_dir = lookup("CART_STORAGE_DIR")
            .unwrap_or_else(|| DEFAULT_STORAGE_DIR.to_string());
        if storage_dir.trim().is_empty() {
            return Err(ConfigError::InvalidEnvVar(
                "CART_STORAGE_DIR".to_string(),
                "cannot be empty".to_string(),
            ));
        }

        Ok(Self {
            storage_key,
            storage_dir: PathBuf::from(storage_dir),
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = CartConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, CartConfig::default());
        assert_eq!(config.storage_key, "product-cart");
        assert_eq!(config.storage_dir, PathBuf::from(".cart"));
    }

    #[test]
    fn test_overrides() {
        let config = CartConfig::from_lookup(lookup(&[
            ("CART_STORAGE_KEY", "guest-cart"),
            ("CART_STORAGE_DIR", "/var/lib/cart"),
        ]))
        .unwrap();
        assert_eq!(config.storage_key, "guest-cart");
        assert_eq!(config.storage_dir, PathBuf::from("/var/lib/cart"));
    }

    #[test]
    fn test_invalid_key() {
        let result = CartConfig::from_lookup(lookup(&[("CART_STORAGE_KEY", "../cart")]));
        let err = result.unwrap_err();
        assert!(matches!(err, ConfigError::InvalidEnvVar(ref name, _) if name == "CART_STORAGE_KEY"));
    }

    #[test]
    fn test_empty_dir() {
        let result = CartConfig::from_lookup(lookup(&[("CART_STORAGE_DIR", "  ")]));
        assert!(result.is_err());
    }
}
