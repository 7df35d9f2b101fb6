//! Error types for the cart store and its storage backends.

use thiserror::Error;

/// Storage collaborator errors.
///
/// The cart store treats these as non-fatal: they are logged and the
/// in-memory cart remains authoritative for the rest of the session.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Reading or writing the backing file failed.
    #[error("Storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The stored bytes are not valid JSON.
    #[error("Storage JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The key cannot be used by this backend.
    #[error("Invalid storage key: {0:?}")]
    InvalidKey(String),
}

/// Errors returned by cart mutations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CartError {
    /// A line item cannot be added with a zero quantity.
    #[error("Quantity must be at least 1 (got {0})")]
    InvalidQuantity(u32),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cart_error_display() {
        assert_eq!(
            CartError::InvalidQuantity(0).to_string(),
            "Quantity must be at least 1 (got 0)"
        );
    }

    #[test]
    fn test_storage_error_display() {
        let err = StorageError::InvalidKey("../etc".to_string());
        assert_eq!(err.to_string(), "Invalid storage key: \"../etc\"");

        let io = StorageError::from(std::io::Error::other("disk gone"));
        assert!(io.to_string().contains("disk gone"));
    }
}
