//! Marketplace cart store.
//!
//! An ordered collection of cart line items kept in memory and mirrored to a
//! key-value storage collaborator after every mutation. Line items are unique
//! by their composite key `(product id, color, size)`; adding an item whose key
//! already exists merges quantities instead of creating a second row.
//!
//! # Modules
//!
//! - [`item`] - Line items and composite keys
//! - [`store`] - The cart store itself
//! - [`storage`] - Storage collaborator trait and backends
//! - [`config`] - Environment configuration
//! - [`error`] - Error types

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod error;
pub mod item;
pub mod storage;
pub mod store;

pub use config::{CartConfig, ConfigError};
pub use error::{CartError, StorageError};
pub use item::{CartLineItem, LineKey};
pub use storage::{JsonFileStore, KeyValueStore, MemoryStore};
pub use store::{CartStore, DEFAULT_STORAGE_KEY};
