//! Marketplace Core - Shared types library.
//!
//! This crate provides common types used across the marketplace components:
//! - `cart` - Persisted shopping cart store
//! - `cli` - Command-line tool for inspecting and editing a cart
//!
//! # Architecture
//!
//! The core crate contains only types and pure helpers - no I/O, no storage
//! access. This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype IDs, prices and product snapshots

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
