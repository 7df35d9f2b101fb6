//! Core types for the marketplace.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod id;
pub mod price;
pub mod product;

pub use id::*;
pub use price::{PriceError, format_amount, parse_price};
pub use product::ProductSnapshot;
