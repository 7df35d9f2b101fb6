//! Integration tests for the marketplace cart.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p marketplace-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `cart_scenario` - End-to-end walk through add / update / remove
//! - `cart_persistence` - Reload round-trips over memory and file storage
//! - `cart_properties` - Property tests for key uniqueness and counting
//!
//! This library holds the shared fixtures.

use marketplace_core::{ProductId, ProductSnapshot};

/// Product with a regular price and optional sale price.
#[must_use]
pub fn product(id: i64, regular_price: &str, sale_price: Option<&str>) -> ProductSnapshot {
    let mut product = ProductSnapshot::new(ProductId::new(id))
        .with_name(format!("Product {id}"))
        .with_regular_price(regular_price);
    product.sale_price = sale_price.map(str::to_owned);
    product
}
