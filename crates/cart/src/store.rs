//! The cart store.
//!
//! Holds the cart in memory and mirrors it to a [`KeyValueStore`] after every
//! mutation. The persisted value is loaded exactly once; that load never
//! writes back, so a store that has not finished loading cannot overwrite a
//! saved cart with an empty one.

use marketplace_core::{ProductId, ProductSnapshot};
use rust_decimal::Decimal;
use serde_json::Value;
use tokio::sync::watch;
use tracing::instrument;

use crate::config::CartConfig;
use crate::error::CartError;
use crate::item::{CartLineItem, LineKey};
use crate::storage::KeyValueStore;

/// Storage key the cart is saved under unless configured otherwise.
pub const DEFAULT_STORAGE_KEY: &str = "product-cart";

/// Shopping cart backed by a key-value storage collaborator.
///
/// All mutations take `&mut self`: there is exactly one writer. Persistence
/// is best-effort. Storage failures are logged and the in-memory cart stays
/// authoritative for the rest of the session.
///
/// # Example
///
/// ```
/// use marketplace_cart::{CartStore, MemoryStore, DEFAULT_STORAGE_KEY};
/// use marketplace_core::{ProductId, ProductSnapshot};
///
/// let mut cart = CartStore::new(MemoryStore::new(), DEFAULT_STORAGE_KEY);
/// cart.initialize();
///
/// let shirt = ProductSnapshot::new(ProductId::new(7)).with_regular_price("20");
/// cart.add_to_cart(shirt.clone(), 1, Some("red"), Some("M")).unwrap();
/// cart.add_to_cart(shirt, 2, Some("red"), Some("M")).unwrap();
///
/// assert_eq!(cart.items().len(), 1);
/// assert_eq!(cart.cart_item_count(), 3);
/// ```
#[derive(Debug)]
pub struct CartStore<S> {
    storage: S,
    key: String,
    items: Vec<CartLineItem>,
    initialized: bool,
    changes: watch::Sender<Vec<CartLineItem>>,
}

impl<S: KeyValueStore> CartStore<S> {
    /// Create an empty, not yet initialized store persisting under `key`.
    #[must_use]
    pub fn new(storage: S, key: impl Into<String>) -> Self {
        let (changes, _) = watch::channel(Vec::new());
        Self {
            storage,
            key: key.into(),
            items: Vec::new(),
            initialized: false,
            changes,
        }
    }

    /// Create a store using the configured storage key.
    #[must_use]
    pub fn from_config(storage: S, config: &CartConfig) -> Self {
        Self::new(storage, config.storage_key.clone())
    }

    /// Create a store and load the persisted cart immediately.
    #[must_use]
    pub fn open(storage: S, key: impl Into<String>) -> Self {
        let mut store = Self::new(storage, key);
        store.initialize();
        store
    }

    /// Load the persisted cart into memory.
    ///
    /// Runs once per store; later calls do nothing. A missing, unreadable or
    /// malformed value leaves the cart empty. Rows sharing a composite key
    /// are merged and zero-quantity rows dropped. Nothing is written back.
    #[instrument(skip(self), fields(key = %self.key))]
    pub fn initialize(&mut self) {
        if self.initialized {
            tracing::debug!("Cart already initialized");
            return;
        }
        self.initialized = true;

        let value = match self.storage.get(&self.key) {
            Ok(Some(value)) => value,
            Ok(None) => {
                tracing::debug!("No persisted cart, starting empty");
                return;
            }
            Err(e) => {
                tracing::warn!(error = %e, "Failed to read persisted cart, starting empty");
                return;
            }
        };

        let Some(rows) = decode_rows(value) else {
            return;
        };

        self.items = normalize(rows);
        tracing::info!(lines = self.items.len(), "Loaded persisted cart");
        self.notify();
    }

    /// Whether [`initialize`](Self::initialize) has run.
    #[must_use]
    pub const fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// Add `quantity` units of `product` in the given variant.
    ///
    /// If a row with the same `(id, color, size)` exists its quantity grows by
    /// `quantity` and its stored snapshot is kept; otherwise a new row is
    /// appended.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::InvalidQuantity`] if `quantity` is zero. The cart
    /// is left unchanged.
    #[instrument(skip(self, product), fields(product_id = %product.id))]
    pub fn add_to_cart(
        &mut self,
        product: ProductSnapshot,
        quantity: u32,
        color: Option<&str>,
        size: Option<&str>,
    ) -> Result<(), CartError> {
        if quantity == 0 {
            return Err(CartError::InvalidQuantity(quantity));
        }
        self.ensure_initialized();

        let key = LineKey::new(product.id, color, size);
        if let Some(existing) = self.items.iter_mut().find(|item| key.matches(item)) {
            existing.quantity = existing.quantity.saturating_add(quantity);
            tracing::debug!(%key, quantity = existing.quantity, "Merged into existing line");
        } else {
            self.items.push(CartLineItem::new(
                product,
                quantity,
                color.map(str::to_owned),
                size.map(str::to_owned),
            ));
            tracing::debug!(%key, quantity, "Appended new line");
        }

        self.commit();
        Ok(())
    }

    /// Remove the row matching `(item_id, color, size)`. Absent rows are ignored.
    #[instrument(skip(self))]
    pub fn remove_from_cart(&mut self, item_id: ProductId, color: Option<&str>, size: Option<&str>) {
        self.ensure_initialized();

        let key = LineKey::new(item_id, color, size);
        let before = self.items.len();
        self.items.retain(|item| !key.matches(item));

        if self.items.len() == before {
            tracing::debug!(%key, "No matching line to remove");
            return;
        }
        self.commit();
    }

    /// Set the quantity of the matching row. Zero removes the row.
    ///
    /// Absent rows are ignored.
    #[instrument(skip(self))]
    pub fn update_quantity(
        &mut self,
        item_id: ProductId,
        quantity: u32,
        color: Option<&str>,
        size: Option<&str>,
    ) {
        if quantity == 0 {
            self.remove_from_cart(item_id, color, size);
            return;
        }
        self.ensure_initialized();

        let key = LineKey::new(item_id, color, size);
        let Some(existing) = self.items.iter_mut().find(|item| key.matches(item)) else {
            tracing::debug!(%key, "No matching line to update");
            return;
        };
        if existing.quantity == quantity {
            return;
        }
        existing.quantity = quantity;
        self.commit();
    }

    /// Empty the cart and persist the empty sequence right away.
    #[instrument(skip(self))]
    pub fn clear_cart(&mut self) {
        // Mark as loaded so a later mutation does not resurrect the old cart.
        self.initialized = true;
        self.items.clear();
        self.commit();
        tracing::info!("Cart cleared");
    }

    /// Total number of units across all rows.
    #[must_use]
    pub fn cart_item_count(&self) -> u64 {
        self.items.iter().map(|item| u64::from(item.quantity)).sum()
    }

    /// Sum of effective unit price times quantity over all rows.
    ///
    /// Rows with missing or unparseable prices contribute zero, as does a row
    /// whose line total overflows. A row that would push the running total
    /// past `Decimal::MAX` is skipped, so the result is the sum of the rows
    /// that fit.
    #[must_use]
    pub fn cart_total(&self) -> Decimal {
        self.items.iter().fold(Decimal::ZERO, |total, item| {
            total.checked_add(item.line_total()).unwrap_or_else(|| {
                tracing::warn!(key = %item.key(), "Cart total overflows, skipping line");
                total
            })
        })
    }

    /// Whether a row with key `(product_id, color, size)` exists.
    #[must_use]
    pub fn is_in_cart(&self, product_id: ProductId, color: Option<&str>, size: Option<&str>) -> bool {
        let key = LineKey::new(product_id, color, size);
        self.items.iter().any(|item| key.matches(item))
    }

    /// Rows in insertion order.
    #[must_use]
    pub fn items(&self) -> &[CartLineItem] {
        &self.items
    }

    /// Number of distinct rows.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the cart has no rows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Storage key this cart persists under.
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Subscribe to cart snapshots.
    ///
    /// The receiver is marked changed after every mutation and after the
    /// initial load when it found rows.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<Vec<CartLineItem>> {
        self.changes.subscribe()
    }

    /// Borrow the storage collaborator.
    #[must_use]
    pub const fn storage(&self) -> &S {
        &self.storage
    }

    /// Consume the store and hand back its storage collaborator.
    #[must_use]
    pub fn into_storage(self) -> S {
        self.storage
    }

    fn ensure_initialized(&mut self) {
        if !self.initialized {
            self.initialize();
        }
    }

    /// Persist the current rows and notify subscribers.
    fn commit(&mut self) {
        self.persist();
        self.notify();
    }

    fn persist(&mut self) {
        let value = match serde_json::to_value(&self.items) {
            Ok(value) => value,
            Err(e) => {
                tracing::warn!(error = %e, "Failed to encode cart, keeping in-memory state");
                return;
            }
        };

        if let Err(e) = self.storage.set(&self.key, value) {
            tracing::warn!(key = %self.key, error = %e, "Failed to persist cart, keeping in-memory state");
        }
    }

    fn notify(&self) {
        self.changes.send_replace(self.items.clone());
    }
}

/// Decode a stored value into rows, or `None` if it is not a cart.
fn decode_rows(value: Value) -> Option<Vec<CartLineItem>> {
    if !value.is_array() {
        tracing::warn!("Persisted cart is not a sequence, starting empty");
        return None;
    }

    match serde_json::from_value(value) {
        Ok(rows) => Some(rows),
        Err(e) => {
            tracing::warn!(error = %e, "Persisted cart is malformed, starting empty");
            None
        }
    }
}

/// Merge rows that share a composite key and drop zero-quantity rows,
/// keeping first-seen order.
fn normalize(rows: Vec<CartLineItem>) -> Vec<CartLineItem> {
    let mut out: Vec<CartLineItem> = Vec::with_capacity(rows.len());

    for row in rows {
        if row.quantity == 0 {
            tracing::warn!(key = %row.key(), "Dropping persisted line with zero quantity");
            continue;
        }

        let key = row.key();
        if let Some(existing) = out.iter_mut().find(|item| key.matches(item)) {
            tracing::warn!(%key, "Merging duplicate persisted line");
            existing.quantity = existing.quantity.saturating_add(row.quantity);
        } else {
            out.push(row);
        }
    }

    out
}
