//! Cart line items and their composite identity.

use marketplace_core::{ProductId, ProductSnapshot};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One row of the cart: a product at a specific variant selection.
///
/// Serialized with the field names the storefront has always persisted
/// (`selectedColor`, `selectedSize`), so existing stored carts keep loading.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartLineItem {
    /// Product the row refers to. Not unique across rows.
    pub id: ProductId,
    /// Product record as it was when the row was created.
    pub product: ProductSnapshot,
    /// Number of units, always at least 1 inside a cart.
    pub quantity: u32,
    /// Selected color variant.
    #[serde(
        rename = "selectedColor",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub selected_color: Option<String>,
    /// Selected size variant.
    #[serde(
        rename = "selectedSize",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub selected_size: Option<String>,
}

impl CartLineItem {
    /// Create a line item for `product`, taking the row ID from the snapshot.
    #[must_use]
    pub fn new(
        product: ProductSnapshot,
        quantity: u32,
        selected_color: Option<String>,
        selected_size: Option<String>,
    ) -> Self {
        Self {
            id: product.id,
            product,
            quantity,
            selected_color,
            selected_size,
        }
    }

    /// Composite key of this row.
    #[must_use]
    pub fn key(&self) -> LineKey {
        LineKey {
            id: self.id,
            color: self.selected_color.clone(),
            size: self.selected_size.clone(),
        }
    }

    /// Effective unit price multiplied by quantity.
    ///
    /// A product that overflows the decimal range counts as zero, like any
    /// other unusable price.
    #[must_use]
    pub fn line_total(&self) -> Decimal {
        self.product
            .effective_unit_price()
            .checked_mul(Decimal::from(self.quantity))
            .unwrap_or_else(|| {
                tracing::warn!(key = %self.key(), quantity = self.quantity, "Line total overflows, counting as zero");
                Decimal::ZERO
            })
    }
}

/// Composite identity of a line item: `(product id, color, size)`.
///
/// Two rows with the same product but different variants are distinct. An
/// absent variant only matches another absent variant.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LineKey {
    /// Product ID.
    pub id: ProductId,
    /// Color variant.
    pub color: Option<String>,
    /// Size variant.
    pub size: Option<String>,
}

impl LineKey {
    /// Build a key from borrowed variant selections.
    #[must_use]
    pub fn new(id: ProductId, color: Option<&str>, size: Option<&str>) -> Self {
        Self {
            id,
            color: color.map(str::to_owned),
            size: size.map(str::to_owned),
        }
    }

    /// Whether `item` carries this key.
    #[must_use]
    pub fn matches(&self, item: &CartLineItem) -> bool {
        item.id == self.id
            && item.selected_color == self.color
            && item.selected_size == self.size
    }
}

impl std::fmt::Display for LineKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}/{}/{}",
            self.id,
            self.color.as_deref().unwrap_or("-"),
            self.size.as_deref().unwrap_or("-")
        )
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use serde_json::json;

    fn shirt() -> ProductSnapshot {
        ProductSnapshot::new(ProductId::new(7))
            .with_name("Shirt")
            .with_regular_price("20")
    }

    #[test]
    fn test_key_distinguishes_variants() {
        let red = CartLineItem::new(shirt(), 1, Some("red".into()), Some("M".into()));
        let blue = CartLineItem::new(shirt(), 1, Some("blue".into()), Some("M".into()));

        assert_ne!(red.key(), blue.key());
        assert!(LineKey::new(ProductId::new(7), Some("red"), Some("M")).matches(&red));
        assert!(!LineKey::new(ProductId::new(7), Some("red"), Some("M")).matches(&blue));
    }

    #[test]
    fn test_absent_variant_only_matches_absent() {
        let plain = CartLineItem::new(shirt(), 1, None, None);
        assert!(LineKey::new(ProductId::new(7), None, None).matches(&plain));
        assert!(!LineKey::new(ProductId::new(7), Some(""), None).matches(&plain));
    }

    #[test]
    fn test_line_total() {
        let item = CartLineItem::new(shirt(), 3, None, None);
        assert_eq!(item.line_total(), Decimal::from(60));
    }

    #[test]
    fn test_line_total_overflow_counts_as_zero() {
        let huge = ProductSnapshot::new(ProductId::new(1)).with_regular_price("100000000000000000000");
        let item = CartLineItem::new(huge, u32::MAX, None, None);
        assert_eq!(item.line_total(), Decimal::ZERO);
    }

    #[test]
    fn test_persisted_field_names() {
        let item = CartLineItem::new(shirt(), 2, Some("red".into()), None);
        let value = serde_json::to_value(&item).unwrap();

        assert_eq!(value["id"], 7);
        assert_eq!(value["quantity"], 2);
        assert_eq!(value["selectedColor"], "red");
        assert!(value.get("selectedSize").is_none());
    }

    #[test]
    fn test_deserialize_stored_row() {
        let item: CartLineItem = serde_json::from_value(json!({
            "id": 7,
            "product": { "id": 7, "regular_price": "20", "sale_price": "" },
            "quantity": 1,
            "selectedSize": "L"
        }))
        .unwrap();

        assert_eq!(item.selected_color, None);
        assert_eq!(item.selected_size.as_deref(), Some("L"));
        assert_eq!(item.key().to_string(), "7/-/L");
    }
}
