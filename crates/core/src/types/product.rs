//! Product snapshot captured when an item is added to the cart.

use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

use super::id::ProductId;
use super::price::parse_price;

/// A copy of a catalog product record taken at add-to-cart time.
///
/// The snapshot is stored by value and never re-fetched, so later catalog
/// changes do not affect it. Fields the cart does not interpret (media,
/// vendor data, identifiers) are kept in [`extra`](Self::extra) so the record
/// survives a persistence round-trip unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductSnapshot {
    /// Catalog product ID.
    pub id: ProductId,
    /// Display name.
    #[serde(default)]
    pub name: Option<String>,
    /// List price as a decimal string.
    #[serde(default, deserialize_with = "deserialize_price_field")]
    pub regular_price: Option<String>,
    /// Discounted price as a decimal string. Blank means "no sale".
    #[serde(default, deserialize_with = "deserialize_price_field")]
    pub sale_price: Option<String>,
    /// Remaining upstream fields, preserved verbatim.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ProductSnapshot {
    /// Create a snapshot with only an ID and no pricing.
    #[must_use]
    pub fn new(id: ProductId) -> Self {
        Self {
            id,
            name: None,
            regular_price: None,
            sale_price: None,
            extra: Map::new(),
        }
    }

    /// Set the display name.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Set the regular price string.
    #[must_use]
    pub fn with_regular_price(mut self, price: impl Into<String>) -> Self {
        self.regular_price = Some(price.into());
        self
    }

    /// Set the sale price string.
    #[must_use]
    pub fn with_sale_price(mut self, price: impl Into<String>) -> Self {
        self.sale_price = Some(price.into());
        self
    }

    /// Stock level reported by the catalog, if it was a whole number.
    #[must_use]
    pub fn stock(&self) -> Option<i64> {
        self.extra.get("stock").and_then(Value::as_i64)
    }

    /// The price string that applies: sale price when present and non-blank,
    /// otherwise the regular price.
    #[must_use]
    pub fn effective_price_str(&self) -> Option<&str> {
        self.sale_price
            .as_deref()
            .filter(|s| !s.trim().is_empty())
            .or(self.regular_price.as_deref())
    }

    /// Effective unit price as a decimal.
    ///
    /// Missing or unparseable prices yield zero and log a warning, so one bad
    /// record cannot poison a cart total.
    #[must_use]
    pub fn effective_unit_price(&self) -> Decimal {
        let Some(raw) = self.effective_price_str() else {
            tracing::warn!(product_id = %self.id, "Product has no price, counting as zero");
            return Decimal::ZERO;
        };

        parse_price(raw).unwrap_or_else(|e| {
            tracing::warn!(product_id = %self.id, error = %e, "Unusable product price, counting as zero");
            Decimal::ZERO
        })
    }
}

/// Accept prices as strings or JSON numbers; anything else reads as absent.
fn deserialize_price_field<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::String(s)) => Some(s),
        Some(Value::Number(n)) => Some(n.to_string()),
        _ => None,
    })
}
