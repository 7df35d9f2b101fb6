//! Decimal price parsing and formatting.
//!
//! The upstream catalog API returns prices as decimal strings (`"19.99"`),
//! sometimes empty or `null`. Parsing is strict: the whole trimmed string must
//! be a decimal number, so `"12.50abc"` is rejected rather than read as `12.50`.
//! Scientific notation (`"1.5e2"`) is accepted, since that is how JSON numbers
//! outside plain range come back from the API. Negative amounts are rejected:
//! a catalog price below zero is treated as bad data, not a discount.

use std::str::FromStr;

use rust_decimal::{Decimal, RoundingStrategy};

/// Errors that can occur when parsing a price string.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum PriceError {
    /// The input is empty or whitespace only.
    #[error("price cannot be empty")]
    Empty,
    /// The input is not a decimal number.
    #[error("invalid price: {0:?}")]
    Invalid(String),
    /// The input is a negative amount.
    #[error("price cannot be negative: {0}")]
    Negative(Decimal),
}

/// Parse a price string into a [`Decimal`].
///
/// # Errors
///
/// Returns an error if the input is blank, is not entirely a decimal number,
/// or is negative.
///
/// # Examples
///
/// ```
/// use marketplace_core::parse_price;
/// use rust_decimal::Decimal;
///
/// assert_eq!(parse_price("10.00").unwrap(), Decimal::new(1000, 2));
/// assert!(parse_price("").is_err());
/// assert!(parse_price("12.50abc").is_err());
/// ```
pub fn parse_price(s: &str) -> Result<Decimal, PriceError> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        return Err(PriceError::Empty);
    }

    let amount = Decimal::from_str(trimmed)
        .or_else(|_| Decimal::from_scientific(trimmed))
        .map_err(|_| PriceError::Invalid(trimmed.to_string()))?;

    if amount.is_sign_negative() && !amount.is_zero() {
        return Err(PriceError::Negative(amount));
    }

    Ok(amount)
}

/// Format an amount with exactly two decimal places (e.g., `35.00`).
#[must_use]
pub fn format_amount(amount: Decimal) -> String {
    let rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    format!("{rounded:.2}")
}
