//! Type-safe price representation using decimal arithmetic.
//!
//! Prices come from the catalog as plain JSON numbers (`"precio": 10000`) and
//! are written back the same way when the cart is persisted. Amounts are
//! written with every digit the decimal holds, so a saved cart reloads to
//! exactly the same prices. The shop only
//! sells in a single currency, so a `Price` carries no currency code.

use core::fmt;
use core::iter::Sum;

use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Errors that can occur when constructing a [`Price`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum PriceError {
    /// The amount is below zero.
    #[error("price cannot be negative (got {0})")]
    Negative(Decimal),
}

/// A non-negative amount in the shop's currency.
///
/// ## Examples
///
/// ```
/// use puntaditas_core::Price;
/// use rust_decimal::Decimal;
///
/// let price = Price::from(10_000);
/// assert_eq!(price.line_total(3), Price::from(30_000));
///
/// assert!(Price::new(Decimal::from(-1)).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Price(Decimal);

impl Price {
    /// A price of zero.
    pub const ZERO: Self = Self(Decimal::ZERO);

    /// Create a new price.
    ///
    /// # Errors
    ///
    /// Returns [`PriceError::Negative`] if `amount` is below zero.
    pub fn new(amount: Decimal) -> Result<Self, PriceError> {
        if amount.is_sign_negative() && !amount.is_zero() {
            return Err(PriceError::Negative(amount));
        }
        Ok(Self(amount))
    }

    /// Returns the underlying decimal amount.
    #[must_use]
    pub const fn amount(&self) -> Decimal {
        self.0
    }

    /// Returns `true` if the price is zero.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// Price of `quantity` units at this unit price.
    ///
    /// Saturates at [`Decimal::MAX`] instead of overflowing.
    #[must_use]
    pub fn line_total(&self, quantity: u32) -> Self {
        Self(self.0.saturating_mul(Decimal::from(quantity)))
    }

    /// Adds two prices, saturating at [`Decimal::MAX`].
    #[must_use]
    pub fn saturating_add(self, other: Self) -> Self {
        Self(self.0.saturating_add(other.0))
    }
}

impl From<u32> for Price {
    fn from(amount: u32) -> Self {
        Self(Decimal::from(amount))
    }
}

impl TryFrom<Decimal> for Price {
    type Error = PriceError;

    fn try_from(amount: Decimal) -> Result<Self, Self::Error> {
        Self::new(amount)
    }
}

impl From<Price> for Decimal {
    fn from(price: Price) -> Self {
        price.0
    }
}

impl Sum for Price {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, Self::saturating_add)
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.normalize())
    }
}

impl Serialize for Price {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        rust_decimal::serde::arbitrary_precision::serialize(&self.0, serializer)
    }
}

impl<'de> Deserialize<'de> for Price {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let amount = rust_decimal::serde::arbitrary_precision::deserialize(deserializer)?;
        Self::new(amount).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_new_rejects_negative() {
        assert!(matches!(
            Price::new(Decimal::from(-5)),
            Err(PriceError::Negative(_))
        ));
        assert!(Price::new(Decimal::ZERO).is_ok());
        assert!(Price::new(Decimal::new(1999, 2)).is_ok());
    }

    #[test]
    fn test_line_total() {
        let price = Price::from(12_000);
        assert_eq!(price.line_total(0), Price::ZERO);
        assert_eq!(price.line_total(4), Price::from(48_000));
    }

    #[test]
    fn test_line_total_saturates() {
        let price = Price::new(Decimal::MAX).unwrap();
        assert_eq!(price.line_total(2).amount(), Decimal::MAX);
    }

    #[test]
    fn test_sum() {
        let total: Price = [Price::from(10_000), Price::from(15_000)]
            .into_iter()
            .sum();
        assert_eq!(total, Price::from(25_000));

        let empty: Price = core::iter::empty().sum();
        assert!(empty.is_zero());
    }

    #[test]
    fn test_deserialize_integer_and_fraction() {
        let price: Price = serde_json::from_str("10000").unwrap();
        assert_eq!(price, Price::from(10_000));

        let price: Price = serde_json::from_str("19.99").unwrap();
        assert_eq!(price.amount(), Decimal::new(1999, 2));
    }

    #[test]
    fn test_deserialize_rejects_negative() {
        assert!(serde_json::from_str::<Price>("-1").is_err());
    }

    #[test]
    fn test_serializes_as_number() {
        let json = serde_json::to_value(Price::from(15_000)).unwrap();
        assert!(json.is_number());
        let back: Price = serde_json::from_value(json).unwrap();
        assert_eq!(back, Price::from(15_000));
    }

    #[test]
    fn test_long_fraction_survives_json() {
        let price: Price = serde_json::from_str("123456789.123456789").unwrap();
        assert_eq!(price.amount(), Decimal::new(123_456_789_123_456_789, 9));

        let json = serde_json::to_string(&price).unwrap();
        assert_eq!(json, "123456789.123456789");
        assert_eq!(serde_json::from_str::<Price>(&json).unwrap(), price);
    }

    #[test]
    fn test_display_normalizes() {
        let price = Price::new(Decimal::new(1_000_000, 2)).unwrap();
        assert_eq!(price.to_string(), "10000");
    }
}
