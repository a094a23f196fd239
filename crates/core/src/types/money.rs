//! Type-safe money representation using decimal arithmetic.
//!
//! FoodExpress trades in a single currency, so [`Money`] wraps a bare
//! [`Decimal`] amount. All totals shown to customers are fixed to two
//! decimal places via [`Money::fixed2`].
//!
//! Serialization uses JSON numbers (not strings) because the catalog file,
//! the cart backup, and the persisted order items all carry prices as plain
//! numbers.

use core::fmt;
use core::iter::Sum;
use core::ops::{Add, AddAssign, Mul};

use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// A monetary amount in the store's currency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub struct Money(Decimal);

impl Money {
    /// Zero amount.
    pub const ZERO: Self = Self(Decimal::ZERO);

    /// Create a new amount.
    #[must_use]
    pub const fn new(amount: Decimal) -> Self {
        Self(amount)
    }

    /// Create an amount from whole currency units (e.g. `20` -> `$20.00`).
    #[must_use]
    pub fn from_units(units: i64) -> Self {
        Self(Decimal::from(units))
    }

    /// Get the underlying decimal amount.
    #[must_use]
    pub const fn amount(&self) -> Decimal {
        self.0
    }

    /// Whether the amount is strictly negative.
    #[must_use]
    pub fn is_negative(&self) -> bool {
        self.0.is_sign_negative() && !self.0.is_zero()
    }

    /// Round to two decimal places (banker's rounding per `Decimal::round_dp`).
    #[must_use]
    pub fn round2(self) -> Self {
        Self(self.0.round_dp(2))
    }

    /// Format fixed to two decimal places, without a currency symbol.
    ///
    /// ```
    /// use food_express_core::Money;
    ///
    /// assert_eq!(Money::from_units(40).fixed2(), "40.00");
    /// ```
    #[must_use]
    pub fn fixed2(&self) -> String {
        format!("{:.2}", self.0)
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}", self.0)
    }
}

impl Add for Money {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self(self.0 + rhs.0)
    }
}

impl AddAssign for Money {
    fn add_assign(&mut self, rhs: Self) {
        self.0 += rhs.0;
    }
}

/// Multiply a unit price by a quantity.
impl Mul<u32> for Money {
    type Output = Self;

    fn mul(self, rhs: u32) -> Self {
        Self(self.0 * Decimal::from(rhs))
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, Add::add)
    }
}

// Prices are plain numbers in every persisted layout (catalog, cart backup,
// order items), so Money serializes through rust_decimal's float adapter
// rather than the default string representation.
impl Serialize for Money {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        rust_decimal::serde::float::serialize(&self.0, serializer)
    }
}

impl<'de> Deserialize<'de> for Money {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        rust_decimal::serde::float::deserialize(deserializer).map(Self)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed2_pads_and_truncates() {
        assert_eq!(Money::from_units(20).fixed2(), "20.00");
        assert_eq!(Money::new(Decimal::new(1995, 2)).fixed2(), "19.95");
        assert_eq!(Money::new(Decimal::new(12345, 3)).fixed2(), "12.35");
    }

    #[test]
    fn test_mul_by_quantity() {
        let price = Money::new(Decimal::new(1250, 2));
        assert_eq!((price * 3).fixed2(), "37.50");
    }

    #[test]
    fn test_sum() {
        let total: Money = [Money::from_units(5), Money::from_units(7)]
            .into_iter()
            .sum();
        assert_eq!(total.fixed2(), "12.00");
    }

    #[test]
    fn test_round2() {
        let eight_pct = Money::from_units(19).amount() * Decimal::new(8, 2);
        assert_eq!(Money::new(eight_pct).round2().fixed2(), "1.52");
    }

    #[test]
    fn test_is_negative() {
        assert!(Money::new(Decimal::new(-1, 2)).is_negative());
        assert!(!Money::ZERO.is_negative());
        assert!(!Money::from_units(1).is_negative());
    }

    #[test]
    fn test_serde_as_number() {
        let price = Money::new(Decimal::new(2050, 2));
        let json = serde_json::to_string(&price).unwrap();
        assert_eq!(json, "20.5");

        let parsed: Money = serde_json::from_str("20.5").unwrap();
        assert_eq!(parsed, price);

        // Whole numbers round-trip too
        let whole: Money = serde_json::from_str("20").unwrap();
        assert_eq!(whole, Money::from_units(20));
    }
}
