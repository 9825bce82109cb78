//! Type-safe price representation using decimal arithmetic.
//!
//! The catalog sends prices as JSON numbers. They are converted to
//! [`Decimal`] before any arithmetic so cart totals never accumulate binary
//! floating point error.

use core::fmt;
use core::iter::Sum;
use core::ops::Add;

use rust_decimal::prelude::FromPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

/// A non-negative amount of money in the store currency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Price(Decimal);

impl Price {
    /// Zero amount.
    pub const ZERO: Self = Self(Decimal::ZERO);

    /// Create a price from a decimal amount.
    #[must_use]
    pub const fn new(amount: Decimal) -> Self {
        Self(amount)
    }

    /// Convert a catalog price.
    ///
    /// Returns `None` for NaN, infinite or negative values.
    #[must_use]
    pub fn from_f64(value: f64) -> Option<Self> {
        if !value.is_finite() || value < 0.0 {
            return None;
        }
        Decimal::from_f64(value).map(Self)
    }

    /// The underlying decimal amount.
    #[must_use]
    pub const fn amount(&self) -> Decimal {
        self.0
    }

    /// Price of `quantity` units. Saturates at [`Decimal::MAX`].
    #[must_use]
    pub fn times(self, quantity: u32) -> Self {
        Self(
            self.0
                .checked_mul(Decimal::from(quantity))
                .unwrap_or(Decimal::MAX),
        )
    }

    /// Returns true if the amount is zero.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }
}

impl Add for Price {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self(self.0.checked_add(rhs.0).unwrap_or(Decimal::MAX))
    }
}

impl Sum for Price {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, Add::add)
    }
}

impl fmt::Display for Price {
    /// Formats as `$12.50`, rounding half away from zero.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let cents = self
            .0
            .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
        write!(f, "${cents:.2}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_f64_rejects_invalid() {
        assert!(Price::from_f64(f64::NAN).is_none());
        assert!(Price::from_f64(f64::INFINITY).is_none());
        assert!(Price::from_f64(-1.0).is_none());
    }

    #[test]
    fn test_from_f64_keeps_cents() {
        let price = Price::from_f64(10.99);
        assert_eq!(price, Some(Price::new(Decimal::new(1099, 2))));
    }

    #[test]
    fn test_times_and_sum() {
        let a = Price::new(Decimal::new(1050, 2)).times(2);
        let b = Price::new(Decimal::from(5));
        let total: Price = [a, b].into_iter().sum();
        assert_eq!(total, Price::new(Decimal::from(26)));
    }

    #[test]
    fn test_sum_of_nothing_is_zero() {
        let total: Price = std::iter::empty().sum();
        assert!(total.is_zero());
    }

    #[test]
    fn test_display_two_places() {
        assert_eq!(Price::new(Decimal::from(20)).to_string(), "$20.00");
        assert_eq!(Price::new(Decimal::new(1099, 2)).to_string(), "$10.99");
        assert_eq!(Price::new(Decimal::new(12345, 3)).to_string(), "$12.35");
        assert_eq!(Price::ZERO.to_string(), "$0.00");
    }

    #[test]
    fn test_times_saturates() {
        let huge = Price::new(Decimal::MAX);
        assert_eq!(huge.times(2), Price::new(Decimal::MAX));
    }
}
