//! Type-safe price representation.
//!
//! The storefront sells in a single currency (USD) and every price in the
//! catalog is a whole number of dollars, so a price is a plain non-negative
//! integer amount. Arithmetic saturates instead of overflowing.

use core::fmt;
use core::iter::Sum;

use serde::{Deserialize, Serialize};

/// A whole-dollar USD amount.
///
/// # Examples
///
/// ```
/// use istore_core::Price;
///
/// let unit = Price::new(999);
/// assert_eq!(unit.times(2), Price::new(1998));
/// assert_eq!(unit.to_string(), "$999");
/// assert_eq!(Price::new(1619).to_string(), "$1,619");
/// ```
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Price(u64);

impl Price {
    /// A zero amount.
    pub const ZERO: Self = Self(0);

    /// Create a new price from a whole-dollar amount.
    #[must_use]
    pub const fn new(amount: u64) -> Self {
        Self(amount)
    }

    /// Add a surcharge to this price.
    #[must_use]
    pub const fn plus(self, other: Self) -> Self {
        Self(self.0.saturating_add(other.0))
    }

    /// Multiply this unit price by a quantity.
    #[must_use]
    pub fn times(self, qty: u32) -> Self {
        Self(self.0.saturating_mul(u64::from(qty)))
    }
}

impl From<u64> for Price {
    fn from(amount: u64) -> Self {
        Self(amount)
    }
}

impl From<Price> for u64 {
    fn from(price: Price) -> Self {
        price.0
    }
}

impl Sum for Price {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, Self::plus)
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let digits = self.0.to_string();
        let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
        for (i, ch) in digits.chars().enumerate() {
            if i > 0 && (digits.len() - i) % 3 == 0 {
                grouped.push(',');
            }
            grouped.push(ch);
        }
        write!(f, "${grouped}")
    }
}
