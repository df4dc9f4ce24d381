//! # Money Module
//!
//! Provides the `Money` type for handling monetary values safely.
//!
//! ## Why Fixed-Point Decimals?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  In binary floating point:                                              │
//! │    0.1 + 0.2 = 0.30000000000000004  ❌ WRONG!                           │
//! │    4 × 10.00 × 0.9 = 35.99999...    ❌ a cent short on a receipt        │
//! │                                                                         │
//! │  OUR SOLUTION: rust_decimal (96-bit mantissa, base-10 scale)            │
//! │    4 × 10.00 × 0.90 = 36.0000       ✅ exact                            │
//! │                                                                         │
//! │  No rounding is applied beyond the precision the decimal carries.      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use rust_decimal::Decimal;
//! use storefront_core::money::Money;
//!
//! let price = Money::new(Decimal::new(1099, 2)); // 10.99
//!
//! let line = price * 3;                                // 32.97
//! let total = line + Money::new(Decimal::new(500, 2)); // 37.97
//! assert_eq!(total.amount(), Decimal::new(3797, 2));
//! ```

use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Mul, Sub};

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::pricing::Discount;

// =============================================================================
// Money Type
// =============================================================================

/// A monetary amount in the store currency.
///
/// ## Design Decisions
/// - **Decimal, not cents**: unit prices arrive with arbitrary scale and the
///   discount multiplier (0.90, 0.80) must not introduce rounding
/// - **Signed**: differences (gross − net) are plain subtraction
/// - **Transparent serde**: serialized as the decimal string, e.g. `"36.00"`
///
/// ## Where Money is Used
/// ```text
/// Product.price ──► CartLine.unit_price ──► CartLine.total_price
///                                                  │
///                                                  ▼
///                                         Cart.total_amount (Σ lines)
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize, TS,
)]
#[serde(transparent)]
#[ts(export)]
pub struct Money(#[ts(type = "string")] Decimal);

impl Money {
    /// Wraps a decimal amount.
    #[inline]
    pub const fn new(amount: Decimal) -> Self {
        Money(amount)
    }

    /// Returns the underlying decimal amount.
    #[inline]
    pub const fn amount(&self) -> Decimal {
        self.0
    }

    /// Returns zero money value.
    ///
    /// ## Example
    /// ```rust
    /// use storefront_core::money::Money;
    ///
    /// let zero = Money::zero();
    /// assert!(zero.is_zero());
    /// ```
    #[inline]
    pub const fn zero() -> Self {
        Money(Decimal::ZERO)
    }

    /// Checks if the value is zero.
    #[inline]
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// Checks if the value is strictly positive.
    #[inline]
    pub fn is_positive(&self) -> bool {
        self.0 > Decimal::ZERO
    }

    /// Checks if the value is negative.
    #[inline]
    pub fn is_negative(&self) -> bool {
        self.0 < Decimal::ZERO
    }

    /// Multiplies money by a quantity.
    ///
    /// ## Example
    /// ```rust
    /// use rust_decimal::Decimal;
    /// use storefront_core::money::Money;
    ///
    /// let unit_price = Money::new(Decimal::new(299, 2)); // 2.99
    /// let gross = unit_price.multiply_quantity(3);
    /// assert_eq!(gross.amount(), Decimal::new(897, 2)); // 8.97
    /// ```
    #[inline]
    pub fn multiply_quantity(&self, qty: u32) -> Self {
        Money(self.0 * Decimal::from(qty))
    }

    /// Applies a fractional discount: `amount × (1 − discount)`.
    ///
    /// ## Example
    /// ```rust
    /// use rust_decimal::Decimal;
    /// use storefront_core::money::Money;
    /// use storefront_core::pricing::Discount;
    ///
    /// let gross = Money::new(Decimal::new(4000, 2)); // 40.00
    /// let net = gross.apply_discount(Discount::TEN_PERCENT);
    /// assert_eq!(net.amount(), Decimal::new(3600, 2)); // 36.00
    /// ```
    #[inline]
    pub fn apply_discount(&self, discount: Discount) -> Self {
        Money(self.0 * discount.multiplier())
    }

    /// `multiply_quantity`, returning `None` instead of overflowing.
    #[inline]
    pub fn checked_multiply_quantity(&self, qty: u32) -> Option<Self> {
        self.0.checked_mul(Decimal::from(qty)).map(Money)
    }

    /// `apply_discount`, returning `None` instead of overflowing.
    #[inline]
    pub fn checked_apply_discount(&self, discount: Discount) -> Option<Self> {
        self.0.checked_mul(discount.multiplier()).map(Money)
    }

    /// Adds two amounts, returning `None` instead of overflowing.
    ///
    /// ## Example
    /// ```rust
    /// use rust_decimal::Decimal;
    /// use storefront_core::money::Money;
    ///
    /// let max = Money::new(Decimal::MAX);
    /// assert!(max.checked_add(Money::new(Decimal::ONE)).is_none());
    /// assert!(max.checked_add(Money::zero()).is_some());
    /// ```
    #[inline]
    pub fn checked_add(&self, other: Money) -> Option<Self> {
        self.0.checked_add(other.0).map(Money)
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Shows the raw decimal. Currency symbols are a presentation concern.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl From<Decimal> for Money {
    fn from(amount: Decimal) -> Self {
        Money(amount)
    }
}

impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0 + other.0)
    }
}

impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 += other.0;
    }
}

impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0 - other.0)
    }
}

/// Multiplication by a line quantity.
impl Mul<u32> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, qty: u32) -> Self {
        self.multiply_quantity(qty)
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), |acc, m| acc + m)
    }
}

impl<'a> Sum<&'a Money> for Money {
    fn sum<I: Iterator<Item = &'a Money>>(iter: I) -> Self {
        iter.copied().sum()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_arithmetic() {
        let a = Money::new(dec!(10.00));
        let b = Money::new(dec!(5.50));

        assert_eq!((a + b).amount(), dec!(15.50));
        assert_eq!((a - b).amount(), dec!(4.50));
        assert_eq!((a * 3).amount(), dec!(30.00));
    }

    #[test]
    fn test_zero_and_checks() {
        let zero = Money::zero();
        assert!(zero.is_zero());
        assert!(!zero.is_positive());
        assert!(!zero.is_negative());
        assert_eq!(Money::default(), zero);

        let positive = Money::new(dec!(0.01));
        assert!(positive.is_positive());

        let negative = Money::new(dec!(-0.01));
        assert!(negative.is_negative());
    }

    #[test]
    fn test_apply_discount_is_exact() {
        // 4 × 10.00 × 0.90 must be exactly 36, not 35.999...
        let gross = Money::new(dec!(10.00)).multiply_quantity(4);
        let net = gross.apply_discount(Discount::TEN_PERCENT);
        assert_eq!(net.amount(), dec!(36));
    }

    #[test]
    fn test_checked_arithmetic() {
        let max = Money::new(Decimal::MAX);
        assert!(max.checked_multiply_quantity(2).is_none());
        assert_eq!(max.checked_multiply_quantity(1), Some(max));
        assert!(max.checked_add(Money::new(dec!(1))).is_none());

        let gross = Money::new(dec!(10.00)).checked_multiply_quantity(4).unwrap();
        assert_eq!(
            gross.checked_apply_discount(Discount::TEN_PERCENT).unwrap().amount(),
            dec!(36)
        );
    }

    #[test]
    fn test_sum() {
        let amounts = vec![
            Money::new(dec!(30.00)),
            Money::new(dec!(80.00)),
            Money::new(dec!(0.10)),
        ];
        let by_ref: Money = amounts.iter().sum();
        let by_value: Money = amounts.into_iter().sum();
        assert_eq!(by_ref.amount(), dec!(110.10));
        assert_eq!(by_ref, by_value);

        let empty: Vec<Money> = Vec::new();
        assert!(empty.iter().sum::<Money>().is_zero());
    }

    #[test]
    fn test_display_and_serde() {
        let price = Money::new(dec!(10.99));
        assert_eq!(price.to_string(), "10.99");
        assert_eq!(serde_json::to_string(&price).unwrap(), "\"10.99\"");

        let parsed: Money = serde_json::from_str("\"36.00\"").unwrap();
        assert_eq!(parsed.amount(), dec!(36));
    }
}
