//! # Pricing Rules
//!
//! Quantity-tier discounts for a single product line.
//!
//! ## Tier Table
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Identical Items per Line                             │
//! │                                                                         │
//! │   quantity   0 ─── 3 │ 4 ─── 9 │ 10 ─── 20 │ 21 ──►                    │
//! │   discount     0%    │   10%   │    20%    │ REJECTED                   │
//! │                                                                         │
//! │   Lower bounds are inclusive: 4 → 10%, 10 → 20%, 20 → 20%              │
//! │   Above MAX_IDENTICAL_ITEMS the line is a DomainRuleViolation          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Formula
//! `total = quantity × unit_price × (1 − discount)`, all in `Decimal`.

use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::MAX_IDENTICAL_ITEMS;

// =============================================================================
// Discount
// =============================================================================

/// A discount expressed as a fraction in `[0, 1]` (0.10 = 10% off).
///
/// Only the tier table creates discounts, so a line's discount can never be
/// set independently of its quantity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[serde(transparent)]
#[ts(export)]
pub struct Discount(#[ts(type = "string")] Decimal);

impl Discount {
    /// No discount.
    pub const NONE: Discount = Discount(Decimal::from_parts(0, 0, 0, false, 2));

    /// 10% off (0.10).
    pub const TEN_PERCENT: Discount = Discount(Decimal::from_parts(10, 0, 0, false, 2));

    /// 20% off (0.20).
    pub const TWENTY_PERCENT: Discount = Discount(Decimal::from_parts(20, 0, 0, false, 2));

    /// Returns the discount as a fraction (0.10 for 10%).
    #[inline]
    pub const fn fraction(&self) -> Decimal {
        self.0
    }

    /// Returns the factor applied to the gross amount: `1 − fraction`.
    #[inline]
    pub fn multiplier(&self) -> Decimal {
        Decimal::ONE - self.0
    }

    /// Returns the discount as a percentage (for display only).
    pub fn percent(&self) -> Decimal {
        (self.0 * Decimal::ONE_HUNDRED).normalize()
    }

    /// Checks if no discount applies.
    #[inline]
    pub fn is_none(&self) -> bool {
        self.0.is_zero()
    }
}

impl Default for Discount {
    fn default() -> Self {
        Discount::NONE
    }
}

impl fmt::Display for Discount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.percent())
    }
}

// =============================================================================
// Tier Table
// =============================================================================

/// One quantity bucket of the tier table. Both bounds are inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DiscountTier {
    pub min_quantity: u32,
    pub max_quantity: u32,
    pub discount: Discount,
}

impl DiscountTier {
    /// Checks if `quantity` falls inside this tier.
    #[inline]
    pub const fn contains(&self, quantity: u32) -> bool {
        quantity >= self.min_quantity && quantity <= self.max_quantity
    }
}

/// Ordered, contiguous tiers covering `0..=MAX_IDENTICAL_ITEMS`.
pub const DISCOUNT_TIERS: [DiscountTier; 3] = [
    DiscountTier {
        min_quantity: 0,
        max_quantity: 3,
        discount: Discount::NONE,
    },
    DiscountTier {
        min_quantity: 4,
        max_quantity: 9,
        discount: Discount::TEN_PERCENT,
    },
    DiscountTier {
        min_quantity: 10,
        max_quantity: MAX_IDENTICAL_ITEMS,
        discount: Discount::TWENTY_PERCENT,
    },
];

/// Looks up the discount for a line quantity.
///
/// ## Errors
/// `CoreError::DomainRuleViolation` when `quantity > MAX_IDENTICAL_ITEMS`.
///
/// ## Example
/// ```rust
/// use storefront_core::pricing::{discount_for_quantity, Discount};
///
/// assert_eq!(discount_for_quantity(3).unwrap(), Discount::NONE);
/// assert_eq!(discount_for_quantity(4).unwrap(), Discount::TEN_PERCENT);
/// assert_eq!(discount_for_quantity(20).unwrap(), Discount::TWENTY_PERCENT);
/// assert!(discount_for_quantity(21).is_err());
/// ```
pub fn discount_for_quantity(quantity: u32) -> CoreResult<Discount> {
    DISCOUNT_TIERS
        .iter()
        .find(|tier| tier.contains(quantity))
        .map(|tier| tier.discount)
        .ok_or_else(|| CoreError::identical_item_limit(quantity, MAX_IDENTICAL_ITEMS))
}

// =============================================================================
// Line Price
// =============================================================================

/// The derived part of a priced line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LinePrice {
    pub discount: Discount,
    pub total: Money,
}

/// Prices `quantity` identical items at `unit_price`.
///
/// Pure: the same inputs always give the same output, and nothing is
/// rounded beyond the precision of `Decimal`.
///
/// ## Errors
/// - `DomainRuleViolation` when `quantity > MAX_IDENTICAL_ITEMS`
/// - `AmountOverflow` when quantity × unit price leaves the decimal range
pub fn line_total(quantity: u32, unit_price: Money) -> CoreResult<LinePrice> {
    let discount = discount_for_quantity(quantity)?;
    let overflow = || CoreError::AmountOverflow {
        context: "line total",
    };

    let total = unit_price
        .checked_multiply_quantity(quantity)
        .ok_or_else(overflow)?
        .checked_apply_discount(discount)
        .ok_or_else(overflow)?;

    Ok(LinePrice { discount, total })
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DomainRule;
    use rust_decimal_macros::dec;

    fn ten() -> Money {
        Money::new(dec!(10.00))
    }

    #[test]
    fn test_tiers_are_contiguous_up_to_the_limit() {
        assert_eq!(DISCOUNT_TIERS[0].min_quantity, 0);
        for pair in DISCOUNT_TIERS.windows(2) {
            assert_eq!(pair[0].max_quantity + 1, pair[1].min_quantity);
        }
        assert_eq!(
            DISCOUNT_TIERS[DISCOUNT_TIERS.len() - 1].max_quantity,
            MAX_IDENTICAL_ITEMS
        );
    }

    #[test]
    fn test_boundaries() {
        assert_eq!(discount_for_quantity(0).unwrap(), Discount::NONE);
        assert_eq!(discount_for_quantity(3).unwrap(), Discount::NONE);
        assert_eq!(discount_for_quantity(4).unwrap(), Discount::TEN_PERCENT);
        assert_eq!(discount_for_quantity(9).unwrap(), Discount::TEN_PERCENT);
        assert_eq!(discount_for_quantity(10).unwrap(), Discount::TWENTY_PERCENT);
        assert_eq!(discount_for_quantity(20).unwrap(), Discount::TWENTY_PERCENT);
    }

    #[test]
    fn test_over_limit_is_rejected() {
        let err = discount_for_quantity(21).unwrap_err();
        assert_eq!(
            err,
            CoreError::DomainRuleViolation(DomainRule::IdenticalItemLimit {
                requested: 21,
                max: 20
            })
        );
        assert!(discount_for_quantity(u32::MAX).is_err());
    }

    #[test]
    fn test_line_totals_at_ten_each() {
        let cases = [
            (3, dec!(0.00), dec!(30.00)),
            (4, dec!(0.10), dec!(36.00)),
            (10, dec!(0.20), dec!(80.00)),
            (20, dec!(0.20), dec!(160.00)),
        ];
        for (qty, discount, total) in cases {
            let price = line_total(qty, ten()).unwrap();
            assert_eq!(price.discount.fraction(), discount, "qty {}", qty);
            assert_eq!(price.total.amount(), total, "qty {}", qty);
        }
    }

    #[test]
    fn test_zero_quantity_is_free() {
        let price = line_total(0, ten()).unwrap();
        assert!(price.discount.is_none());
        assert!(price.total.is_zero());
    }

    #[test]
    fn test_line_total_overflow_is_an_error() {
        let err = line_total(2, Money::new(Decimal::MAX)).unwrap_err();
        assert_eq!(
            err,
            CoreError::AmountOverflow {
                context: "line total"
            }
        );

        let price = line_total(1, Money::new(Decimal::MAX)).unwrap();
        assert_eq!(price.total.amount(), Decimal::MAX);
    }

    #[test]
    fn test_discount_display() {
        assert_eq!(Discount::NONE.to_string(), "0%");
        assert_eq!(Discount::TEN_PERCENT.to_string(), "10%");
        assert_eq!(Discount::TWENTY_PERCENT.to_string(), "20%");
        assert_eq!(Discount::TEN_PERCENT.multiplier(), dec!(0.90));
    }
}

#[cfg(test)]
mod property_tests {
    use super::*;
    use proptest::prelude::*;

    fn unit_price() -> impl Strategy<Value = Money> {
        (0u32..=1_000_000u32).prop_map(|cents| Money::new(Decimal::new(cents as i64, 2)))
    }

    proptest! {
        #[test]
        fn prop_no_discount_below_four(qty in 0u32..=3, price in unit_price()) {
            let line = line_total(qty, price).unwrap();
            prop_assert_eq!(line.discount, Discount::NONE);
            prop_assert_eq!(line.total, price * qty);
        }

        #[test]
        fn prop_ten_percent_from_four_to_nine(qty in 4u32..=9, price in unit_price()) {
            let line = line_total(qty, price).unwrap();
            prop_assert_eq!(line.discount, Discount::TEN_PERCENT);
        }

        #[test]
        fn prop_twenty_percent_from_ten_to_twenty(qty in 10u32..=20, price in unit_price()) {
            let line = line_total(qty, price).unwrap();
            prop_assert_eq!(line.discount, Discount::TWENTY_PERCENT);
        }

        #[test]
        fn prop_rejected_above_twenty(qty in 21u32..=100_000, price in unit_price()) {
            let err = line_total(qty, price).unwrap_err();
            prop_assert!(err.is_domain_rule_violation());
        }

        #[test]
        fn prop_total_matches_formula(qty in 0u32..=20, price in unit_price()) {
            let line = line_total(qty, price).unwrap();
            let expected = Decimal::from(qty) * price.amount() * (Decimal::ONE - line.discount.fraction());
            prop_assert_eq!(line.total.amount(), expected);
        }
    }
}
