//! # Cart Aggregate
//!
//! The cart and its lines. A line prices itself from its quantity and unit
//! price; the cart owns its lines and keeps `total_amount` equal to the sum
//! of their totals.
//!
//! ## Operations Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart Operations                                      │
//! │                                                                         │
//! │  Caller                    Cart                      CartLine           │
//! │  ──────                    ────                      ────────           │
//! │                                                                         │
//! │  add_line(line) ─────────► line.compute_total_price() ──► tier lookup  │
//! │                                  │                                      │
//! │                                  ├── Err ──► return, cart untouched     │
//! │                                  │                                      │
//! │                                  └── Ok ──► checked_total(lines + line) │
//! │                                             lines.push(line)            │
//! │                                                                         │
//! │  set_line_quantity() ────► copy.set_quantity(q) ──► checked_total()     │
//! │                                                                         │
//! │  cancel() ───────────────► is_cancelled = true (lines/total untouched) │
//! │                                                                         │
//! │  NOTE: total_amount is always summed from scratch over every line,     │
//! │        before anything is mutated.                                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::iter;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;
use ts_rs::TS;
use uuid::Uuid;

use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::pricing::{self, Discount};

// =============================================================================
// Cart Line
// =============================================================================

/// A single product line within a cart.
///
/// ## Invariants
/// - `discount` is derived from `quantity` by the tier table
/// - once priced, `total_price == quantity × unit_price × (1 − discount)`
/// - `quantity` and `unit_price` only change through setters that re-price
///
/// A line built with [`CartLine::new`] is unpriced (zero discount and total)
/// until [`CartLine::compute_total_price`] runs. [`Cart::add_line`] always
/// prices a line before it counts towards the cart total.
///
/// Deserializing re-prices the line: `discount` and `totalPrice` in the input
/// are ignored, and an over-limit quantity is rejected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase", try_from = "CartLineRecord")]
#[ts(export)]
pub struct CartLine {
    #[ts(as = "String")]
    product_id: Uuid,
    quantity: u32,
    unit_price: Money,
    discount: Discount,
    total_price: Money,
}

impl CartLine {
    /// Creates an unpriced line.
    pub fn new(product_id: Uuid, quantity: u32, unit_price: Money) -> Self {
        CartLine {
            product_id,
            quantity,
            unit_price,
            discount: Discount::NONE,
            total_price: Money::zero(),
        }
    }

    /// Creates a line and prices it immediately.
    ///
    /// ## Example
    /// ```rust
    /// use rust_decimal::Decimal;
    /// use storefront_core::{CartLine, Money};
    /// use uuid::Uuid;
    ///
    /// let line = CartLine::priced(Uuid::new_v4(), 4, Money::new(Decimal::new(1000, 2))).unwrap();
    /// assert_eq!(line.total_price().amount(), Decimal::new(3600, 2));
    /// ```
    pub fn priced(product_id: Uuid, quantity: u32, unit_price: Money) -> CoreResult<Self> {
        let mut line = CartLine::new(product_id, quantity, unit_price);
        line.compute_total_price()?;
        Ok(line)
    }

    /// Derives `discount` and `total_price` from the current quantity and
    /// unit price.
    ///
    /// ## Errors
    /// `CoreError::DomainRuleViolation` when the quantity is above the
    /// identical-item limit, `CoreError::AmountOverflow` when the total does
    /// not fit. The previous discount and total are kept.
    pub fn compute_total_price(&mut self) -> CoreResult<()> {
        let price = pricing::line_total(self.quantity, self.unit_price)?;
        self.discount = price.discount;
        self.total_price = price.total;
        Ok(())
    }

    /// Changes the quantity and re-prices the line.
    ///
    /// If the new quantity is rejected, the old quantity is restored so the
    /// line keeps satisfying its pricing invariant.
    pub fn set_quantity(&mut self, quantity: u32) -> CoreResult<()> {
        let previous = self.quantity;
        self.quantity = quantity;

        if let Err(err) = self.compute_total_price() {
            self.quantity = previous;
            return Err(err);
        }

        Ok(())
    }

    /// Changes the unit price and re-prices the line.
    pub fn set_unit_price(&mut self, unit_price: Money) -> CoreResult<()> {
        let previous = self.unit_price;
        self.unit_price = unit_price;

        if let Err(err) = self.compute_total_price() {
            self.unit_price = previous;
            return Err(err);
        }

        Ok(())
    }

    pub fn product_id(&self) -> Uuid {
        self.product_id
    }

    pub fn quantity(&self) -> u32 {
        self.quantity
    }

    pub fn unit_price(&self) -> Money {
        self.unit_price
    }

    pub fn discount(&self) -> Discount {
        self.discount
    }

    pub fn total_price(&self) -> Money {
        self.total_price
    }

    /// Quantity × unit price, before discount.
    ///
    /// Always in range for a priced line, since pricing checks the same
    /// product.
    pub fn gross_amount(&self) -> Money {
        self.unit_price.multiply_quantity(self.quantity)
    }

    /// How much the tier discount took off this line.
    pub fn discount_amount(&self) -> Money {
        self.gross_amount() - self.total_price
    }
}

/// Wire form of a line. Only the inputs are read; the rest is re-derived.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct CartLineRecord {
    product_id: Uuid,
    quantity: u32,
    unit_price: Money,
}

impl TryFrom<CartLineRecord> for CartLine {
    type Error = CoreError;

    fn try_from(record: CartLineRecord) -> CoreResult<Self> {
        CartLine::priced(record.product_id, record.quantity, record.unit_price)
    }
}

// =============================================================================
// Cart
// =============================================================================

/// An order in progress.
///
/// ## Invariants
/// - `total_amount == Σ line.total_price`
/// - `is_cancelled` only ever goes from false to true
/// - lines are appended in order and never removed here (removal belongs to
///   the persistence layer)
///
/// Deserializing re-prices every line and recomputes `totalAmount`; a stored
/// total is never trusted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase", try_from = "CartRecord")]
#[ts(export)]
pub struct Cart {
    #[ts(as = "String")]
    id: Uuid,
    number: String,
    #[ts(as = "String")]
    created_at: DateTime<Utc>,
    #[ts(as = "String")]
    user_id: Uuid,
    branch_name: String,
    total_amount: Money,
    lines: Vec<CartLine>,
    is_cancelled: bool,
}

impl Cart {
    /// Creates a new empty cart owned by `user_id`.
    pub fn new(user_id: Uuid) -> Self {
        Cart {
            id: Uuid::new_v4(),
            number: String::new(),
            created_at: Utc::now(),
            user_id,
            branch_name: String::new(),
            total_amount: Money::zero(),
            lines: Vec::new(),
            is_cancelled: false,
        }
    }

    /// Creates a cart from an initial set of lines.
    ///
    /// All-or-nothing: the first line that fails pricing aborts creation.
    pub fn with_lines<I>(user_id: Uuid, lines: I) -> CoreResult<Self>
    where
        I: IntoIterator<Item = CartLine>,
    {
        let mut cart = Cart::new(user_id);
        for line in lines {
            cart.add_line(line)?;
        }
        Ok(cart)
    }

    /// Sets the business cart number.
    pub fn with_number(mut self, number: impl Into<String>) -> Self {
        self.number = number.into();
        self
    }

    /// Sets the branch the cart is sold from.
    pub fn with_branch_name(mut self, branch_name: impl Into<String>) -> Self {
        self.branch_name = branch_name.into();
        self
    }

    /// Overrides the creation timestamp (e.g. when rebuilding a stored cart).
    pub fn with_created_at(mut self, created_at: DateTime<Utc>) -> Self {
        self.created_at = created_at;
        self
    }

    /// Prices `line`, appends it and recomputes the cart total.
    ///
    /// ## Errors
    /// Propagates the line's `DomainRuleViolation`, or `AmountOverflow` when
    /// the line or the new cart total does not fit. On error the line is
    /// dropped and neither `lines` nor `total_amount` change.
    ///
    /// ## Example
    /// ```rust
    /// use rust_decimal::Decimal;
    /// use storefront_core::{Cart, CartLine, Money};
    /// use uuid::Uuid;
    ///
    /// let ten = Money::new(Decimal::new(1000, 2));
    /// let mut cart = Cart::new(Uuid::new_v4());
    ///
    /// cart.add_line(CartLine::new(Uuid::new_v4(), 3, ten)).unwrap();
    /// cart.add_line(CartLine::new(Uuid::new_v4(), 10, ten)).unwrap();
    /// assert_eq!(cart.total_amount().amount(), Decimal::new(11000, 2));
    ///
    /// assert!(cart.add_line(CartLine::new(Uuid::new_v4(), 21, ten)).is_err());
    /// assert_eq!(cart.line_count(), 2);
    /// ```
    pub fn add_line(&mut self, mut line: CartLine) -> CoreResult<()> {
        let priced = line
            .compute_total_price()
            .and_then(|()| checked_total(self.lines.iter().chain(iter::once(&line))));

        let total_amount = match priced {
            Ok(total_amount) => total_amount,
            Err(err) => {
                debug!(
                    cart_id = %self.id,
                    product_id = %line.product_id,
                    quantity = line.quantity,
                    error = %err,
                    "cart line rejected"
                );
                return Err(err);
            }
        };

        debug!(
            cart_id = %self.id,
            product_id = %line.product_id,
            quantity = line.quantity,
            discount = %line.discount,
            total_price = %line.total_price,
            "cart line added"
        );

        self.lines.push(line);
        self.total_amount = total_amount;
        Ok(())
    }

    /// Changes the quantity of the line for `product_id` and recomputes the
    /// cart total.
    ///
    /// Only the first line for the product is changed. On error the cart is
    /// left as it was.
    pub fn set_line_quantity(&mut self, product_id: Uuid, quantity: u32) -> CoreResult<()> {
        let index = self
            .lines
            .iter()
            .position(|l| l.product_id == product_id)
            .ok_or(CoreError::LineNotFound { product_id })?;

        let mut updated = self.lines[index].clone();
        updated.set_quantity(quantity)?;

        let total_amount = checked_total(
            self.lines
                .iter()
                .enumerate()
                .map(|(i, line)| if i == index { &updated } else { line }),
        )?;

        self.lines[index] = updated;
        self.total_amount = total_amount;
        Ok(())
    }

    /// Cancels the cart. Calling it again changes nothing.
    pub fn cancel(&mut self) {
        if !self.is_cancelled {
            debug!(cart_id = %self.id, "cart cancelled");
        }
        self.is_cancelled = true;
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn number(&self) -> &str {
        &self.number
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn user_id(&self) -> Uuid {
        self.user_id
    }

    pub fn branch_name(&self) -> &str {
        &self.branch_name
    }

    pub fn total_amount(&self) -> Money {
        self.total_amount
    }

    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    pub fn is_cancelled(&self) -> bool {
        self.is_cancelled
    }

    /// Returns the first line for `product_id`, if any.
    pub fn find_line(&self, product_id: Uuid) -> Option<&CartLine> {
        self.lines.iter().find(|l| l.product_id == product_id)
    }

    /// Returns the number of lines in the cart.
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Returns the total quantity across all lines.
    pub fn total_quantity(&self) -> u64 {
        self.lines.iter().map(|l| u64::from(l.quantity)).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

/// Sums line totals from scratch.
///
/// Gross amounts are summed too, so that every cart that exists can also be
/// summarised without overflowing.
fn checked_total<'a, I>(lines: I) -> CoreResult<Money>
where
    I: IntoIterator<Item = &'a CartLine>,
{
    let overflow = || CoreError::AmountOverflow {
        context: "cart total",
    };

    let mut total = Money::zero();
    let mut gross = Money::zero();
    for line in lines {
        total = total.checked_add(line.total_price).ok_or_else(overflow)?;
        gross = gross.checked_add(line.gross_amount()).ok_or_else(overflow)?;
    }
    Ok(total)
}

/// Wire form of a cart. `totalAmount` is not read.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct CartRecord {
    id: Uuid,
    #[serde(default)]
    number: String,
    created_at: DateTime<Utc>,
    user_id: Uuid,
    #[serde(default)]
    branch_name: String,
    #[serde(default)]
    lines: Vec<CartLine>,
    #[serde(default)]
    is_cancelled: bool,
}

impl TryFrom<CartRecord> for Cart {
    type Error = CoreError;

    fn try_from(record: CartRecord) -> CoreResult<Self> {
        let total_amount = checked_total(&record.lines)?;

        Ok(Cart {
            id: record.id,
            number: record.number,
            created_at: record.created_at,
            user_id: record.user_id,
            branch_name: record.branch_name,
            total_amount,
            lines: record.lines,
            is_cancelled: record.is_cancelled,
        })
    }
}

// =============================================================================
// Unit Tests
// =============================================================================


#[cfg(test)]
mod property_tests {
    use super::*;
    use proptest::prelude::*;
    use rust_decimal::Decimal;

    proptest! {
        #[test]
        fn prop_total_is_sum_of_lines(
            lines in prop::collection::vec((0u32..=30, 0u32..=100_000u32), 0..=25)
        ) {
            let mut cart = Cart::new(Uuid::new_v4());
            for (qty, cents) in lines {
                let line = CartLine::new(Uuid::new_v4(), qty, Money::new(Decimal::new(cents as i64, 2)));
                let before = cart.clone();
                if cart.add_line(line).is_err() {
                    prop_assert_eq!(&cart, &before);
                }
                let expected: Money = cart.lines().iter().map(CartLine::total_price).sum();
                prop_assert_eq!(cart.total_amount(), expected);
            }
        }
    }
}
