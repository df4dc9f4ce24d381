//! # Cart Views
//!
//! Read-only snapshots of a priced cart for display.
//!
//! Display names (product names, the customer's name) are not stored on the
//! cart. The caller resolves them after pricing through [`DisplayNames`],
//! usually backed by its catalogue and customer stores.
//!
//! ```text
//! Cart (priced) ──┐
//!                 ├──► CartView::build() ──► { lines[productName..], userName, totals }
//! DisplayNames ───┘
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use ts_rs::TS;
use uuid::Uuid;

use crate::cart::{Cart, CartLine};
use crate::money::Money;
use crate::pricing::Discount;

// =============================================================================
// Name Lookup
// =============================================================================

/// Resolves display names for entities the cart only references by ID.
pub trait DisplayNames {
    fn product_name(&self, product_id: Uuid) -> Option<String>;

    fn customer_name(&self, user_id: Uuid) -> Option<String>;
}

/// In-memory name table, handy for callers that already loaded the names.
#[derive(Debug, Clone, Default)]
pub struct NameTable {
    products: HashMap<Uuid, String>,
    customers: HashMap<Uuid, String>,
}

impl NameTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert_product(&mut self, product_id: Uuid, name: impl Into<String>) {
        self.products.insert(product_id, name.into());
    }

    pub fn insert_customer(&mut self, user_id: Uuid, name: impl Into<String>) {
        self.customers.insert(user_id, name.into());
    }
}

impl DisplayNames for NameTable {
    fn product_name(&self, product_id: Uuid) -> Option<String> {
        self.products.get(&product_id).cloned()
    }

    fn customer_name(&self, user_id: Uuid) -> Option<String> {
        self.customers.get(&user_id).cloned()
    }
}

// =============================================================================
// Totals
// =============================================================================

/// Cart totals summary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CartTotals {
    pub line_count: usize,
    pub total_quantity: u64,
    /// Σ quantity × unit price, before discounts.
    pub gross_amount: Money,
    pub discount_amount: Money,
    pub total_amount: Money,
}

impl From<&Cart> for CartTotals {
    fn from(cart: &Cart) -> Self {
        let gross_amount: Money = cart.lines().iter().map(CartLine::gross_amount).sum();

        CartTotals {
            line_count: cart.line_count(),
            total_quantity: cart.total_quantity(),
            gross_amount,
            discount_amount: gross_amount - cart.total_amount(),
            total_amount: cart.total_amount(),
        }
    }
}

// =============================================================================
// Views
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CartLineView {
    #[ts(as = "String")]
    pub product_id: Uuid,
    /// Empty when the lookup had no name for the product.
    pub product_name: String,
    pub quantity: u32,
    pub unit_price: Money,
    pub discount: Discount,
    pub total_price: Money,
}

/// A priced cart joined with display names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CartView {
    #[ts(as = "String")]
    pub id: Uuid,
    pub number: String,
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
    #[ts(as = "String")]
    pub user_id: Uuid,
    pub user_name: String,
    pub branch_name: String,
    pub is_cancelled: bool,
    pub lines: Vec<CartLineView>,
    pub totals: CartTotals,
}

impl CartView {
    /// Joins `cart` with the names from `names`. Never touches the cart.
    pub fn build<N: DisplayNames + ?Sized>(cart: &Cart, names: &N) -> Self {
        let lines = cart
            .lines()
            .iter()
            .map(|line| CartLineView {
                product_id: line.product_id(),
                product_name: names.product_name(line.product_id()).unwrap_or_default(),
                quantity: line.quantity(),
                unit_price: line.unit_price(),
                discount: line.discount(),
                total_price: line.total_price(),
            })
            .collect();

        CartView {
            id: cart.id(),
            number: cart.number().to_string(),
            created_at: cart.created_at(),
            user_id: cart.user_id(),
            user_name: names.customer_name(cart.user_id()).unwrap_or_default(),
            branch_name: cart.branch_name().to_string(),
            is_cancelled: cart.is_cancelled(),
            lines,
            totals: CartTotals::from(cart),
        }
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
    fn test_totals() {
        let ten = Money::new(dec!(10.00));
        let mut cart = Cart::new(Uuid::new_v4());
        cart.add_line(CartLine::new(Uuid::new_v4(), 3, ten)).unwrap();
        cart.add_line(CartLine::new(Uuid::new_v4(), 10, ten)).unwrap();

        let totals = CartTotals::from(&cart);
        assert_eq!(totals.line_count, 2);
        assert_eq!(totals.total_quantity, 13);
        assert_eq!(totals.gross_amount.amount(), dec!(130.00));
        assert_eq!(totals.discount_amount.amount(), dec!(20.00));
        assert_eq!(totals.total_amount.amount(), dec!(110.00));
    }

    #[test]
    fn test_build_joins_names() {
        let user_id = Uuid::new_v4();
        let known = Uuid::new_v4();
        let unknown = Uuid::new_v4();

        let mut cart = Cart::new(user_id).with_branch_name("Downtown");
        cart.add_line(CartLine::new(known, 4, Money::new(dec!(10.00))))
            .unwrap();
        cart.add_line(CartLine::new(unknown, 1, Money::new(dec!(2.50))))
            .unwrap();
        let before = cart.clone();

        let mut names = NameTable::new();
        names.insert_product(known, "Guarana 2L");
        names.insert_customer(user_id, "Maria Souza");

        let view = CartView::build(&cart, &names);
        assert_eq!(cart, before);

        assert_eq!(view.user_name, "Maria Souza");
        assert_eq!(view.branch_name, "Downtown");
        assert_eq!(view.lines[0].product_name, "Guarana 2L");
        assert_eq!(view.lines[0].discount, Discount::TEN_PERCENT);
        assert_eq!(view.lines[0].total_price.amount(), dec!(36.00));
        assert_eq!(view.lines[1].product_name, "");
        assert_eq!(view.totals.total_amount.amount(), dec!(38.50));
    }

    #[test]
    fn test_view_json_shape() {
        let cart = Cart::new(Uuid::nil());
        let view = CartView::build(&cart, &NameTable::new());
        let json = serde_json::to_value(&view).unwrap();

        assert_eq!(json["userId"], "00000000-0000-0000-0000-000000000000");
        assert_eq!(json["userName"], "");
        assert_eq!(json["totals"]["lineCount"], 0);
        assert_eq!(json["totals"]["totalAmount"], "0");
    }
}
