//! # Domain Types
//!
//! Catalogue types used alongside the cart.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐        ┌─────────────────┐                        │
//! │  │    Product      │        │     Rating      │                        │
//! │  │  ─────────────  │        │  ─────────────  │                        │
//! │  │  id (UUID)      │───────►│  rate (0..=5)   │  value object:         │
//! │  │  name           │        │  count          │  equal by value        │
//! │  │  price          │        └─────────────────┘                        │
//! │  │  category       │                                                    │
//! │  │  image (URL)    │──── to_line(qty) ────► CartLine (price frozen)    │
//! │  └─────────────────┘                                                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

use crate::cart::CartLine;
use crate::money::Money;

// =============================================================================
// Rating
// =============================================================================

/// Customer rating of a product.
///
/// Two ratings with the same rate and count are the same rating.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Rating {
    /// Average score, 0 to 5.
    #[ts(type = "string")]
    pub rate: Decimal,

    /// Number of reviews behind the average.
    pub count: u32,
}

impl Rating {
    pub const fn new(rate: Decimal, count: u32) -> Self {
        Rating { rate, count }
    }
}

// =============================================================================
// Product
// =============================================================================

/// A product available for sale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Product {
    /// Unique identifier (UUID v4).
    #[ts(as = "String")]
    pub id: Uuid,

    /// Display name (the catalogue "title").
    pub name: String,

    /// Current unit price.
    pub price: Money,

    pub description: String,

    /// Free-form category, at most 50 characters.
    pub category: String,

    /// Absolute URL of the product image.
    pub image: String,

    pub rating: Rating,
}

impl Product {
    /// Builds a cart line for `quantity` units at the current price.
    ///
    /// ## Price Freezing
    /// The price is captured at this moment. Later catalogue price changes
    /// do not affect the line.
    pub fn to_line(&self, quantity: u32) -> CartLine {
        CartLine::new(self.id, quantity, self.price)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
