//! # storefront-core: Cart Pricing for the Storefront Back-Office
//!
//! This crate contains the cart pricing engine as pure functions and
//! in-memory aggregates with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Storefront Architecture                             │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │         Callers (cart-quote CLI, request handlers, jobs)        │   │
//! │  │    validate input ──► build lines ──► add to cart ──► view      │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │            ★ storefront-core (THIS CRATE) ★                     │   │
//! │  │                                                                 │   │
//! │  │   ┌──────────┐ ┌──────────┐ ┌──────────┐ ┌──────────┐ ┌──────┐ │   │
//! │  │   │  money   │ │ pricing  │ │   cart   │ │validation│ │ view │ │   │
//! │  │   │  Money   │ │ Discount │ │   Cart   │ │  rules   │ │ join │ │   │
//! │  │   │          │ │  tiers   │ │ CartLine │ │  checks  │ │names │ │   │
//! │  │   └──────────┘ └──────────┘ └──────────┘ └──────────┘ └──────┘ │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │        Persistence / transactions (outside this workspace)      │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`money`] - Money type over fixed-point decimals (no floating point!)
//! - [`pricing`] - Quantity tier discounts and the line total formula
//! - [`cart`] - Cart aggregate and cart lines
//! - [`types`] - Catalogue types (Product, Rating)
//! - [`validation`] - Explicit input validation
//! - [`view`] - Read-only cart snapshots joined with display names
//! - [`error`] - Domain error types
//!
//! ## Example Usage
//!
//! ```rust
//! use rust_decimal::Decimal;
//! use storefront_core::{Cart, CartLine, CoreError, Money};
//! use uuid::Uuid;
//!
//! let unit_price = Money::new(Decimal::new(1000, 2)); // 10.00
//! let mut cart = Cart::new(Uuid::new_v4());
//!
//! // 4 identical items earn 10% off: 4 × 10.00 × 0.90 = 36.00
//! cart.add_line(CartLine::new(Uuid::new_v4(), 4, unit_price)).unwrap();
//! assert_eq!(cart.total_amount().amount(), Decimal::new(3600, 2));
//!
//! // More than 20 identical items is a business rule violation
//! let err = cart.add_line(CartLine::new(Uuid::new_v4(), 21, unit_price)).unwrap_err();
//! assert!(matches!(err, CoreError::DomainRuleViolation(_)));
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod cart;
pub mod error;
pub mod money;
pub mod pricing;
pub mod types;
pub mod validation;
pub mod view;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use cart::{Cart, CartLine};
pub use error::{CoreError, CoreResult, DomainRule, ValidationError};
pub use money::Money;
pub use pricing::Discount;
pub use types::*;
pub use view::{CartTotals, CartView, DisplayNames};

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Maximum number of identical items in a single cart line.
///
/// ## Business Reason
/// Wholesale-sized orders go through a different channel; anything above
/// this is rejected as a `DomainRuleViolation`, never clamped.
pub const MAX_IDENTICAL_ITEMS: u32 = 20;
