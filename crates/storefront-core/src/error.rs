//! # Error Types
//!
//! Domain-specific error types for storefront-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  storefront-core errors (this file)                                    │
//! │  ├── CoreError        - Domain errors returned by cart operations      │
//! │  │   └── DomainRule   - Which business invariant was broken            │
//! │  └── ValidationError  - Input validation failures                      │
//! │                                                                         │
//! │  cart-quote errors (separate crate)                                    │
//! │  └── QuoteError       - What the CLI reports (exit codes)              │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → QuoteError → stderr               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (quantity, product ID, etc.)
//! 3. Errors are enum variants, never String
//! 4. Domain rule violations are final: callers fix the input, never retry

use thiserror::Error;
use uuid::Uuid;

// =============================================================================
// Domain Rules
// =============================================================================

/// A business invariant that rejected an operation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainRule {
    /// A single product line asked for more identical items than allowed.
    ///
    /// ## User Workflow
    /// ```text
    /// Add line (qty: 21)
    ///      │
    ///      ▼
    /// compute_total_price()
    ///      │
    ///      ▼
    /// IdenticalItemLimit { requested: 21, max: 20 }
    ///      │
    ///      ▼
    /// UI shows: "reduce quantity to 20 or fewer"
    /// ```
    #[error("cannot sell more than {max} identical items of a single product line (requested {requested})")]
    IdenticalItemLimit { requested: u32, max: u32 },
}

// =============================================================================
// Core Error
// =============================================================================

/// Core business logic errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    /// A business rule was violated.
    ///
    /// Raised synchronously and never recovered inside the core.
    #[error("Domain rule violated: {0}")]
    DomainRuleViolation(DomainRule),

    /// The cart has no line for the given product.
    #[error("Cart has no line for product {product_id}")]
    LineNotFound { product_id: Uuid },

    /// A price, line total or cart total does not fit the decimal range.
    ///
    /// Nothing is changed when this is returned.
    #[error("Amount too large while computing the {context}")]
    AmountOverflow { context: &'static str },

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

impl CoreError {
    /// Shorthand for the identical-item limit violation.
    pub fn identical_item_limit(requested: u32, max: u32) -> Self {
        CoreError::DomainRuleViolation(DomainRule::IdenticalItemLimit { requested, max })
    }

    /// Returns true for business rule violations.
    pub fn is_domain_rule_violation(&self) -> bool {
        matches!(self, CoreError::DomainRuleViolation(_))
    }
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These errors occur when caller input doesn't meet requirements.
/// Used for early validation before business logic runs.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Value must be strictly positive.
    #[error("{field} must be greater than 0")]
    MustBePositive { field: String },

    /// Value must not be negative.
    #[error("{field} must not be negative")]
    MustBeNonNegative { field: String },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange {
        field: String,
        min: String,
        max: String,
    },

    /// Invalid format (e.g., invalid UUID, relative URL).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================
