//! # Validation Module
//!
//! Input validation for the Storefront core.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Caller boundary (CLI, request handlers)                      │
//! │  ├── Type validation (deserialization)                                 │
//! │  └── THIS MODULE: explicit checks, raw input → domain values           │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: Domain rules (cart, pricing)                                 │
//! │  └── DomainRuleViolation (e.g. more than 20 identical items)           │
//! │                                                                         │
//! │  Validators are plain functions. Nothing is registered globally.       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use storefront_core::validation::{validate_quantity, validate_uuid};
//!
//! let qty = validate_quantity(5).unwrap();
//! assert_eq!(qty, 5u32);
//!
//! assert!(validate_quantity(-1).is_err());
//! assert!(validate_uuid("not-a-uuid").is_err());
//! ```

use rust_decimal::Decimal;
use url::Url;
use uuid::Uuid;

use crate::error::ValidationError;
use crate::money::Money;
use crate::types::Product;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Longest category accepted for a product.
pub const MAX_CATEGORY_LEN: usize = 50;

/// Longest branch name accepted for a cart.
pub const MAX_BRANCH_NAME_LEN: usize = 100;

/// Highest unit price accepted at the boundary (one billion).
pub const MAX_UNIT_PRICE: Decimal = Decimal::from_parts(1_000_000_000, 0, 0, false, 0);

/// Highest rating score.
pub const MAX_RATING_RATE: Decimal = Decimal::from_parts(5, 0, 0, false, 0);

// =============================================================================
// Product Validation
// =============================================================================

/// Validates a product, reporting every failing rule.
///
/// ## Rules
/// - name, description, category and image are required
/// - price must be greater than 0 and at most `MAX_UNIT_PRICE`
/// - category must be at most 50 characters
/// - image must be an absolute URL
/// - rating rate must be between 0 and 5
pub fn validate_product(product: &Product) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if product.name.trim().is_empty() {
        errors.push(required("name"));
    }

    if product.description.trim().is_empty() {
        errors.push(required("description"));
    }

    if !product.price.is_positive() {
        errors.push(ValidationError::MustBePositive {
            field: "price".to_string(),
        });
    } else if product.price.amount() > MAX_UNIT_PRICE {
        errors.push(ValidationError::OutOfRange {
            field: "price".to_string(),
            min: "0".to_string(),
            max: MAX_UNIT_PRICE.to_string(),
        });
    }

    let category = product.category.trim();
    if category.is_empty() {
        errors.push(required("category"));
    } else if category.chars().count() > MAX_CATEGORY_LEN {
        errors.push(ValidationError::TooLong {
            field: "category".to_string(),
            max: MAX_CATEGORY_LEN,
        });
    }

    let image = product.image.trim();
    if image.is_empty() {
        errors.push(required("image"));
    } else if let Err(err) = Url::parse(image) {
        errors.push(ValidationError::InvalidFormat {
            field: "image".to_string(),
            reason: format!("must be an absolute URL ({})", err),
        });
    }

    let rate = product.rating.rate;
    if rate < Decimal::ZERO || rate > MAX_RATING_RATE {
        errors.push(ValidationError::OutOfRange {
            field: "rating.rate".to_string(),
            min: "0".to_string(),
            max: MAX_RATING_RATE.to_string(),
        });
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

// =============================================================================
// Cart Input Validators
// =============================================================================

/// Converts a raw quantity into a line quantity.
///
/// ## Rules
/// - Must not be negative
/// - Must fit a `u32`
///
/// The identical-item limit is NOT checked here: it is a domain rule and
/// surfaces as `DomainRuleViolation` when the line is priced.
///
/// ## User Workflow
/// ```text
/// request { quantity: -2 }
///       │
///       ▼
/// validate_quantity(-2) ← THIS FUNCTION
///       │
///       ├── qty < 0?        → Error: "quantity must not be negative"
///       ├── qty > u32::MAX? → Error: out of range
///       │
///       └── OK(u32) → CartLine::new(..)
/// ```
pub fn validate_quantity(qty: i64) -> ValidationResult<u32> {
    if qty < 0 {
        return Err(ValidationError::MustBeNonNegative {
            field: "quantity".to_string(),
        });
    }

    u32::try_from(qty).map_err(|_| ValidationError::OutOfRange {
        field: "quantity".to_string(),
        min: "0".to_string(),
        max: u32::MAX.to_string(),
    })
}

/// Validates a unit price.
///
/// ## Rules
/// - Must be non-negative (>= 0)
/// - Zero is allowed (free items)
/// - Must not exceed `MAX_UNIT_PRICE`
///
/// ## Example
/// ```rust
/// use rust_decimal::Decimal;
/// use storefront_core::validation::validate_unit_price;
///
/// assert!(validate_unit_price(Decimal::new(1099, 2)).is_ok());
/// assert!(validate_unit_price(Decimal::ZERO).is_ok());
/// assert!(validate_unit_price(Decimal::new(-1, 0)).is_err());
/// assert!(validate_unit_price(Decimal::MAX).is_err());
/// ```
pub fn validate_unit_price(price: Decimal) -> ValidationResult<Money> {
    if price < Decimal::ZERO {
        return Err(ValidationError::MustBeNonNegative {
            field: "unit price".to_string(),
        });
    }

    if price > MAX_UNIT_PRICE {
        return Err(ValidationError::OutOfRange {
            field: "unit price".to_string(),
            min: "0".to_string(),
            max: MAX_UNIT_PRICE.to_string(),
        });
    }

    Ok(Money::new(price))
}

/// Validates the branch a cart is sold from.
pub fn validate_branch_name(name: &str) -> ValidationResult<()> {
    let name = name.trim();

    if name.is_empty() {
        return Err(required("branch name"));
    }

    if name.chars().count() > MAX_BRANCH_NAME_LEN {
        return Err(ValidationError::TooLong {
            field: "branch name".to_string(),
            max: MAX_BRANCH_NAME_LEN,
        });
    }

    Ok(())
}

/// Parses a UUID string.
///
/// ## Example
/// ```rust
/// use storefront_core::validation::validate_uuid;
///
/// assert!(validate_uuid("550e8400-e29b-41d4-a716-446655440000").is_ok());
/// assert!(validate_uuid("not-a-uuid").is_err());
/// ```
pub fn validate_uuid(id: &str) -> ValidationResult<Uuid> {
    if id.trim().is_empty() {
        return Err(required("id"));
    }

    Uuid::parse_str(id.trim()).map_err(|_| ValidationError::InvalidFormat {
        field: "id".to_string(),
        reason: "must be a valid UUID".to_string(),
    })
}

fn required(field: &str) -> ValidationError {
    ValidationError::Required {
        field: field.to_string(),
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
