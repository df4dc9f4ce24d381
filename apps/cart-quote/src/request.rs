//! # Quote Requests
//!
//! JSON input for the CLI and its conversion into a priced cart.
//!
//! ```json
//! {
//!   "userId": "550e8400-e29b-41d4-a716-446655440000",
//!   "userName": "Maria Souza",
//!   "number": "CART-0001",
//!   "branchName": "Downtown",
//!   "lines": [
//!     { "productId": "…", "productName": "Guarana 2L", "quantity": 4, "unitPrice": "10.00" }
//!   ]
//! }
//! ```
//!
//! Raw values are typed loosely (`String` IDs, signed quantities) so that bad
//! input reaches the core validators and gets a precise message instead of a
//! generic deserialization error.

use rust_decimal::Decimal;
use serde::Deserialize;
use storefront_core::validation::{
    validate_branch_name, validate_quantity, validate_unit_price, validate_uuid,
};
use storefront_core::view::NameTable;
use storefront_core::{Cart, CartLine, CartView, CoreError};
use tracing::debug;

use crate::config::QuoteConfig;
use crate::error::QuoteError;

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteRequest {
    pub user_id: String,
    #[serde(default)]
    pub user_name: Option<String>,
    #[serde(default)]
    pub number: Option<String>,
    #[serde(default)]
    pub branch_name: Option<String>,
    #[serde(default)]
    pub lines: Vec<QuoteLine>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteLine {
    pub product_id: String,
    #[serde(default)]
    pub product_name: Option<String>,
    pub quantity: i64,
    /// Accepts a JSON string (`"10.00"`, exact) or number.
    pub unit_price: Decimal,
}

/// A priced cart plus the display names that came with the request.
#[derive(Debug, Clone)]
pub struct Quote {
    pub cart: Cart,
    pub names: NameTable,
}

impl Quote {
    pub fn view(&self) -> CartView {
        CartView::build(&self.cart, &self.names)
    }
}

impl QuoteRequest {
    /// Parses a request from JSON text.
    pub fn from_json(raw: &str) -> Result<Self, QuoteError> {
        Ok(serde_json::from_str(raw)?)
    }

    /// Validates the request and prices it line by line.
    ///
    /// Stops at the first failing line; the error carries its 1-based
    /// position.
    pub fn into_quote(self, config: &QuoteConfig) -> Result<Quote, QuoteError> {
        let user_id = validate_uuid(&self.user_id).map_err(CoreError::from)?;

        let branch_name = self
            .branch_name
            .as_deref()
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .unwrap_or(&config.branch_name)
            .to_string();
        validate_branch_name(&branch_name).map_err(CoreError::from)?;

        let mut cart = Cart::new(user_id).with_branch_name(branch_name);
        if let Some(number) = self.number {
            cart = cart.with_number(number);
        }

        let mut names = NameTable::new();
        if let Some(user_name) = self.user_name {
            names.insert_customer(user_id, user_name);
        }

        for (index, raw) in self.lines.into_iter().enumerate() {
            let at = |source: CoreError| QuoteError::Line {
                line: index + 1,
                source,
            };

            let product_id = validate_uuid(&raw.product_id).map_err(|e| at(e.into()))?;
            let quantity = validate_quantity(raw.quantity).map_err(|e| at(e.into()))?;
            let unit_price = validate_unit_price(raw.unit_price).map_err(|e| at(e.into()))?;

            cart.add_line(CartLine::new(product_id, quantity, unit_price))
                .map_err(at)?;

            if let Some(name) = raw.product_name {
                names.insert_product(product_id, name);
            }
        }

        debug!(
            cart_id = %cart.id(),
            lines = cart.line_count(),
            total_amount = %cart.total_amount(),
            "quote priced"
        );

        Ok(Quote { cart, names })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use storefront_core::{Discount, DomainRule, ValidationError};

    const USER: &str = "550e8400-e29b-41d4-a716-446655440000";
    const COLA: &str = "6f1c1d52-8f0e-4c55-9d2a-0d3f6b1a7e01";
    const CHIPS: &str = "a3b2c1d0-1111-4a2b-8c3d-222233334444";

    fn request(lines: &str) -> QuoteRequest {
        QuoteRequest::from_json(&format!(
            r#"{{ "userId": "{USER}", "userName": "Maria Souza", "lines": [{lines}] }}"#
        ))
        .unwrap()
    }

    #[test]
    fn test_prices_every_line() {
        let quote = request(&format!(
            r#"{{ "productId": "{COLA}", "productName": "Guarana 2L", "quantity": 4, "unitPrice": "10.00" }},
               {{ "productId": "{CHIPS}", "quantity": 10, "unitPrice": 2.5 }}"#
        ))
        .into_quote(&QuoteConfig::default())
        .unwrap();

        assert_eq!(quote.cart.line_count(), 2);
        assert_eq!(quote.cart.branch_name(), "Main");
        assert_eq!(quote.cart.lines()[0].discount(), Discount::TEN_PERCENT);
        assert_eq!(quote.cart.total_amount().amount(), dec!(56.00));

        let view = quote.view();
        assert_eq!(view.user_name, "Maria Souza");
        assert_eq!(view.lines[0].product_name, "Guarana 2L");
        assert_eq!(view.lines[1].product_name, "");
    }

    #[test]
    fn test_request_branch_overrides_config() {
        let mut req = request("");
        req.branch_name = Some("Downtown".to_string());
        req.number = Some("CART-0001".to_string());

        let quote = req.into_quote(&QuoteConfig::default()).unwrap();
        assert_eq!(quote.cart.branch_name(), "Downtown");
        assert_eq!(quote.cart.number(), "CART-0001");
        assert!(quote.cart.is_empty());
    }

    #[test]
    fn test_limit_is_reported_with_line_number() {
        let err = request(&format!(
            r#"{{ "productId": "{COLA}", "quantity": 1, "unitPrice": "1" }},
               {{ "productId": "{CHIPS}", "quantity": 21, "unitPrice": "1" }}"#
        ))
        .into_quote(&QuoteConfig::default())
        .unwrap_err();

        match err {
            QuoteError::Line {
                line: 2,
                source: CoreError::DomainRuleViolation(DomainRule::IdenticalItemLimit { requested, max }),
            } => {
                assert_eq!(requested, 21);
                assert_eq!(max, 20);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_negative_quantity_is_a_validation_error() {
        let err = request(&format!(
            r#"{{ "productId": "{COLA}", "quantity": -1, "unitPrice": "1" }}"#
        ))
        .into_quote(&QuoteConfig::default())
        .unwrap_err();

        assert_eq!(err.exit_code(), crate::error::EXIT_INVALID_INPUT);
        assert!(matches!(
            err,
            QuoteError::Line {
                line: 1,
                source: CoreError::Validation(ValidationError::MustBeNonNegative { .. })
            }
        ));
    }

    #[test]
    fn test_huge_unit_price_is_a_validation_error() {
        let err = request(&format!(
            r#"{{ "productId": "{COLA}", "quantity": 2, "unitPrice": "79228162514264337593543950335" }}"#
        ))
        .into_quote(&QuoteConfig::default())
        .unwrap_err();

        assert_eq!(err.exit_code(), crate::error::EXIT_INVALID_INPUT);
        assert!(matches!(
            err,
            QuoteError::Line {
                line: 1,
                source: CoreError::Validation(ValidationError::OutOfRange { .. })
            }
        ));
    }

    #[test]
    fn test_bad_user_id() {
        let req = QuoteRequest::from_json(r#"{ "userId": "nope", "lines": [] }"#).unwrap();
        let err = req.into_quote(&QuoteConfig::default()).unwrap_err();
        assert!(matches!(err, QuoteError::Core(CoreError::Validation(_))));
    }

    #[test]
    fn test_malformed_json() {
        assert!(matches!(
            QuoteRequest::from_json("{ not json"),
            Err(QuoteError::Json(_))
        ));
    }

    #[test]
    fn test_sample_fixture_parses() {
        let raw = include_str!("../fixtures/sample-quote.json");
        let quote = QuoteRequest::from_json(raw)
            .unwrap()
            .into_quote(&QuoteConfig::default())
            .unwrap();

        assert_eq!(quote.cart.line_count(), 3);
        assert_eq!(quote.cart.total_amount().amount(), dec!(110.00));
    }
}
