//! # Quote Configuration
//!
//! Configuration is loaded from environment variables with fallback to
//! defaults.
//!
//! ## Environment Variables
//! | Variable                        | Default  | Meaning                      |
//! |---------------------------------|----------|------------------------------|
//! | `STOREFRONT_BRANCH_NAME`        | `Main`   | Branch when the request has none |
//! | `STOREFRONT_CURRENCY_SYMBOL`    | `$`      | Receipt currency symbol      |
//! | `STOREFRONT_CURRENCY_DECIMALS`  | `2`      | Receipt decimal places (0-8) |
//! | `STOREFRONT_LOG_FORMAT`         | `pretty` | `pretty` or `json`           |
//!
//! `RUST_LOG` controls log filtering (see `main.rs`).

use std::str::FromStr;

use rust_decimal::{Decimal, RoundingStrategy};
use storefront_core::Money;

/// Highest number of decimal places a receipt may show.
const MAX_CURRENCY_DECIMALS: u32 = 8;

/// Log output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    /// Human-readable, for terminals.
    #[default]
    Pretty,
    /// One JSON object per event, for log shippers.
    Json,
}

impl FromStr for LogFormat {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "pretty" | "text" => Ok(LogFormat::Pretty),
            "json" => Ok(LogFormat::Json),
            _ => Err(ConfigError::InvalidValue("STOREFRONT_LOG_FORMAT".to_string())),
        }
    }
}

/// CLI configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuoteConfig {
    /// Branch used when the request doesn't name one.
    pub branch_name: String,

    /// Currency symbol (for display)
    pub currency_symbol: String,

    /// Number of decimal places for currency
    pub currency_decimals: u32,

    pub log_format: LogFormat,
}

impl Default for QuoteConfig {
    fn default() -> Self {
        QuoteConfig {
            branch_name: "Main".to_string(),
            currency_symbol: "$".to_string(),
            currency_decimals: 2,
            log_format: LogFormat::Pretty,
        }
    }
}

impl QuoteConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration from any key lookup (the environment in production,
    /// a map in tests).
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = QuoteConfig::default();

        if let Some(branch_name) = lookup("STOREFRONT_BRANCH_NAME") {
            let branch_name = branch_name.trim();
            if branch_name.is_empty() {
                return Err(ConfigError::InvalidValue(
                    "STOREFRONT_BRANCH_NAME".to_string(),
                ));
            }
            config.branch_name = branch_name.to_string();
        }

        if let Some(symbol) = lookup("STOREFRONT_CURRENCY_SYMBOL") {
            config.currency_symbol = symbol;
        }

        if let Some(decimals) = lookup("STOREFRONT_CURRENCY_DECIMALS") {
            config.currency_decimals = decimals
                .trim()
                .parse::<u32>()
                .ok()
                .filter(|d| *d <= MAX_CURRENCY_DECIMALS)
                .ok_or_else(|| {
                    ConfigError::InvalidValue("STOREFRONT_CURRENCY_DECIMALS".to_string())
                })?;
        }

        if let Some(format) = lookup("STOREFRONT_LOG_FORMAT") {
            config.log_format = format.parse()?;
        }

        Ok(config)
    }

    /// Formats an amount for the receipt.
    ///
    /// Rounding (half to even) happens here, for display only; the cart
    /// keeps full decimal precision.
    pub fn format_currency(&self, amount: Money) -> String {
        let rounded = amount
            .amount()
            .round_dp_with_strategy(self.currency_decimals, RoundingStrategy::MidpointNearestEven);
        let sign = if rounded < Decimal::ZERO { "-" } else { "" };

        format!(
            "{}{}{:.prec$}",
            sign,
            self.currency_symbol,
            rounded.abs(),
            prec = self.currency_decimals as usize
        )
    }
}

/// Configuration error types.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {0}")]
    InvalidValue(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_when_unset() {
        let config = QuoteConfig::from_lookup(|_| None).unwrap();
        assert_eq!(config, QuoteConfig::default());
    }

    #[test]
    fn test_overrides() {
        let config = QuoteConfig::from_lookup(lookup_from(&[
            ("STOREFRONT_BRANCH_NAME", " Downtown "),
            ("STOREFRONT_CURRENCY_SYMBOL", "R$"),
            ("STOREFRONT_CURRENCY_DECIMALS", "3"),
            ("STOREFRONT_LOG_FORMAT", "JSON"),
        ]))
        .unwrap();

        assert_eq!(config.branch_name, "Downtown");
        assert_eq!(config.currency_symbol, "R$");
        assert_eq!(config.currency_decimals, 3);
        assert_eq!(config.log_format, LogFormat::Json);
    }

    #[test]
    fn test_invalid_values_are_rejected() {
        for (key, value) in [
            ("STOREFRONT_CURRENCY_DECIMALS", "two"),
            ("STOREFRONT_CURRENCY_DECIMALS", "9"),
            ("STOREFRONT_LOG_FORMAT", "xml"),
            ("STOREFRONT_BRANCH_NAME", "   "),
        ] {
            let err = QuoteConfig::from_lookup(lookup_from(&[(key, value)])).unwrap_err();
            assert_eq!(err.to_string(), format!("Invalid value for {}", key));
        }
    }

    #[test]
    fn test_format_currency() {
        let config = QuoteConfig::default();
        assert_eq!(config.format_currency(Money::new(dec!(36))), "$36.00");
        assert_eq!(config.format_currency(Money::new(dec!(0.125))), "$0.12");
        assert_eq!(config.format_currency(Money::new(dec!(-4.5))), "-$4.50");
        assert_eq!(config.format_currency(Money::zero()), "$0.00");
    }

    #[test]
    fn test_format_currency_no_decimals() {
        let config = QuoteConfig {
            currency_symbol: "¥".to_string(),
            currency_decimals: 0,
            ..QuoteConfig::default()
        };
        assert_eq!(config.format_currency(Money::new(dec!(1234.5))), "¥1234");
    }
}
