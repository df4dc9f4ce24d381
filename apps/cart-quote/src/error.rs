//! # Quote Errors
//!
//! Everything that can stop a quote, mapped to a process exit code.
//!
//! ```text
//! ┌──────────────────────────────┬───────────┐
//! │ Error                        │ Exit code │
//! ├──────────────────────────────┼───────────┤
//! │ Usage / Io / Json / Config   │     1     │
//! │ Line or Core (validation,    │     1     │
//! │   amount overflow)           │           │
//! │ Line or Core (domain rule)   │     2     │
//! └──────────────────────────────┴───────────┘
//! ```

use storefront_core::CoreError;
use thiserror::Error;

use crate::config::ConfigError;

/// Exit code for bad input, configuration or I/O.
pub const EXIT_INVALID_INPUT: u8 = 1;

/// Exit code for a request the pricing rules refuse.
pub const EXIT_DOMAIN_RULE: u8 = 2;

#[derive(Debug, Error)]
pub enum QuoteError {
    #[error("usage: cart-quote <request.json | ->")]
    Usage,

    #[error("Failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid quote request: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// A request line failed; `line` is 1-based.
    #[error("line {line}: {source}")]
    Line {
        line: usize,
        #[source]
        source: CoreError,
    },

    #[error(transparent)]
    Core(#[from] CoreError),
}

impl QuoteError {
    /// The core error behind this failure, if any.
    pub fn core_error(&self) -> Option<&CoreError> {
        match self {
            QuoteError::Line { source, .. } => Some(source),
            QuoteError::Core(err) => Some(err),
            _ => None,
        }
    }

    pub fn exit_code(&self) -> u8 {
        match self.core_error() {
            Some(err) if err.is_domain_rule_violation() => EXIT_DOMAIN_RULE,
            _ => EXIT_INVALID_INPUT,
        }
    }
}
