//! # cart-quote
//!
//! Prices a cart request and prints a receipt.
//!
//! ## Usage
//! ```bash
//! # Quote a request file
//! cargo run -p cart-quote -- apps/cart-quote/fixtures/sample-quote.json
//!
//! # Read the request from stdin, log as JSON
//! STOREFRONT_LOG_FORMAT=json cargo run -p cart-quote -- - < request.json
//! ```
//!
//! ## Startup Sequence
//! ```text
//! main()
//!   │
//!   ├── QuoteConfig::from_env()   (bad value → exit 1)
//!   ├── init_tracing()            (stderr, pretty or JSON)
//!   ├── read request              (file or stdin)
//!   ├── QuoteRequest::into_quote  (validate + Cart::add_line per line)
//!   └── print receipt             (stdout)
//! ```
//!
//! Exit status: 0 on success, 1 for bad input/config/I/O, 2 when a pricing
//! rule rejects the request.

mod config;
mod error;
mod receipt;
mod request;

use std::io::Read;
use std::process::ExitCode;

use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use crate::config::{LogFormat, QuoteConfig};
use crate::error::{QuoteError, EXIT_INVALID_INPUT};
use crate::request::QuoteRequest;

fn main() -> ExitCode {
    let config = match QuoteConfig::from_env() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("error: {}", QuoteError::from(err));
            return ExitCode::from(EXIT_INVALID_INPUT);
        }
    };

    init_tracing(config.log_format);

    match run(&config) {
        Ok(receipt) => {
            print!("{}", receipt);
            ExitCode::SUCCESS
        }
        Err(err) => {
            error!(error = %err, exit_code = err.exit_code(), "quote failed");
            eprintln!("error: {}", err);
            ExitCode::from(err.exit_code())
        }
    }
}

/// Initializes the tracing subscriber for logging.
///
/// Logs go to stderr so stdout carries only the receipt.
fn init_tracing(format: LogFormat) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,storefront_core=debug,cart_quote=debug"));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);

    match format {
        LogFormat::Pretty => builder.init(),
        LogFormat::Json => builder.json().init(),
    }
}

fn run(config: &QuoteConfig) -> Result<String, QuoteError> {
    let path = std::env::args().nth(1).ok_or(QuoteError::Usage)?;
    let raw = read_input(&path)?;

    let quote = QuoteRequest::from_json(&raw)?.into_quote(config)?;
    let view = quote.view();

    info!(
        cart_id = %view.id,
        branch = %view.branch_name,
        lines = view.totals.line_count,
        total_amount = %view.totals.total_amount,
        "quote ready"
    );

    Ok(receipt::render(&view, config))
}

/// Reads the request from `path`, or from stdin when `path` is `-`.
fn read_input(path: &str) -> Result<String, QuoteError> {
    let io_error = |source| QuoteError::Io {
        path: path.to_string(),
        source,
    };

    if path == "-" {
        let mut raw = String::new();
        std::io::stdin()
            .read_to_string(&mut raw)
            .map_err(io_error)?;
        Ok(raw)
    } else {
        std::fs::read_to_string(path).map_err(io_error)
    }
}
