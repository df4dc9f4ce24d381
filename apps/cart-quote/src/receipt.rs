//! # Text Receipt
//!
//! Renders a [`CartView`] for a 42-column thermal-printer style layout.
//!
//! ```text
//! Cart CART-0001 @ Downtown
//! Customer: Maria Souza
//! ------------------------------------------
//! Guarana Antarctica 2L
//!   4 x $10.00 (-10%)                 $36.00
//! ------------------------------------------
//! Items                                    4
//! Subtotal                            $40.00
//! Discounts                           -$4.00
//! TOTAL                               $36.00
//! ```

use storefront_core::view::CartLineView;
use storefront_core::{CartView, Money};

use crate::config::QuoteConfig;

/// Characters per receipt line.
pub const RECEIPT_WIDTH: usize = 42;

pub fn render(view: &CartView, config: &QuoteConfig) -> String {
    let mut out = String::new();
    let rule = "-".repeat(RECEIPT_WIDTH);

    let number = if view.number.is_empty() {
        view.id.to_string()
    } else {
        view.number.clone()
    };
    push_line(&mut out, &format!("Cart {} @ {}", number, view.branch_name));
    if !view.user_name.is_empty() {
        push_line(&mut out, &format!("Customer: {}", view.user_name));
    }
    if view.is_cancelled {
        push_line(&mut out, "*** CANCELLED ***");
    }
    push_line(&mut out, &rule);

    if view.lines.is_empty() {
        push_line(&mut out, "(no items)");
    }
    for line in &view.lines {
        render_line(&mut out, line, config);
    }
    push_line(&mut out, &rule);

    let totals = &view.totals;
    push_line(&mut out, &columns("Items", &totals.total_quantity.to_string()));
    push_line(
        &mut out,
        &columns("Subtotal", &config.format_currency(totals.gross_amount)),
    );
    if !totals.discount_amount.is_zero() {
        push_line(
            &mut out,
            &columns("Discounts", &config.format_currency(Money::zero() - totals.discount_amount)),
        );
    }
    push_line(
        &mut out,
        &columns("TOTAL", &config.format_currency(totals.total_amount)),
    );

    out
}

fn render_line(out: &mut String, line: &CartLineView, config: &QuoteConfig) {
    let name = if line.product_name.is_empty() {
        line.product_id.to_string()
    } else {
        line.product_name.clone()
    };
    push_line(out, &name);

    let mut detail = format!(
        "  {} x {}",
        line.quantity,
        config.format_currency(line.unit_price)
    );
    if !line.discount.is_none() {
        detail.push_str(&format!(" (-{})", line.discount));
    }
    push_line(out, &columns(&detail, &config.format_currency(line.total_price)));
}

/// Left text and right-aligned value; at least one space between them.
fn columns(left: &str, right: &str) -> String {
    let used = left.chars().count() + right.chars().count();
    let gap = RECEIPT_WIDTH.saturating_sub(used).max(1);
    format!("{}{}{}", left, " ".repeat(gap), right)
}

fn push_line(out: &mut String, line: &str) {
    out.push_str(line);
    out.push('\n');
}
