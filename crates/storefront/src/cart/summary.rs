//! Order summary view model.
//!
//! Turns cart lines into display-ready rows so the presentation layer only
//! has to lay them out.

use puntaditas_core::{Price, ProductId};

use super::{CartEngine, CartLineItem};

/// Footer text shown for an empty cart.
pub const EMPTY_CART_MESSAGE: &str = "Cart is empty - start shopping!";

/// One row of the order summary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartLineView {
    /// 1-based row number.
    pub position: usize,
    pub id: ProductId,
    pub name: String,
    pub quantity: u32,
    /// Formatted unit price.
    pub price: String,
    /// Formatted unit price times quantity.
    pub line_total: String,
}

/// Display data for the whole cart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartSummary {
    pub lines: Vec<CartLineView>,
    /// Formatted cart total.
    pub total: String,
    /// Sum of quantities, for the count badge.
    pub item_count: u64,
}

impl CartSummary {
    /// Build a summary from line items in display order.
    #[must_use]
    pub fn new(items: &[CartLineItem]) -> Self {
        let lines = items
            .iter()
            .enumerate()
            .map(|(index, item)| CartLineView {
                position: index + 1,
                id: item.id,
                name: item.name.clone(),
                quantity: item.quantity,
                price: format_price(item.price),
                line_total: format_price(item.line_total()),
            })
            .collect();

        Self {
            lines,
            total: format_price(items.iter().map(CartLineItem::line_total).sum()),
            item_count: items.iter().map(|item| u64::from(item.quantity)).sum(),
        }
    }

    /// Returns `true` if there are no rows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Footer line: the total, or an invitation to shop.
    #[must_use]
    pub fn footer(&self) -> String {
        if self.is_empty() {
            EMPTY_CART_MESSAGE.to_string()
        } else {
            format!("Total: {}", self.total)
        }
    }
}

impl<S> From<&CartEngine<S>> for CartSummary
where
    S: crate::store::KeyValueStore,
{
    fn from(engine: &CartEngine<S>) -> Self {
        Self::new(engine.items())
    }
}

/// Format a price as `$` plus the amount with `,` thousands separators.
///
/// Whole amounts have no decimals (`$10,000`); anything else is shown with
/// two (`$1,234.50`).
#[must_use]
pub fn format_price(price: Price) -> String {
    let fixed = format!("{:.2}", price.amount().round_dp(2));
    let (whole, cents) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));

    let grouped = group_thousands(whole);
    if cents.trim_end_matches('0').is_empty() {
        format!("${grouped}")
    } else {
        format!("${grouped}.{cents}")
    }
}

fn group_thousands(digits: &str) -> String {
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}
