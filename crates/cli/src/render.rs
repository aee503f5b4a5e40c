//! Terminal rendering for the catalog, the cart and cart notifications.

use std::io::{self, Write};

use puntaditas_storefront::cart::{CartEvent, CartSummary, format_price};
use puntaditas_storefront::catalog::Product;
use puntaditas_storefront::error::add_breadcrumb;

/// Write the product list.
pub fn products(out: &mut impl Write, products: &[Product]) -> io::Result<()> {
    for product in products {
        writeln!(
            out,
            "{:>4}  {:<20} {:>12}",
            product.id,
            product.name,
            format_price(product.price)
        )?;
    }
    Ok(())
}

/// Write the order summary: one row per line, then the footer.
pub fn cart(out: &mut impl Write, summary: &CartSummary) -> io::Result<()> {
    for line in &summary.lines {
        writeln!(
            out,
            "{:>3}. {:<20} x{:<4} {:>12} {:>12}",
            line.position, line.name, line.quantity, line.price, line.line_total
        )?;
    }
    writeln!(out, "{}", summary.footer())?;
    writeln!(out, "Items in cart: {}", summary.item_count)
}

/// Write the user-facing notification for an event, if it has one.
pub fn notification(out: &mut impl Write, event: &CartEvent) -> io::Result<()> {
    match event {
        CartEvent::ItemAdded { name, .. } => writeln!(out, "{name} added to cart"),
        CartEvent::Changed { .. } => Ok(()),
    }
}

/// Cart listener: prints notifications and records Sentry breadcrumbs.
pub fn notify(event: &CartEvent) {
    match event {
        CartEvent::ItemAdded {
            product_id,
            quantity,
            ..
        } => {
            let (product_id, quantity) = (product_id.to_string(), quantity.to_string());
            add_breadcrumb(
                "cart",
                "Added to cart",
                Some(&[
                    ("product_id", product_id.as_str()),
                    ("quantity", quantity.as_str()),
                ]),
            );
        }
        CartEvent::Changed { count, .. } => {
            let count = count.to_string();
            add_breadcrumb("cart", "Cart changed", Some(&[("count", count.as_str())]));
        }
    }

    if let Err(e) = notification(&mut io::stdout().lock(), event) {
        tracing::warn!(error = %e, "Failed to write cart notification");
    }
}
