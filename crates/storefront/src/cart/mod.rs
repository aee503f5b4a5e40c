//! Cart state management.
//!
//! The [`CartEngine`] exclusively owns the cart for a session. It enforces
//! the line-item invariants, writes the cart through to its [`CartStore`]
//! after every mutation and tells registered listeners what happened, so
//! the presentation layer can re-render without the engine knowing about it.
//!
//! # Invariants
//!
//! - At most one line per product id; repeated adds increase the quantity.
//! - Every stored quantity is at least 1; anything that would bring it to
//!   zero removes the line instead.
//! - Line order is insertion order.
//!
//! [`CartStore`]: crate::store::CartStore

mod checkout;
mod engine;
mod summary;

pub use checkout::{CheckoutError, CheckoutOutcome, ConfirmCheckout};
pub use engine::CartEngine;
pub use summary::{CartLineView, CartSummary, EMPTY_CART_MESSAGE, format_price};

use puntaditas_core::{Price, ProductId};
use serde::{Deserialize, Serialize};

use crate::catalog::Product;

/// One product's entry in the cart.
///
/// Name and price are copied from the catalog when the line is created and
/// are not updated if the catalog changes afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLineItem {
    /// Catalog id of the product.
    pub id: ProductId,
    /// Product name at the time it was added.
    #[serde(rename = "nombre")]
    pub name: String,
    /// Unit price at the time it was added.
    #[serde(rename = "precio")]
    pub price: Price,
    /// Number of units, always at least 1 inside the engine.
    pub quantity: u32,
}

impl CartLineItem {
    /// Create a line for `quantity` units of `product`.
    #[must_use]
    pub fn from_product(product: &Product, quantity: u32) -> Self {
        Self {
            id: product.id,
            name: product.name.clone(),
            price: product.price,
            quantity,
        }
    }

    /// Unit price times quantity.
    #[must_use]
    pub fn line_total(&self) -> Price {
        self.price.line_total(self.quantity)
    }
}

/// Something that happened to the cart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CartEvent {
    /// The cart contents changed; counters and totals should be redrawn.
    Changed {
        /// Sum of all quantities.
        count: u64,
        /// Sum of all line totals.
        total: Price,
    },
    /// A product was added, worth a notification.
    ItemAdded {
        product_id: ProductId,
        name: String,
        quantity: u32,
    },
}
