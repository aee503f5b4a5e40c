//! Checkout flow.
//!
//! Checkout only decides what happens to the cart. Confirmation is asked of
//! an injected [`ConfirmCheckout`] and the follow-up page (if any) is up to
//! whoever receives [`CheckoutOutcome::Completed`].

use puntaditas_core::Price;
use thiserror::Error;
use tracing::{info, instrument};

use super::CartEngine;
use crate::store::{KeyValueStore, StorageError};

/// Errors that can occur during checkout.
#[derive(Debug, Error)]
pub enum CheckoutError {
    /// There is nothing to buy.
    #[error("the cart is empty")]
    EmptyCart,

    /// The cart was cleared but could not be persisted.
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
}

/// Result of a checkout attempt on a non-empty cart.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckoutOutcome {
    /// The purchase was confirmed and the cart cleared.
    Completed {
        /// Amount that was confirmed.
        total: Price,
        /// Number of units purchased.
        item_count: u64,
    },
    /// The user backed out; the cart is untouched.
    Declined,
}

/// Asks the user to confirm a purchase.
pub trait ConfirmCheckout {
    /// Return `true` to go ahead with a purchase of `item_count` units
    /// totalling `total`.
    fn confirm(&mut self, total: Price, item_count: u64) -> bool;
}

impl<F> ConfirmCheckout for F
where
    F: FnMut(Price, u64) -> bool,
{
    fn confirm(&mut self, total: Price, item_count: u64) -> bool {
        self(total, item_count)
    }
}

impl<S: KeyValueStore> CartEngine<S> {
    /// Check out the cart.
    ///
    /// An empty cart is rejected without asking for confirmation. A
    /// confirmed purchase clears the cart; a declined one leaves it as is.
    ///
    /// # Errors
    ///
    /// Returns `CheckoutError::EmptyCart` if there is nothing to buy, or
    /// `CheckoutError::Storage` if the cleared cart could not be persisted.
    #[instrument(skip(self, prompt))]
    pub fn checkout<P>(&mut self, prompt: &mut P) -> Result<CheckoutOutcome, CheckoutError>
    where
        P: ConfirmCheckout + ?Sized,
    {
        if self.is_empty() {
            info!("Checkout rejected, cart is empty");
            return Err(CheckoutError::EmptyCart);
        }

        let total = self.cart_total();
        let item_count = self.cart_count();

        if !prompt.confirm(total, item_count) {
            info!(%total, "Checkout declined");
            return Ok(CheckoutOutcome::Declined);
        }

        self.clear_cart()?;
        info!(%total, item_count, "Checkout completed");
        Ok(CheckoutOutcome::Completed { total, item_count })
    }
}
