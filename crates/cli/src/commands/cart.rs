//! Catalog and cart commands.
//!
//! The engine ignores unknown ids silently; these commands check first so
//! the user gets told why nothing happened.

use std::io::Write;

use puntaditas_core::ProductId;
use puntaditas_storefront::cart::{CartEngine, CartSummary};
use puntaditas_storefront::error::AppError;
use puntaditas_storefront::store::KeyValueStore;

use crate::render;

/// List the catalog.
pub fn products<S: KeyValueStore>(
    cart: &CartEngine<S>,
    out: &mut impl Write,
) -> Result<(), AppError> {
    render::products(out, cart.catalog())?;
    Ok(())
}

/// Show the order summary.
pub fn show<S: KeyValueStore>(cart: &CartEngine<S>, out: &mut impl Write) -> Result<(), AppError> {
    render::cart(out, &CartSummary::from(cart))?;
    Ok(())
}

/// Add `quantity` units of a product, then show the cart.
pub fn add<S: KeyValueStore>(
    cart: &mut CartEngine<S>,
    id: ProductId,
    quantity: u32,
    out: &mut impl Write,
) -> Result<(), AppError> {
    if cart.product(id).is_none() {
        return Err(AppError::BadRequest(format!("unknown product {id}")));
    }
    if quantity == 0 {
        return Err(AppError::BadRequest("quantity must be at least 1".to_string()));
    }

    cart.add_to_cart(id, quantity)?;
    show(cart, out)
}

/// Remove a product, then show the cart.
pub fn remove<S: KeyValueStore>(
    cart: &mut CartEngine<S>,
    id: ProductId,
    out: &mut impl Write,
) -> Result<(), AppError> {
    ensure_in_cart(cart, id)?;
    cart.remove_from_cart(id)?;
    show(cart, out)
}

/// Set a product's quantity, then show the cart.
pub fn update<S: KeyValueStore>(
    cart: &mut CartEngine<S>,
    id: ProductId,
    quantity: i64,
    out: &mut impl Write,
) -> Result<(), AppError> {
    ensure_in_cart(cart, id)?;
    cart.update_quantity(id, quantity)?;
    show(cart, out)
}

/// Empty the cart, then show it.
pub fn clear<S: KeyValueStore>(
    cart: &mut CartEngine<S>,
    out: &mut impl Write,
) -> Result<(), AppError> {
    cart.clear_cart()?;
    show(cart, out)
}

fn ensure_in_cart<S: KeyValueStore>(cart: &CartEngine<S>, id: ProductId) -> Result<(), AppError> {
    if cart.line_item(id).is_none() {
        return Err(AppError::BadRequest(format!("product {id} is not in the cart")));
    }
    Ok(())
}
