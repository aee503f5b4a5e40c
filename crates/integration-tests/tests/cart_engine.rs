//! Integration tests for the cart engine.
//!
//! These tests drive the engine through its public API with an in-memory
//! store. Scenarios use the fallback catalog; invariants are checked with
//! `proptest` over generated catalogs and add sequences.

#![allow(clippy::unwrap_used, clippy::indexing_slicing)]

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use proptest::prelude::*;
use puntaditas_core::{Price, ProductId};
use puntaditas_storefront::cart::{
    CartEngine, CartEvent, CartLineItem, CartSummary, CheckoutError, CheckoutOutcome,
};
use puntaditas_storefront::catalog::{Product, fallback_products};
use puntaditas_storefront::store::MemoryStore;
use rust_decimal::Decimal;

fn engine() -> CartEngine<MemoryStore> {
    let mut cart = CartEngine::new(MemoryStore::new());
    cart.set_catalog(fallback_products());
    cart
}

// =============================================================================
// Scenarios
// =============================================================================

#[test]
fn test_first_capibara() {
    let mut cart = CartEngine::new(MemoryStore::new());
    cart.set_catalog(vec![Product::new(
        ProductId::new(1),
        "Capibara",
        Price::from(10_000),
    )]);

    cart.add_to_cart(ProductId::new(1), 1).unwrap();

    assert_eq!(
        cart.items(),
        &[CartLineItem {
            id: ProductId::new(1),
            name: "Capibara".to_string(),
            price: Price::from(10_000),
            quantity: 1,
        }]
    );
    assert_eq!(cart.cart_total(), Price::from(10_000));
    assert_eq!(cart.cart_count(), 1);
}

#[test]
fn test_adding_to_existing_line() {
    let mut cart = engine();
    cart.add_to_cart(ProductId::new(1), 2).unwrap();

    cart.add_to_cart(ProductId::new(1), 3).unwrap();

    assert_eq!(cart.line_item(ProductId::new(1)).unwrap().quantity, 5);
    assert_eq!(cart.cart_total(), Price::from(50_000));
}

#[test]
fn test_update_to_zero_empties_cart() {
    let mut cart = engine();
    cart.add_to_cart(ProductId::new(2), 1).unwrap();

    cart.update_quantity(ProductId::new(2), 0).unwrap();

    assert!(cart.is_empty());
}

#[test]
fn test_checkout_on_empty_cart_is_rejected() {
    let mut cart = engine();
    let mut prompted = false;

    let result = cart.checkout(&mut |_: Price, _: u64| {
        prompted = true;
        true
    });

    assert!(matches!(result, Err(CheckoutError::EmptyCart)));
    assert!(!prompted);
    assert!(cart.is_empty());
}

#[test]
fn test_full_shopping_session() {
    let mut cart = engine();
    let events = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&events);
    cart.subscribe(move |event| sink.borrow_mut().push(event.clone()));

    cart.add_to_cart(ProductId::new(3), 1).unwrap();
    cart.add_to_cart(ProductId::new(4), 2).unwrap();
    cart.update_quantity(ProductId::new(3), 2).unwrap();
    cart.remove_from_cart(ProductId::new(4)).unwrap();
    cart.add_to_cart(ProductId::new(1), 1).unwrap();

    let summary = CartSummary::from(&cart);
    assert_eq!(summary.total, "$40,000");
    assert_eq!(summary.item_count, 3);

    let outcome = cart.checkout(&mut |_: Price, _: u64| true).unwrap();
    assert_eq!(
        outcome,
        CheckoutOutcome::Completed {
            total: Price::from(40_000),
            item_count: 3,
        }
    );
    assert!(cart.is_empty());

    let notifications: Vec<String> = events
        .borrow()
        .iter()
        .filter_map(|event| match event {
            CartEvent::ItemAdded { name, .. } => Some(name.clone()),
            CartEvent::Changed { .. } => None,
        })
        .collect();
    assert_eq!(notifications, vec!["Ovejas", "Ranas", "Capibara"]);
}

// =============================================================================
// Invariants
// =============================================================================

/// Four products with ids 1..=4 and prices of up to four decimals.
fn catalog() -> impl Strategy<Value = Vec<Product>> {
    prop::collection::vec((0_i64..100_000_000, 0_u32..=4), 4).prop_map(|prices| {
        (1..=4)
            .zip(prices)
            .map(|(id, (mantissa, scale))| {
                Product::new(
                    ProductId::new(id),
                    format!("Producto {id}"),
                    Price::new(Decimal::new(mantissa, scale)).unwrap(),
                )
            })
            .collect()
    })
}

/// Adds over ids 0..=5, so some of them miss the catalog.
fn add_ops() -> impl Strategy<Value = Vec<(i32, u32)>> {
    prop::collection::vec((0_i32..=5, 1_u32..5), 0..64)
}

fn engine_with(products: Vec<Product>, adds: &[(i32, u32)]) -> CartEngine<MemoryStore> {
    let mut cart = CartEngine::new(MemoryStore::new());
    cart.set_catalog(products);
    for &(id, quantity) in adds {
        cart.add_to_cart(ProductId::new(id), quantity).unwrap();
    }
    cart
}

proptest! {
    #[test]
    fn test_repeated_adds_keep_one_line_per_product(products in catalog(), adds in add_ops()) {
        let cart = engine_with(products, &adds);

        let mut expected: HashMap<i32, u32> = HashMap::new();
        for &(id, quantity) in &adds {
            if (1..=4).contains(&id) {
                *expected.entry(id).or_default() += quantity;
            }
        }

        prop_assert_eq!(cart.items().len(), expected.len());
        for item in cart.items() {
            prop_assert!(item.quantity >= 1);
            prop_assert_eq!(Some(&item.quantity), expected.get(&item.id.as_i32()));
        }
    }

    #[test]
    fn test_total_and_count_match_lines(
        products in catalog(),
        adds in add_ops(),
        updates in prop::collection::vec((0_i32..=5, -3_i64..10), 0..16),
    ) {
        let mut cart = engine_with(products, &adds);
        for (id, quantity) in updates {
            cart.update_quantity(ProductId::new(id), quantity).unwrap();
        }

        let total: Price = cart
            .items()
            .iter()
            .map(|item| item.price.line_total(item.quantity))
            .sum();
        let count: u64 = cart.items().iter().map(|item| u64::from(item.quantity)).sum();

        prop_assert_eq!(cart.cart_total(), total);
        prop_assert_eq!(cart.cart_count(), count);
    }

    #[test]
    fn test_non_positive_update_matches_remove(
        products in catalog(),
        adds in add_ops(),
        target in 0_i32..=5,
        quantity in i64::MIN..=0,
    ) {
        let mut updated = engine_with(products.clone(), &adds);
        let mut removed = engine_with(products, &adds);

        updated.update_quantity(ProductId::new(target), quantity).unwrap();
        removed.remove_from_cart(ProductId::new(target)).unwrap();

        prop_assert_eq!(updated.items(), removed.items());
    }

    #[test]
    fn test_saved_cart_reloads_unchanged(products in catalog(), adds in add_ops()) {
        let cart = engine_with(products, &adds);

        prop_assert_eq!(cart.store().load(), cart.items());
    }
}
