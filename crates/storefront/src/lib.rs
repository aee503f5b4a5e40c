//! Puntaditas Storefront library.
//!
//! Everything behind the storefront page except the markup: the product
//! catalog, the cart engine and the local store that keeps the cart alive
//! across restarts.
//!
//! # Architecture
//!
//! - [`catalog`] loads products over HTTP or from a file, falling back to a
//!   fixed list when the source is unavailable
//! - [`store`] persists the cart under a single key in a key-value store
//! - [`cart`] owns the in-memory cart, enforces its invariants and notifies
//!   registered listeners after every mutation
//!
//! # Example
//!
//! ```rust,ignore
//! use puntaditas_storefront::cart::CartEngine;
//! use puntaditas_storefront::catalog::{CatalogLoader, CatalogSource};
//! use puntaditas_storefront::store::MemoryStore;
//!
//! let products = CatalogLoader::new(CatalogSource::default()).load_products().await;
//!
//! let mut cart = CartEngine::hydrate(MemoryStore::new());
//! cart.set_catalog(products);
//! cart.subscribe(|event| tracing::info!(?event, "cart changed"));
//! cart.add_to_cart(ProductId::new(1), 1)?;
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod catalog;
pub mod config;
pub mod error;
pub mod store;
