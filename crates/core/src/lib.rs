//! Puntaditas Core - Shared types library.
//!
//! This crate provides common types used across all Puntaditas components:
//! - `storefront` - Catalog loading, cart engine and cart persistence
//! - `cli` - Terminal front-end for browsing the catalog and managing the cart
//!
//! # Architecture
//!
//! The core crate contains only types and traits - no I/O, no storage,
//! no HTTP clients. This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for type-safe IDs and prices

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
