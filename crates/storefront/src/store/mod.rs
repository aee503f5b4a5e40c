//! Local persistence for the cart.
//!
//! The cart lives under a single fixed key in a [`KeyValueStore`], serialized
//! as a JSON array of line items. [`CartStore`] is a passive serialization
//! target: it never mutates the cart on its own, it only reads what was last
//! written and overwrites it on every save.
//!
//! # Backends
//!
//! - [`MemoryStore`] - in-process map, shared between clones
//! - [`FileStore`] - one JSON file per key in a data directory

mod file;
mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;

use std::collections::HashMap;
use std::path::PathBuf;

use puntaditas_core::ProductId;
use thiserror::Error;
use tracing::{debug, instrument, warn};

use crate::cart::CartLineItem;

/// Key the cart is stored under.
pub const CART_STORAGE_KEY: &str = "nikolle-cart";

/// Errors that can occur when reading or writing the store.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Filesystem operation failed.
    #[error("storage I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Cart could not be serialized.
    #[error("failed to serialize cart: {0}")]
    Serialize(#[from] serde_json::Error),

    /// Key cannot be mapped onto the backend.
    #[error("invalid storage key: {0}")]
    InvalidKey(String),
}

/// A string key-value store, the moral equivalent of browser local storage.
pub trait KeyValueStore {
    /// Read the value stored under `key`, if any.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backend cannot be read.
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Store `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backend cannot be written.
    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError>;
}

/// Reads and writes the cart's line items under [`CART_STORAGE_KEY`].
#[derive(Debug, Clone, Default)]
pub struct CartStore<S> {
    backend: S,
}

impl<S: KeyValueStore> CartStore<S> {
    /// Wrap a key-value backend.
    #[must_use]
    pub const fn new(backend: S) -> Self {
        Self { backend }
    }

    /// Load the persisted cart.
    ///
    /// A missing value yields an empty cart. Unreadable or malformed data
    /// also yields an empty cart, logged at `warn`. Lines with a zero
    /// quantity are dropped and repeated product ids are merged.
    #[instrument(skip(self))]
    pub fn load(&self) -> Vec<CartLineItem> {
        let raw = match self.backend.get(CART_STORAGE_KEY) {
            Ok(Some(raw)) => raw,
            Ok(None) => {
                debug!("No persisted cart found");
                return Vec::new();
            }
            Err(e) => {
                warn!(error = %e, "Failed to read persisted cart, starting empty");
                return Vec::new();
            }
        };

        match serde_json::from_str::<Vec<CartLineItem>>(&raw) {
            Ok(items) => normalize_line_items(items),
            Err(e) => {
                warn!(error = %e, "Persisted cart is malformed, starting empty");
                Vec::new()
            }
        }
    }

    /// Overwrite the persisted cart with `items`.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if serialization or the backend write fails.
    pub fn save(&mut self, items: &[CartLineItem]) -> Result<(), StorageError> {
        let raw = serde_json::to_string(items)?;
        self.backend.set(CART_STORAGE_KEY, &raw)?;
        debug!(lines = items.len(), "Cart persisted");
        Ok(())
    }

    /// Get a reference to the underlying backend.
    #[must_use]
    pub const fn backend(&self) -> &S {
        &self.backend
    }
}

/// Restore the one-line-per-product and positive-quantity invariants on
/// data that did not come from the engine.
fn normalize_line_items(items: Vec<CartLineItem>) -> Vec<CartLineItem> {
    let mut positions: HashMap<ProductId, usize> = HashMap::with_capacity(items.len());
    let mut normalized: Vec<CartLineItem> = Vec::with_capacity(items.len());

    for item in items {
        if item.quantity == 0 {
            warn!(product_id = %item.id, "Dropping persisted line with zero quantity");
            continue;
        }

        if let Some(existing) = positions
            .get(&item.id)
            .and_then(|&index| normalized.get_mut(index))
        {
            warn!(product_id = %item.id, "Merging duplicate persisted line");
            existing.quantity = existing.quantity.saturating_add(item.quantity);
            continue;
        }

        positions.insert(item.id, normalized.len());
        normalized.push(item);
    }

    normalized
}
