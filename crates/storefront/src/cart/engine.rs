//! The cart engine.

use std::fmt;

use puntaditas_core::{Price, ProductId};
use tracing::{debug, instrument};

use super::{CartEvent, CartLineItem};
use crate::catalog::Product;
use crate::store::{CartStore, KeyValueStore, StorageError};

type Listener = Box<dyn FnMut(&CartEvent)>;

/// Owns the cart for one session.
///
/// Built explicitly and handed to whoever drives the UI. Until
/// [`set_catalog`](Self::set_catalog) is called the product lookup table is
/// empty and every add is a no-op.
pub struct CartEngine<S> {
    items: Vec<CartLineItem>,
    catalog: Vec<Product>,
    store: CartStore<S>,
    listeners: Vec<Listener>,
}

impl<S> fmt::Debug for CartEngine<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CartEngine")
            .field("items", &self.items)
            .field("catalog", &self.catalog.len())
            .field("listeners", &self.listeners.len())
            .finish_non_exhaustive()
    }
}

impl<S: KeyValueStore> CartEngine<S> {
    /// Create an engine with an empty cart, ignoring anything persisted.
    #[must_use]
    pub fn new(backend: S) -> Self {
        Self {
            items: Vec::new(),
            catalog: Vec::new(),
            store: CartStore::new(backend),
            listeners: Vec::new(),
        }
    }

    /// Create an engine whose cart is restored from `backend`.
    ///
    /// Malformed persisted data yields an empty cart.
    #[must_use]
    pub fn hydrate(backend: S) -> Self {
        let mut engine = Self::new(backend);
        engine.items = engine.store.load();
        debug!(lines = engine.items.len(), "Cart hydrated");
        engine
    }

    /// Replace the product lookup table.
    ///
    /// Existing lines keep the name and price they were added with.
    pub fn set_catalog(&mut self, products: Vec<Product>) {
        debug!(count = products.len(), "Catalog set");
        self.catalog = products;
    }

    /// Products currently available for adding.
    #[must_use]
    pub fn catalog(&self) -> &[Product] {
        &self.catalog
    }

    /// Look up a catalog product by id.
    #[must_use]
    pub fn product(&self, product_id: ProductId) -> Option<&Product> {
        self.catalog.iter().find(|p| p.id == product_id)
    }

    /// Register a listener called after every cart event.
    pub fn subscribe<F>(&mut self, listener: F)
    where
        F: FnMut(&CartEvent) + 'static,
    {
        self.listeners.push(Box::new(listener));
    }

    /// Line items in display order.
    #[must_use]
    pub fn items(&self) -> &[CartLineItem] {
        &self.items
    }

    /// The line for `product_id`, if it is in the cart.
    #[must_use]
    pub fn line_item(&self, product_id: ProductId) -> Option<&CartLineItem> {
        self.items.iter().find(|item| item.id == product_id)
    }

    /// Returns `true` if the cart has no lines.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// The persistence adapter.
    #[must_use]
    pub const fn store(&self) -> &CartStore<S> {
        &self.store
    }

    /// Add `quantity` units of a catalog product.
    ///
    /// Unknown products and a zero quantity are silently ignored. A product
    /// already in the cart has its quantity increased; otherwise a new line
    /// is appended with the product's current name and price.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the cart could not be persisted. The
    /// in-memory cart keeps the change.
    #[instrument(skip(self))]
    pub fn add_to_cart(&mut self, product_id: ProductId, quantity: u32) -> Result<(), StorageError> {
        if quantity == 0 {
            debug!("Ignoring add with zero quantity");
            return Ok(());
        }

        let Some(product) = self.catalog.iter().find(|p| p.id == product_id) else {
            debug!("Ignoring add for unknown product");
            return Ok(());
        };
        let name = product.name.clone();

        if let Some(item) = self.items.iter_mut().find(|item| item.id == product_id) {
            item.quantity = item.quantity.saturating_add(quantity);
        } else {
            self.items.push(CartLineItem::from_product(product, quantity));
        }

        let persisted = self.commit();
        self.emit(&CartEvent::ItemAdded {
            product_id,
            name,
            quantity,
        });
        persisted
    }

    /// Remove the line for `product_id`. Absent products are ignored.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the cart could not be persisted.
    #[instrument(skip(self))]
    pub fn remove_from_cart(&mut self, product_id: ProductId) -> Result<(), StorageError> {
        let before = self.items.len();
        self.items.retain(|item| item.id != product_id);

        if self.items.len() == before {
            debug!("Ignoring remove for product not in cart");
            return Ok(());
        }
        self.commit()
    }

    /// Set a line's quantity exactly.
    ///
    /// A quantity of zero or less removes the line. Products not in the
    /// cart are ignored. Quantities above `u32::MAX` are clamped.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the cart could not be persisted.
    #[instrument(skip(self))]
    pub fn update_quantity(
        &mut self,
        product_id: ProductId,
        new_quantity: i64,
    ) -> Result<(), StorageError> {
        if new_quantity <= 0 {
            return self.remove_from_cart(product_id);
        }

        let Some(item) = self.items.iter_mut().find(|item| item.id == product_id) else {
            debug!("Ignoring update for product not in cart");
            return Ok(());
        };
        item.quantity = u32::try_from(new_quantity).unwrap_or(u32::MAX);

        self.commit()
    }

    /// Sum of price times quantity over all lines; zero for an empty cart.
    #[must_use]
    pub fn cart_total(&self) -> Price {
        self.items.iter().map(CartLineItem::line_total).sum()
    }

    /// Sum of quantities over all lines; zero for an empty cart.
    #[must_use]
    pub fn cart_count(&self) -> u64 {
        self.items.iter().map(|item| u64::from(item.quantity)).sum()
    }

    /// Empty the cart.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the cart could not be persisted.
    #[instrument(skip(self))]
    pub fn clear_cart(&mut self) -> Result<(), StorageError> {
        self.items.clear();
        self.commit()
    }

    /// Persist the cart and announce the change.
    ///
    /// Listeners are notified even when the write fails; the in-memory cart
    /// stays authoritative for the session. Write failures are returned, not
    /// logged, so the caller reports them once.
    fn commit(&mut self) -> Result<(), StorageError> {
        let persisted = self.store.save(&self.items);

        self.emit(&CartEvent::Changed {
            count: self.cart_count(),
            total: self.cart_total(),
        });
        persisted
    }

    fn emit(&mut self, event: &CartEvent) {
        for listener in &mut self.listeners {
            listener(event);
        }
    }
}
