//! Cart service.
//!
//! Adding, viewing and checking out require a logged-in session. Removing
//! and changing quantities do not: they only touch lines that are already
//! in the cart.

use chrono::{DateTime, Utc};
use rand::Rng;
use thiserror::Error;
use tracing::instrument;

use furnishme_core::ProductId;

use crate::catalog::Catalog;
use crate::models::{Cart, QuantityChange, Receipt, Session, generate_order_id};
use crate::storage::{KeyValueStore, StorageError};
use crate::store::Store;

/// Cart actions that need a logged-in session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CartAction {
    AddItem,
    ViewCart,
    Checkout,
}

/// Errors that can occur during cart operations.
#[derive(Debug, Error)]
pub enum CartError {
    /// Nobody is logged in.
    #[error("login required for {0:?}")]
    LoginRequired(CartAction),

    /// Checkout with nothing in the cart.
    #[error("cart is empty")]
    EmptyCart,

    /// The cart could not be persisted.
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),
}

/// Result of a successful add.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddedItem {
    pub name: String,
    pub quantity: u32,
}

/// Cart service.
pub struct CartService<'a> {
    cart: &'a mut Store<Cart>,
    session: &'a Store<Session>,
    catalog: &'a Catalog,
    storage: &'a mut dyn KeyValueStore,
}

impl<'a> CartService<'a> {
    /// Create a new cart service.
    #[must_use]
    pub fn new(
        cart: &'a mut Store<Cart>,
        session: &'a Store<Session>,
        catalog: &'a Catalog,
        storage: &'a mut dyn KeyValueStore,
    ) -> Self {
        Self {
            cart,
            session,
            catalog,
            storage,
        }
    }

    /// Fail unless someone is logged in.
    ///
    /// # Errors
    ///
    /// Returns `CartError::LoginRequired` naming `action` when anonymous.
    pub fn require_session(&self, action: CartAction) -> Result<(), CartError> {
        if self.session.get().is_logged_in() {
            Ok(())
        } else {
            Err(CartError::LoginRequired(action))
        }
    }

    /// Add one unit of a catalog product.
    ///
    /// Returns `None` when the id is not in the catalog; nothing changes.
    ///
    /// # Errors
    ///
    /// Returns `CartError::LoginRequired` when anonymous.
    /// Returns `CartError::Storage` if the cart cannot be persisted.
    #[instrument(skip(self), fields(product_id = %product_id))]
    pub fn add(&mut self, product_id: ProductId) -> Result<Option<AddedItem>, CartError> {
        self.require_session(CartAction::AddItem)?;

        let Some(product) = self.catalog.get(product_id) else {
            tracing::debug!("Ignoring add for unknown product");
            return Ok(None);
        };

        let quantity = self.cart.mutate(&mut *self.storage, |cart| cart.add(product))?;
        tracing::debug!(quantity, "Added to cart");

        Ok(Some(AddedItem {
            name: product.name.clone(),
            quantity,
        }))
    }

    /// Remove every line for `product_id`.
    ///
    /// The cart is persisted even when nothing matched.
    ///
    /// # Errors
    ///
    /// Returns `CartError::Storage` if the cart cannot be persisted.
    #[instrument(skip(self), fields(product_id = %product_id))]
    pub fn remove(&mut self, product_id: ProductId) -> Result<bool, CartError> {
        let removed = self
            .cart
            .mutate(&mut *self.storage, |cart| cart.remove(product_id))?;
        tracing::debug!(removed, "Removed from cart");
        Ok(removed)
    }

    /// Change a line's quantity by `delta`, removing it at zero or below.
    ///
    /// A missing line is a no-op and nothing is persisted.
    ///
    /// # Errors
    ///
    /// Returns `CartError::Storage` if the cart cannot be persisted.
    #[instrument(skip(self), fields(product_id = %product_id))]
    pub fn change_quantity(
        &mut self,
        product_id: ProductId,
        delta: i32,
    ) -> Result<QuantityChange, CartError> {
        if self.cart.get().get(product_id).is_none() {
            return Ok(QuantityChange::Missing);
        }
        let change = self.cart.mutate(&mut *self.storage, |cart| {
            cart.change_quantity(product_id, delta)
        })?;
        tracing::debug!(?change, "Changed cart quantity");
        Ok(change)
    }

    /// Compute the receipt and empty the cart.
    ///
    /// # Errors
    ///
    /// Returns `CartError::EmptyCart` if there is nothing to buy (checked
    /// before the session).
    /// Returns `CartError::LoginRequired` when anonymous.
    /// Returns `CartError::Storage` if the emptied cart cannot be persisted;
    /// the cart is left as it was.
    #[instrument(skip_all)]
    pub fn checkout<R: Rng + ?Sized>(
        &mut self,
        rng: &mut R,
        placed_at: DateTime<Utc>,
    ) -> Result<Receipt, CartError> {
        if self.cart.get().is_empty() {
            return Err(CartError::EmptyCart);
        }
        self.require_session(CartAction::Checkout)?;

        let receipt = Receipt::new(
            generate_order_id(rng),
            placed_at,
            self.cart.get(),
            self.session.get().current_user(),
        );
        self.cart.mutate(&mut *self.storage, Cart::clear)?;

        tracing::info!(
            order_id = %receipt.order_id,
            lines = receipt.lines.len(),
            grand_total = %receipt.grand_total,
            "Checkout complete"
        );
        Ok(receipt)
    }
}
