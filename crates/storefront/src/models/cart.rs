//! Cart types.
//!
//! The cart is an ordered list of lines keyed by product id. A line's
//! quantity is always at least one: a change that would take it to zero or
//! below removes the line instead.

use serde::{Deserialize, Serialize};

use furnishme_core::{Price, ProductId};

use super::Product;

/// One line in the cart.
///
/// Name and price are copied from the catalog when the line is created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartItem {
    pub id: ProductId,
    pub name: String,
    pub price: Price,
    pub quantity: u32,
}

impl CartItem {
    /// A new line for one unit of `product`.
    #[must_use]
    pub fn from_product(product: &Product) -> Self {
        Self {
            id: product.id,
            name: product.name.clone(),
            price: product.price,
            quantity: 1,
        }
    }

    /// Price times quantity.
    #[must_use]
    pub fn line_total(&self) -> Price {
        self.price.times(self.quantity)
    }
}

/// Outcome of [`Cart::change_quantity`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuantityChange {
    /// No line with that id.
    Missing,
    /// The line now has this quantity.
    Updated(u32),
    /// The quantity reached zero and the line was removed.
    Removed,
}

/// The shopping cart.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Cart {
    items: Vec<CartItem>,
}

impl Cart {
    /// Build a cart from stored lines.
    ///
    /// Zero-quantity lines are dropped and repeated ids are merged into the
    /// first occurrence, so a hand-edited or stale record still satisfies the
    /// cart invariants.
    #[must_use]
    pub fn from_items(items: impl IntoIterator<Item = CartItem>) -> Self {
        let mut cart = Self::default();
        for item in items {
            if item.quantity == 0 {
                continue;
            }
            match cart.items.iter_mut().find(|line| line.id == item.id) {
                Some(line) => line.quantity = line.quantity.saturating_add(item.quantity),
                None => cart.items.push(item),
            }
        }
        cart
    }

    /// Lines in insertion order.
    #[must_use]
    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    /// Whether the cart has no lines.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Number of distinct lines.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// The line for `id`, if present.
    #[must_use]
    pub fn get(&self, id: ProductId) -> Option<&CartItem> {
        self.items.iter().find(|item| item.id == id)
    }

    /// Add one unit of `product`, returning the line's new quantity.
    pub fn add(&mut self, product: &Product) -> u32 {
        if let Some(line) = self.items.iter_mut().find(|item| item.id == product.id) {
            line.quantity = line.quantity.saturating_add(1);
            return line.quantity;
        }
        self.items.push(CartItem::from_product(product));
        1
    }

    /// Remove every line for `id`. Returns whether anything was removed.
    pub fn remove(&mut self, id: ProductId) -> bool {
        let before = self.items.len();
        self.items.retain(|item| item.id != id);
        self.items.len() != before
    }

    /// Add `delta` to the quantity of `id`, removing the line at zero or below.
    pub fn change_quantity(&mut self, id: ProductId, delta: i32) -> QuantityChange {
        let Some(line) = self.items.iter_mut().find(|item| item.id == id) else {
            return QuantityChange::Missing;
        };

        let next = i64::from(line.quantity) + i64::from(delta);
        if next <= 0 {
            self.remove(id);
            return QuantityChange::Removed;
        }

        line.quantity = u32::try_from(next).unwrap_or(u32::MAX);
        QuantityChange::Updated(line.quantity)
    }

    /// Remove every line.
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Sum of all line totals.
    #[must_use]
    pub fn total(&self) -> Price {
        self.items.iter().map(CartItem::line_total).sum()
    }

    /// Sum of all quantities (the badge count).
    #[must_use]
    pub fn item_count(&self) -> u32 {
        self.items
            .iter()
            .fold(0, |count, item| count.saturating_add(item.quantity))
    }
}
