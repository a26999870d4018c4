//! Cart panel view.

use crate::models::{Cart, CartItem};

/// Cart line for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartItemView {
    pub id: i32,
    pub name: String,
    pub price: String,
    pub quantity: u32,
    pub line_price: String,
}

/// Cart panel for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartView {
    pub items: Vec<CartItemView>,
    pub total: String,
    pub item_count: u32,
}

impl CartView {
    /// Whether there is nothing to show.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl From<&CartItem> for CartItemView {
    fn from(item: &CartItem) -> Self {
        Self {
            id: item.id.as_i32(),
            name: item.name.clone(),
            price: item.price.display(),
            quantity: item.quantity,
            line_price: item.line_total().display(),
        }
    }
}

impl From<&Cart> for CartView {
    fn from(cart: &Cart) -> Self {
        Self {
            items: cart.items().iter().map(CartItemView::from).collect(),
            total: cart.total().display(),
            item_count: cart.item_count(),
        }
    }
}
