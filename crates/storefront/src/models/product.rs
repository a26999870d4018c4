//! Catalog product type.

use serde::{Deserialize, Serialize};

use furnishme_core::{Price, ProductId};

/// A product in the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    /// Unique within the catalog.
    pub id: ProductId,
    /// Display name.
    pub name: String,
    /// Unit price.
    pub price: Price,
    /// Star rating, `0..=5`.
    pub rating: u8,
    /// Number of reviews.
    pub reviews: u32,
    /// Category slug used by the shop filter (e.g. `chair`).
    pub category: String,
}

impl Product {
    /// Highest possible star rating.
    pub const MAX_RATING: u8 = 5;

    /// Create a product.
    pub fn new(
        id: i32,
        name: impl Into<String>,
        price: Price,
        rating: u8,
        reviews: u32,
        category: impl Into<String>,
    ) -> Self {
        Self {
            id: ProductId::new(id),
            name: name.into(),
            price,
            rating,
            reviews,
            category: category.into(),
        }
    }
}
