//! Product catalog and category filter.
//!
//! The catalog is fixed at startup and never mutated or persisted.

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use furnishme_core::{Price, ProductId};

use crate::models::Product;

/// Number of products shown on the home page by default.
pub const DEFAULT_FEATURED_COUNT: usize = 4;

/// Errors raised when building a catalog.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogError {
    /// Two products share an id.
    #[error("duplicate product id {0}")]
    DuplicateId(ProductId),

    /// A rating is above [`Product::MAX_RATING`].
    #[error("product {id} has rating {rating}, maximum is 5")]
    RatingOutOfRange { id: ProductId, rating: u8 },
}

/// The product list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Catalog {
    products: Vec<Product>,
}

impl Catalog {
    /// Build a catalog, checking that ids are unique and ratings in range.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError` naming the first offending product.
    pub fn new(products: Vec<Product>) -> Result<Self, CatalogError> {
        let mut seen = BTreeSet::new();
        for product in &products {
            if !seen.insert(product.id) {
                return Err(CatalogError::DuplicateId(product.id));
            }
            if product.rating > Product::MAX_RATING {
                return Err(CatalogError::RatingOutOfRange {
                    id: product.id,
                    rating: product.rating,
                });
            }
        }
        Ok(Self { products })
    }

    /// The storefront's furniture range.
    #[must_use]
    pub fn furniture() -> Self {
        Self {
            products: vec![
                Product::new(1, "Modern Furniture", Price::from_cents(14_000), 5, 50, "chair"),
                Product::new(2, "Comfortable Sofa", Price::from_cents(29_999), 4, 32, "sofa"),
                Product::new(3, "Wooden Table", Price::from_cents(19_999), 5, 45, "table"),
                Product::new(4, "Office Chair", Price::from_cents(14_999), 4, 28, "chair"),
                Product::new(5, "Corner Table", Price::from_cents(8_999), 5, 15, "corner"),
                Product::new(6, "New Wardrobe", Price::from_cents(39_999), 4, 22, "wardrobe"),
                Product::new(7, "Flexible Chair", Price::from_cents(12_999), 5, 38, "chair"),
                Product::new(8, "Dining Set", Price::from_cents(49_999), 5, 19, "table"),
            ],
        }
    }

    /// Every product in catalog order.
    #[must_use]
    pub fn all(&self) -> &[Product] {
        &self.products
    }

    /// Look up a product by id.
    #[must_use]
    pub fn get(&self, id: ProductId) -> Option<&Product> {
        self.products.iter().find(|product| product.id == id)
    }

    /// The first `count` products, as shown on the home page.
    #[must_use]
    pub fn featured(&self, count: usize) -> &[Product] {
        self.products.get(..count).unwrap_or(&self.products)
    }

    /// Products matching `filter`, in catalog order.
    #[must_use]
    pub fn filter(&self, filter: &CategoryFilter) -> Vec<&Product> {
        self.products
            .iter()
            .filter(|product| filter.matches(product))
            .collect()
    }

    /// Distinct categories in first-seen order.
    #[must_use]
    pub fn categories(&self) -> Vec<&str> {
        let mut categories: Vec<&str> = Vec::new();
        for product in &self.products {
            if !categories.contains(&product.category.as_str()) {
                categories.push(&product.category);
            }
        }
        categories
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::furniture()
    }
}

/// Shop page category filter.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum CategoryFilter {
    /// Show everything.
    #[default]
    All,
    /// Show products whose category equals this value exactly.
    Category(String),
}

impl CategoryFilter {
    /// Whether `product` passes this filter.
    #[must_use]
    pub fn matches(&self, product: &Product) -> bool {
        match self {
            Self::All => true,
            Self::Category(category) => product.category == *category,
        }
    }
}

impl FromStr for CategoryFilter {
    type Err = std::convert::Infallible;

    /// `all` selects everything; any other value is an exact category.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "all" => Self::All,
            other => Self::Category(other.to_owned()),
        })
    }
}

impl fmt::Display for CategoryFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => f.write_str("all"),
            Self::Category(category) => f.write_str(category),
        }
    }
}
