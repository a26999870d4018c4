//! Product card and grid views.

use crate::catalog::{Catalog, CategoryFilter};
use crate::models::Product;

/// One product card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductCardView {
    pub id: i32,
    pub name: String,
    pub price: String,
    pub filled_stars: u8,
    pub empty_stars: u8,
    pub reviews: u32,
    pub category: String,
    /// Add-to-cart is only offered while logged in.
    pub can_add_to_cart: bool,
}

impl ProductCardView {
    #[must_use]
    pub fn new(product: &Product, logged_in: bool) -> Self {
        let filled = product.rating.min(Product::MAX_RATING);
        Self {
            id: product.id.as_i32(),
            name: product.name.clone(),
            price: product.price.display(),
            filled_stars: filled,
            empty_stars: Product::MAX_RATING - filled,
            reviews: product.reviews,
            category: product.category.clone(),
            can_add_to_cart: logged_in,
        }
    }

    /// Star row, e.g. `★★★★☆`.
    #[must_use]
    pub fn stars(&self) -> String {
        let mut stars = "★".repeat(usize::from(self.filled_stars));
        stars.push_str(&"☆".repeat(usize::from(self.empty_stars)));
        stars
    }
}

/// A grid of product cards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductGridView {
    pub cards: Vec<ProductCardView>,
    /// Active filter, `all` for the home page.
    pub filter: String,
    pub categories: Vec<String>,
}

impl ProductGridView {
    /// The shop page: every product passing `filter`.
    #[must_use]
    pub fn shop(catalog: &Catalog, filter: &CategoryFilter, logged_in: bool) -> Self {
        Self {
            cards: catalog
                .filter(filter)
                .into_iter()
                .map(|product| ProductCardView::new(product, logged_in))
                .collect(),
            filter: filter.to_string(),
            categories: categories(catalog),
        }
    }

    /// The home page: the first `count` products.
    #[must_use]
    pub fn featured(catalog: &Catalog, count: usize, logged_in: bool) -> Self {
        Self {
            cards: catalog
                .featured(count)
                .iter()
                .map(|product| ProductCardView::new(product, logged_in))
                .collect(),
            filter: CategoryFilter::All.to_string(),
            categories: categories(catalog),
        }
    }
}

fn categories(catalog: &Catalog) -> Vec<String> {
    catalog.categories().into_iter().map(str::to_owned).collect()
}
