//! View models.
//!
//! Plain structs a renderer turns into output. Prices are pre-formatted and
//! every flag a template needs is computed here, so templates stay dumb.

pub mod carousel;
pub mod cart;
pub mod catalog;
pub mod header;
pub mod receipt;

pub use carousel::CarouselView;
pub use cart::{CartItemView, CartView};
pub use catalog::{ProductCardView, ProductGridView};
pub use header::HeaderView;
pub use receipt::{ReceiptLineView, ReceiptView};
