//! Domain models for the storefront.
//!
//! These are plain data types. Persistence lives in [`crate::db`], mutation
//! rules in [`crate::services`].

pub mod cart;
pub mod product;
pub mod receipt;
pub mod session;
pub mod user;

pub use cart::{Cart, CartItem, QuantityChange};
pub use product::Product;
pub use receipt::{GUEST_NAME, Receipt, ReceiptLine, TAX_RATE, generate_order_id};
pub use session::{Session, keys as session_keys};
pub use user::{DEMO_USER_EMAIL, DEMO_USER_NAME, DEMO_USER_PASSWORD, User, UserDirectory};
