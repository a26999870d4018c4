//! Business logic services for the storefront.
//!
//! # Services
//!
//! - `auth` - Login, registration and logout against the user directory
//! - `cart` - Cart mutations and checkout
//!
//! Services borrow the stores they touch from [`crate::state::AppState`]
//! for the duration of one operation.

pub mod auth;
pub mod cart;

pub use auth::{AuthError, AuthService, Registration};
pub use cart::{AddedItem, CartAction, CartError, CartService};
