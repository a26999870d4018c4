//! Persistence for storefront state.
//!
//! Storefront data lives in a string-keyed [`KeyValueStore`]; this module
//! maps each store onto its keys (see [`crate::models::session_keys`]).
//!
//! ## Records
//!
//! - `users` - User directory, seeded with the demo account on first run
//! - `cart` - Cart lines in insertion order
//! - `session` - Login flag plus the logged-in user record
//!
//! [`KeyValueStore`]: crate::storage::KeyValueStore

pub mod cart;
pub mod session;
pub mod users;

use thiserror::Error;

use crate::storage::StorageError;

pub use users::UserRepository;

/// Errors that can occur during repository operations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// The backing store rejected a write.
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),

    /// Constraint violation (e.g., unique email).
    #[error("constraint violation: {0}")]
    Conflict(String),

    /// The directory is too large to assign another sequential ID.
    #[error("no user IDs left to assign")]
    IdExhausted,
}
