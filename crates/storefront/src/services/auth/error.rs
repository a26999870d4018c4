//! Authentication error types.

use thiserror::Error;

use crate::db::RepositoryError;
use crate::storage::StorageError;

/// Errors that can occur during authentication operations.
#[derive(Debug, Error)]
pub enum AuthError {
    /// A registration field was left empty.
    #[error("missing required fields")]
    MissingFields,

    /// Password and confirmation differ.
    #[error("passwords do not match")]
    PasswordMismatch,

    /// Password too short.
    #[error("password must be at least {min} characters")]
    WeakPassword { min: usize },

    /// Invalid email format.
    #[error("invalid email: {0}")]
    InvalidEmail(#[from] furnishme_core::EmailError),

    /// User already exists.
    #[error("user already exists")]
    UserAlreadyExists,

    /// No user with that email.
    #[error("user not found")]
    UserNotFound,

    /// Email known, password wrong.
    #[error("invalid password")]
    InvalidPassword,

    /// Repository error.
    #[error("repository error: {0}")]
    Repository(#[from] RepositoryError),

    /// Session or cart could not be persisted.
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),
}
