//! Unified error handling.
//!
//! Provides a unified `AppError` type. Event handlers turn it into a
//! user-facing [`Notification`]; storage failures are logged and shown with
//! a generic message so internals never reach the user.

use thiserror::Error;

use crate::db::RepositoryError;
use crate::notifications::Notification;
use crate::services::{AuthError, CartAction, CartError};
use crate::storage::StorageError;

/// Message shown when state could not be persisted.
pub const STORAGE_FAILURE_MESSAGE: &str = "Something went wrong saving your changes";

/// Application-level error type for the storefront.
#[derive(Debug, Error)]
pub enum AppError {
    /// Cart operation failed.
    #[error("Cart error: {0}")]
    Cart(#[from] CartError),

    /// Authentication operation failed.
    #[error("Auth error: {0}")]
    Auth(#[from] AuthError),

    /// Repository operation failed.
    #[error("Repository error: {0}")]
    Repository(#[from] RepositoryError),

    /// Storage backend failed.
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
}

impl AppError {
    /// Whether this is an internal failure rather than a validation result.
    #[must_use]
    pub const fn is_internal(&self) -> bool {
        matches!(
            self,
            Self::Storage(_)
                | Self::Repository(_)
                | Self::Cart(CartError::Storage(_))
                | Self::Auth(AuthError::Storage(_) | AuthError::Repository(_))
        )
    }

    /// Whether the user should be sent to the login prompt.
    #[must_use]
    pub const fn requires_login(&self) -> bool {
        matches!(self, Self::Cart(CartError::LoginRequired(_)))
    }

    /// The message to show the user.
    ///
    /// Don't expose internal error details.
    #[must_use]
    pub fn notification(&self) -> Notification {
        let message = match self {
            Self::Cart(err) => match err {
                CartError::LoginRequired(CartAction::AddItem) => {
                    "Please login first to add items to cart"
                }
                CartError::LoginRequired(CartAction::ViewCart) => {
                    "Please login first to view your cart"
                }
                CartError::LoginRequired(CartAction::Checkout) => "Please login to checkout",
                CartError::EmptyCart => "Your cart is empty",
                CartError::Storage(_) => STORAGE_FAILURE_MESSAGE,
            },
            Self::Auth(err) => match err {
                AuthError::MissingFields => "Please fill in all fields",
                AuthError::PasswordMismatch => "Passwords do not match",
                AuthError::WeakPassword { min } => {
                    return Notification::error(format!(
                        "Password must be at least {min} characters long"
                    ));
                }
                AuthError::InvalidEmail(_) => "Please enter a valid email address",
                AuthError::UserAlreadyExists => "Email already registered. Please login instead.",
                AuthError::UserNotFound => "User not found. Please check your email or register.",
                AuthError::InvalidPassword => "Invalid password. Please try again.",
                AuthError::Repository(_) | AuthError::Storage(_) => STORAGE_FAILURE_MESSAGE,
            },
            Self::Repository(_) | Self::Storage(_) => STORAGE_FAILURE_MESSAGE,
        };
        Notification::error(message)
    }

    /// Log internal failures and convert to the user-facing notification.
    #[must_use]
    pub fn into_notification(self) -> Notification {
        if self.is_internal() {
            tracing::error!(error = %self, "Event failed");
        } else {
            tracing::debug!(error = %self, "Event rejected");
        }
        self.notification()
    }
}
