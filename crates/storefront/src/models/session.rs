//! Session-related types.
//!
//! A session is either anonymous or carries the logged-in user. The login
//! flag is derived from the user being present, so the two cannot disagree.

use furnishme_core::SessionStatus;

use super::User;

/// Authentication state of the current storage scope.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    current_user: Option<User>,
}

impl Session {
    /// A session with nobody logged in.
    #[must_use]
    pub const fn anonymous() -> Self {
        Self { current_user: None }
    }

    /// A session for `user`.
    #[must_use]
    pub const fn authenticated(user: User) -> Self {
        Self {
            current_user: Some(user),
        }
    }

    /// The logged-in user, if any.
    #[must_use]
    pub const fn current_user(&self) -> Option<&User> {
        self.current_user.as_ref()
    }

    /// Whether a user is logged in.
    #[must_use]
    pub const fn is_logged_in(&self) -> bool {
        self.current_user.is_some()
    }

    /// Anonymous or authenticated.
    #[must_use]
    pub const fn status(&self) -> SessionStatus {
        if self.is_logged_in() {
            SessionStatus::Authenticated
        } else {
            SessionStatus::Anonymous
        }
    }
}

/// Storage keys for persisted storefront state.
pub mod keys {
    /// Key for the user directory.
    pub const USERS: &str = "furnishme-users";

    /// Key for the cart lines.
    pub const CART: &str = "furnishme-cart";

    /// Key for the login flag.
    pub const LOGGED_IN: &str = "furnishme-login";

    /// Key for the logged-in user record.
    pub const CURRENT_USER: &str = "furnishme-current-user";
}
