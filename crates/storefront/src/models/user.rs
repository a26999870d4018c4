//! User domain types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use furnishme_core::{Email, UserId};

/// Name of the account seeded on first run.
pub const DEMO_USER_NAME: &str = "Demo User";
/// Email of the account seeded on first run.
pub const DEMO_USER_EMAIL: &str = "demo@furnishme.com";
/// Password of the account seeded on first run.
pub const DEMO_USER_PASSWORD: &str = "password123";

/// A registered storefront user.
///
/// The password is stored and compared as plaintext. This is a demo
/// directory, not a credential store; `Debug` output redacts it.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Sequential ID assigned at registration.
    pub id: UserId,
    /// Display name.
    pub name: String,
    /// Login email; unique within the directory.
    pub email: Email,
    /// Plaintext password.
    pub password: String,
    /// When the user registered.
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Exact plaintext comparison against the stored password.
    #[must_use]
    pub fn password_matches(&self, candidate: &str) -> bool {
        self.password == candidate
    }
}

impl std::fmt::Debug for User {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("User")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("email", &self.email)
            .field("password", &"[REDACTED]")
            .field("created_at", &self.created_at)
            .finish()
    }
}

/// Every registered user, in registration order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserDirectory {
    users: Vec<User>,
}

impl UserDirectory {
    /// A directory holding only the demo account.
    #[must_use]
    pub fn seeded(created_at: DateTime<Utc>) -> Self {
        Self {
            users: vec![User {
                id: UserId::new(1),
                name: DEMO_USER_NAME.to_owned(),
                email: Email::parse(DEMO_USER_EMAIL)
                    .unwrap_or_else(|_| unreachable!("demo email is valid")),
                password: DEMO_USER_PASSWORD.to_owned(),
                created_at,
            }],
        }
    }

    /// Users in registration order.
    #[must_use]
    pub fn users(&self) -> &[User] {
        &self.users
    }

    /// Number of registered users.
    #[must_use]
    pub fn len(&self) -> usize {
        self.users.len()
    }

    /// Whether nobody is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }

    /// The user registered under exactly `email`.
    #[must_use]
    pub fn find_by_email(&self, email: &str) -> Option<&User> {
        self.users.iter().find(|user| user.email.as_str() == email)
    }

    /// ID for the next registration: directory length + 1.
    ///
    /// Only a rolled-back registration removes a user, and that user is
    /// always the last one, so the IDs stay dense.
    /// Returns `None` once the count no longer fits an ID.
    #[must_use]
    pub fn next_id(&self) -> Option<UserId> {
        i32::try_from(self.users.len())
            .ok()
            .and_then(|len| len.checked_add(1))
            .map(UserId::new)
    }

    /// Append a user. Callers check email uniqueness first.
    pub fn push(&mut self, user: User) {
        self.users.push(user);
    }

    /// Remove the user with `id`. Returns whether one was removed.
    pub fn remove(&mut self, id: UserId) -> bool {
        let before = self.users.len();
        self.users.retain(|user| user.id != id);
        self.users.len() != before
    }
}
