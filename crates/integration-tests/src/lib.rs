//! Integration tests for FurnishMe.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p furnishme-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `cart_flow` - Cart mutations and checkout through event dispatch
//! - `session_flow` - Login, registration, logout and session restore
//! - `file_storage` - State surviving a reload from the JSON file
//!
//! This library holds the shared fixtures.

use secrecy::SecretString;

use furnishme_storefront::handlers::LoginForm;
use furnishme_storefront::models::{DEMO_USER_EMAIL, DEMO_USER_PASSWORD};
use furnishme_storefront::services::Registration;
use furnishme_storefront::storage::{KeyValueStore, MemoryStorage, StorageError};
use furnishme_storefront::{AppState, Event, Reply, StorefrontConfig, dispatch};

/// Fresh state over empty in-memory storage.
///
/// # Errors
///
/// Returns `StorageError` if seeding fails (never, for memory storage).
pub fn memory_state() -> Result<AppState<MemoryStorage>, StorageError> {
    AppState::load(MemoryStorage::new(), &StorefrontConfig::default())
}

/// A login event.
#[must_use]
pub fn login(email: &str, password: &str) -> Event {
    Event::Login(LoginForm {
        email: email.to_owned(),
        password: SecretString::from(password.to_owned()),
    })
}

/// A registration event.
#[must_use]
pub fn register(name: &str, email: &str, password: &str, confirm: &str) -> Event {
    Event::Register(Registration {
        name: name.to_owned(),
        email: email.to_owned(),
        password: SecretString::from(password.to_owned()),
        confirm_password: SecretString::from(confirm.to_owned()),
    })
}

/// Log in as the seeded demo user.
pub fn login_demo<S: KeyValueStore>(state: &mut AppState<S>) -> Reply {
    dispatch(state, login(DEMO_USER_EMAIL, DEMO_USER_PASSWORD))
}

/// Notification messages in order.
#[must_use]
pub fn messages(reply: &Reply) -> Vec<&str> {
    reply
        .notifications
        .iter()
        .map(|notification| notification.message.as_str())
        .collect()
}
