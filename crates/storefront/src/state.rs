//! Application state shared across handlers.

use chrono::Utc;

use crate::carousel::Carousel;
use crate::catalog::{Catalog, CategoryFilter};
use crate::config::StorefrontConfig;
use crate::models::{Cart, Session, UserDirectory};
use crate::services::{AuthService, CartService};
use crate::storage::{KeyValueStore, StorageError};
use crate::store::Store;

/// Store revisions at one point in time.
///
/// Comparing two snapshots tells which stores an event changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Revisions {
    pub users: u64,
    pub cart: u64,
    pub session: u64,
}

/// Application state for one storage scope.
///
/// Owns the key/value store and every piece of state read from it. Services
/// borrow the fields they need for one operation.
#[derive(Debug)]
pub struct AppState<S> {
    storage: S,
    catalog: Catalog,
    users: Store<UserDirectory>,
    cart: Store<Cart>,
    session: Store<Session>,
    filter: CategoryFilter,
    carousel: Carousel,
    featured_count: usize,
}

impl<S: KeyValueStore> AppState<S> {
    /// Load state from `storage` with the furniture catalog.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the seeded user directory cannot be written.
    pub fn load(storage: S, config: &StorefrontConfig) -> Result<Self, StorageError> {
        Self::with_catalog(storage, config, Catalog::furniture())
    }

    /// Load state from `storage` with a custom catalog.
    ///
    /// Startup order: the user directory (seeded and persisted when absent),
    /// then the cart, then the session.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the seeded user directory cannot be written.
    pub fn with_catalog(
        mut storage: S,
        config: &StorefrontConfig,
        catalog: Catalog,
    ) -> Result<Self, StorageError> {
        let seed = config.seed_demo_user;
        let users = Store::load_or_else(&mut storage, || {
            tracing::info!(seed, "Initializing user directory");
            if seed {
                UserDirectory::seeded(Utc::now())
            } else {
                UserDirectory::default()
            }
        })?;
        let cart = Store::<Cart>::load(&storage);
        let session = Store::<Session>::load(&storage);

        tracing::debug!(
            users = users.get().len(),
            cart_lines = cart.get().len(),
            status = %session.get().status(),
            "Loaded storefront state"
        );

        Ok(Self {
            storage,
            catalog,
            users,
            cart,
            session,
            filter: CategoryFilter::All,
            carousel: Carousel::new(config.slide_count),
            featured_count: config.featured_count,
        })
    }

    /// Cart service borrowing this state.
    pub fn cart_service(&mut self) -> CartService<'_> {
        CartService::new(
            &mut self.cart,
            &self.session,
            &self.catalog,
            &mut self.storage,
        )
    }

    /// Authentication service borrowing this state.
    pub fn auth_service(&mut self) -> AuthService<'_> {
        AuthService::new(
            &mut self.users,
            &mut self.session,
            &mut self.cart,
            &mut self.storage,
        )
    }
}

impl<S> AppState<S> {
    /// The product catalog.
    #[must_use]
    pub const fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Registered users.
    #[must_use]
    pub const fn users(&self) -> &UserDirectory {
        self.users.get()
    }

    /// The cart.
    #[must_use]
    pub const fn cart(&self) -> &Cart {
        self.cart.get()
    }

    /// The session.
    #[must_use]
    pub const fn session(&self) -> &Session {
        self.session.get()
    }

    /// Cart store, for subscribing to cart changes.
    pub const fn cart_store_mut(&mut self) -> &mut Store<Cart> {
        &mut self.cart
    }

    /// Session store, for subscribing to login changes.
    pub const fn session_store_mut(&mut self) -> &mut Store<Session> {
        &mut self.session
    }

    /// Active shop category filter.
    #[must_use]
    pub const fn filter(&self) -> &CategoryFilter {
        &self.filter
    }

    /// Replace the category filter. Returns whether it changed.
    pub fn set_filter(&mut self, filter: CategoryFilter) -> bool {
        if self.filter == filter {
            return false;
        }
        self.filter = filter;
        true
    }

    /// Hero carousel position.
    #[must_use]
    pub const fn carousel(&self) -> &Carousel {
        &self.carousel
    }

    /// Mutable carousel position.
    pub const fn carousel_mut(&mut self) -> &mut Carousel {
        &mut self.carousel
    }

    /// Number of products on the home page.
    #[must_use]
    pub const fn featured_count(&self) -> usize {
        self.featured_count
    }

    /// Current store revisions.
    #[must_use]
    pub const fn revisions(&self) -> Revisions {
        Revisions {
            users: self.users.revision(),
            cart: self.cart.revision(),
            session: self.session.revision(),
        }
    }

    /// The key/value store.
    #[must_use]
    pub const fn storage(&self) -> &S {
        &self.storage
    }

    /// Give back the key/value store.
    #[must_use]
    pub fn into_storage(self) -> S {
        self.storage
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::models::{DEMO_USER_EMAIL, User, session_keys};
    use crate::storage::{MemoryStorage, write_json};

    #[test]
    fn test_first_run_seeds_demo_user() {
        let state = AppState::load(MemoryStorage::new(), &StorefrontConfig::default()).unwrap();

        assert!(state.users().find_by_email(DEMO_USER_EMAIL).is_some());
        assert!(state.storage().contains(session_keys::USERS));
        assert!(state.cart().is_empty());
        assert!(!state.session().is_logged_in());
    }

    #[test]
    fn test_seeding_can_be_disabled() {
        let config = StorefrontConfig {
            seed_demo_user: false,
            ..StorefrontConfig::default()
        };
        let state = AppState::load(MemoryStorage::new(), &config).unwrap();
        assert!(state.users().is_empty());
    }

    #[test]
    fn test_restores_persisted_session() {
        let config = StorefrontConfig::default();
        let mut storage = AppState::load(MemoryStorage::new(), &config)
            .unwrap()
            .into_storage();
        let demo = state_user(&storage);
        write_json(&mut storage, session_keys::CURRENT_USER, &demo).unwrap();
        write_json(&mut storage, session_keys::LOGGED_IN, &true).unwrap();

        let state = AppState::load(storage, &config).unwrap();
        assert_eq!(state.session().current_user(), Some(&demo));
    }

    #[test]
    fn test_set_filter_reports_change() {
        let mut state = AppState::load(MemoryStorage::new(), &StorefrontConfig::default()).unwrap();
        assert!(!state.set_filter(CategoryFilter::All));
        assert!(state.set_filter(CategoryFilter::Category("sofa".to_owned())));
    }

    fn state_user(storage: &MemoryStorage) -> User {
        crate::storage::read_json::<UserDirectory>(storage, session_keys::USERS)
            .unwrap()
            .users()[0]
            .clone()
    }
}
