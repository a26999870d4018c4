//! Authentication service.
//!
//! Mock password authentication against the persisted user directory.
//! Passwords are stored and compared as plaintext; nothing here is a
//! credential store.

mod error;

pub use error::AuthError;

use chrono::{DateTime, Utc};
use secrecy::{ExposeSecret, SecretString};
use tracing::instrument;

use furnishme_core::Email;

use crate::db::RepositoryError;
use crate::db::users::UserRepository;
use crate::models::{Cart, Session, User, UserDirectory};
use crate::storage::KeyValueStore;
use crate::store::Store;

/// Minimum password length, in characters.
pub const MIN_PASSWORD_LENGTH: usize = 6;

/// Registration form input.
#[derive(Debug, Clone)]
pub struct Registration {
    pub name: String,
    pub email: String,
    pub password: SecretString,
    pub confirm_password: SecretString,
}

/// Authentication service.
///
/// Handles login, registration and logout. A successful login or
/// registration persists the session; logout also empties the cart.
pub struct AuthService<'a> {
    users: &'a mut Store<UserDirectory>,
    session: &'a mut Store<Session>,
    cart: &'a mut Store<Cart>,
    storage: &'a mut dyn KeyValueStore,
}

impl<'a> AuthService<'a> {
    /// Create a new authentication service.
    #[must_use]
    pub fn new(
        users: &'a mut Store<UserDirectory>,
        session: &'a mut Store<Session>,
        cart: &'a mut Store<Cart>,
        storage: &'a mut dyn KeyValueStore,
    ) -> Self {
        Self {
            users,
            session,
            cart,
            storage,
        }
    }

    fn users(&mut self) -> UserRepository<'_> {
        UserRepository::new(self.users, &mut *self.storage)
    }

    /// Login with email and password.
    ///
    /// The email must match a registered address exactly.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::UserNotFound` if no user has that email.
    /// Returns `AuthError::InvalidPassword` if the password is wrong.
    /// Returns `AuthError::Storage` if the session cannot be persisted.
    #[instrument(skip(self, password))]
    pub fn login(&mut self, email: &str, password: &SecretString) -> Result<User, AuthError> {
        let user = self
            .users()
            .get_by_email(email)
            .cloned()
            .ok_or(AuthError::UserNotFound)?;

        if !user.password_matches(password.expose_secret()) {
            tracing::info!(user_id = %user.id, "Rejected login with wrong password");
            return Err(AuthError::InvalidPassword);
        }

        self.start_session(&user)?;
        tracing::info!(user_id = %user.id, "User logged in");
        Ok(user)
    }

    /// Register a new user and log them in.
    ///
    /// Checks run in order: empty fields, password confirmation, password
    /// length, email format, email uniqueness.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::MissingFields` if any field is blank.
    /// Returns `AuthError::PasswordMismatch` if the confirmation differs.
    /// Returns `AuthError::WeakPassword` if the password is too short.
    /// Returns `AuthError::InvalidEmail` if the email format is invalid.
    /// Returns `AuthError::UserAlreadyExists` if the email is already registered.
    #[instrument(skip_all, fields(email = %form.email))]
    pub fn register(
        &mut self,
        form: &Registration,
        created_at: DateTime<Utc>,
    ) -> Result<User, AuthError> {
        let name = form.name.trim();
        let email = form.email.trim();
        let password = form.password.expose_secret();
        let confirm = form.confirm_password.expose_secret();

        if name.is_empty() || email.is_empty() || password.is_empty() || confirm.is_empty() {
            return Err(AuthError::MissingFields);
        }
        if password != confirm {
            return Err(AuthError::PasswordMismatch);
        }
        validate_password(password)?;
        let email = Email::parse(email)?;

        let user = self
            .users()
            .create(name, email, password, created_at)
            .map_err(|e| match e {
                RepositoryError::Conflict(_) => AuthError::UserAlreadyExists,
                other => AuthError::Repository(other),
            })?;

        if let Err(e) = self.start_session(&user) {
            tracing::warn!(
                user_id = %user.id,
                error = %e,
                "Session write failed, undoing registration"
            );
            self.users().delete(user.id)?;
            return Err(e);
        }

        tracing::info!(user_id = %user.id, "User registered");
        Ok(user)
    }

    /// End the session and empty the cart.
    ///
    /// The cart is emptied first. If the session then cannot be ended, the
    /// cart is put back so the user stays logged in with their items.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Storage` if the session or cart cannot be persisted.
    #[instrument(skip(self))]
    pub fn logout(&mut self) -> Result<(), AuthError> {
        let user_id = self.session.get().current_user().map(|user| user.id);

        let previous = self.cart.get().clone();
        self.cart.mutate(&mut *self.storage, Cart::clear)?;

        if let Err(e) = self
            .session
            .mutate(&mut *self.storage, |session| *session = Session::anonymous())
        {
            tracing::warn!(
                user_id = ?user_id,
                error = %e,
                "Session write failed, restoring cart"
            );
            self.cart.mutate(&mut *self.storage, |cart| *cart = previous)?;
            return Err(e.into());
        }

        tracing::info!(user_id = ?user_id, "User logged out");
        Ok(())
    }

    fn start_session(&mut self, user: &User) -> Result<(), AuthError> {
        self.session.mutate(&mut *self.storage, |session| {
            *session = Session::authenticated(user.clone());
        })?;
        Ok(())
    }
}

/// Validate password meets minimum requirements.
fn validate_password(password: &str) -> Result<(), AuthError> {
    if password.chars().count() < MIN_PASSWORD_LENGTH {
        return Err(AuthError::WeakPassword {
            min: MIN_PASSWORD_LENGTH,
        });
    }
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use furnishme_core::{Price, ProductId, UserId};

    use super::*;
    use crate::models::{DEMO_USER_EMAIL, DEMO_USER_PASSWORD, Product, session_keys};
    use crate::storage::{MemoryStorage, StorageError};
    use crate::store::Persist;

    /// Memory storage that rejects writes to one key.
    #[derive(Default)]
    struct FlakyStorage {
        inner: MemoryStorage,
        failing: Option<&'static str>,
    }

    impl FlakyStorage {
        fn contains(&self, key: &str) -> bool {
            self.inner.contains(key)
        }

        fn check(&self, key: &str) -> Result<(), StorageError> {
            if self.failing == Some(key) {
                return Err(StorageError::Io {
                    path: key.into(),
                    source: std::io::Error::from(std::io::ErrorKind::PermissionDenied),
                });
            }
            Ok(())
        }
    }

    impl KeyValueStore for FlakyStorage {
        fn get(&self, key: &str) -> Option<String> {
            self.inner.get(key)
        }

        fn set(&mut self, key: &str, value: String) -> Result<(), StorageError> {
            self.check(key)?;
            self.inner.set(key, value)
        }

        fn remove(&mut self, key: &str) -> Result<(), StorageError> {
            self.check(key)?;
            self.inner.remove(key)
        }
    }

    struct Fixture {
        storage: FlakyStorage,
        users: Store<UserDirectory>,
        session: Store<Session>,
        cart: Store<Cart>,
    }

    impl Fixture {
        fn new() -> Self {
            let mut storage = FlakyStorage::default();
            let users =
                Store::load_or_else(&mut storage, || UserDirectory::seeded(Utc::now())).unwrap();
            Self {
                storage,
                users,
                session: Store::new(Session::anonymous()),
                cart: Store::new(Cart::default()),
            }
        }

        fn service(&mut self) -> AuthService<'_> {
            AuthService::new(
                &mut self.users,
                &mut self.session,
                &mut self.cart,
                &mut self.storage,
            )
        }
    }

    fn secret(value: &str) -> SecretString {
        SecretString::from(value.to_owned())
    }

    fn registration(name: &str, email: &str, password: &str, confirm: &str) -> Registration {
        Registration {
            name: name.to_owned(),
            email: email.to_owned(),
            password: secret(password),
            confirm_password: secret(confirm),
        }
    }

    #[test]
    fn test_password_validation() {
        assert!(validate_password("123456").is_ok());
        assert!(matches!(
            validate_password("12345"),
            Err(AuthError::WeakPassword { min: 6 })
        ));
    }

    #[test]
    fn test_demo_login_persists_session() {
        let mut fixture = Fixture::new();
        let user = fixture
            .service()
            .login(DEMO_USER_EMAIL, &secret(DEMO_USER_PASSWORD))
            .unwrap();

        assert_eq!(user.name, "Demo User");
        assert!(fixture.session.get().is_logged_in());
        assert_eq!(
            fixture.storage.get(session_keys::LOGGED_IN).as_deref(),
            Some("true")
        );
        assert_eq!(Session::load(&fixture.storage), Some(fixture.session.get().clone()));
    }

    #[test]
    fn test_login_unknown_email() {
        let mut fixture = Fixture::new();
        let result = fixture
            .service()
            .login("nobody@example.com", &secret(DEMO_USER_PASSWORD));

        assert!(matches!(result, Err(AuthError::UserNotFound)));
        assert!(!fixture.session.get().is_logged_in());
    }

    #[test]
    fn test_login_wrong_password() {
        let mut fixture = Fixture::new();
        let result = fixture.service().login(DEMO_USER_EMAIL, &secret("password124"));

        assert!(matches!(result, Err(AuthError::InvalidPassword)));
        assert!(!fixture.storage.contains(session_keys::LOGGED_IN));
    }

    #[test]
    fn test_register_checks_in_order() {
        let mut fixture = Fixture::new();
        let mut register = |form: Registration| fixture.service().register(&form, Utc::now());

        assert!(matches!(
            register(registration("", "a@b.c", "12345", "54321")),
            Err(AuthError::MissingFields)
        ));
        assert!(matches!(
            register(registration("Ann", "not-an-email", "12345", "54321")),
            Err(AuthError::PasswordMismatch)
        ));
        assert!(matches!(
            register(registration("Ann", "not-an-email", "12345", "12345")),
            Err(AuthError::WeakPassword { .. })
        ));
        assert!(matches!(
            register(registration("Ann", "not-an-email", "123456", "123456")),
            Err(AuthError::InvalidEmail(_))
        ));
        assert!(matches!(
            register(registration("Ann", DEMO_USER_EMAIL, "123456", "123456")),
            Err(AuthError::UserAlreadyExists)
        ));
    }

    #[test]
    fn test_register_logs_in_new_user() {
        let mut fixture = Fixture::new();
        let user = fixture
            .service()
            .register(
                &registration("Ann", "ann@example.com", "hunter22", "hunter22"),
                Utc::now(),
            )
            .unwrap();

        assert_eq!(user.id, UserId::new(2));
        assert_eq!(
            fixture.session.get().current_user().map(|u| u.id),
            Some(user.id)
        );
        assert_eq!(UserDirectory::load(&fixture.storage).map(|d| d.len()), Some(2));
    }

    #[test]
    fn test_register_then_login_with_same_credentials() {
        let mut fixture = Fixture::new();
        fixture
            .service()
            .register(
                &registration("Ann", "ann@example.com", "hunter22", "hunter22"),
                Utc::now(),
            )
            .unwrap();
        fixture.service().logout().unwrap();

        let user = fixture
            .service()
            .login("ann@example.com", &secret("hunter22"))
            .unwrap();
        assert_eq!(user.name, "Ann");
    }

    #[test]
    fn test_logout_clears_session_and_cart() {
        let mut fixture = logged_in_with_sofa();

        fixture.service().logout().unwrap();

        assert!(!fixture.session.get().is_logged_in());
        assert!(fixture.cart.get().get(ProductId::new(2)).is_none());
        assert!(!fixture.storage.contains(session_keys::LOGGED_IN));
        assert!(!fixture.storage.contains(session_keys::CURRENT_USER));
        assert_eq!(Cart::load(&fixture.storage), Some(Cart::default()));
    }

    #[test]
    fn test_register_trims_name_and_email() {
        let mut fixture = Fixture::new();
        let user = fixture
            .service()
            .register(
                &registration("  Ann  ", " ann@example.com ", "hunter22", "hunter22"),
                Utc::now(),
            )
            .unwrap();

        assert_eq!(user.name, "Ann");
        assert_eq!(user.email.as_str(), "ann@example.com");
    }

    #[test]
    fn test_register_whitespace_only_name_is_missing() {
        let mut fixture = Fixture::new();
        let result = fixture.service().register(
            &registration("   ", "ann@example.com", "hunter22", "hunter22"),
            Utc::now(),
        );

        assert!(matches!(result, Err(AuthError::MissingFields)));
        assert_eq!(fixture.users.get().len(), 1);
    }

    #[test]
    fn test_register_undone_when_session_write_fails() {
        let mut fixture = Fixture::new();
        fixture.storage.failing = Some(session_keys::LOGGED_IN);
        let form = registration("Ann", "ann@example.com", "hunter22", "hunter22");

        let first = fixture.service().register(&form, Utc::now());
        assert!(matches!(first, Err(AuthError::Storage(_))));
        assert_eq!(fixture.users.get().len(), 1);
        assert_eq!(UserDirectory::load(&fixture.storage).map(|d| d.len()), Some(1));
        assert!(!fixture.session.get().is_logged_in());

        // A retry fails the same way instead of reporting a taken email.
        let retry = fixture.service().register(&form, Utc::now());
        assert!(matches!(retry, Err(AuthError::Storage(_))));

        fixture.storage.failing = None;
        let user = fixture.service().register(&form, Utc::now()).unwrap();
        assert_eq!(user.id, UserId::new(2));
        assert!(fixture.session.get().is_logged_in());
    }

    fn logged_in_with_sofa() -> Fixture {
        let mut fixture = Fixture::new();
        fixture
            .service()
            .login(DEMO_USER_EMAIL, &secret(DEMO_USER_PASSWORD))
            .unwrap();
        let sofa = Product::new(2, "Comfortable Sofa", Price::from_cents(29_999), 4, 32, "sofa");
        fixture
            .cart
            .mutate(&mut fixture.storage, |cart| cart.add(&sofa))
            .unwrap();
        fixture
    }

    #[test]
    fn test_logout_keeps_session_when_cart_write_fails() {
        let mut fixture = logged_in_with_sofa();
        fixture.storage.failing = Some(session_keys::CART);

        let result = fixture.service().logout();

        assert!(matches!(result, Err(AuthError::Storage(_))));
        assert!(fixture.session.get().is_logged_in());
        assert_eq!(fixture.cart.get().item_count(), 1);
        assert!(fixture.storage.contains(session_keys::LOGGED_IN));
    }

    #[test]
    fn test_logout_restores_cart_when_session_write_fails() {
        let mut fixture = logged_in_with_sofa();
        fixture.storage.failing = Some(session_keys::LOGGED_IN);

        let result = fixture.service().logout();

        assert!(matches!(result, Err(AuthError::Storage(_))));
        assert!(fixture.session.get().is_logged_in());
        assert_eq!(fixture.cart.get().item_count(), 1);
        assert_eq!(Cart::load(&fixture.storage).map(|cart| cart.item_count()), Some(1));
    }
}
