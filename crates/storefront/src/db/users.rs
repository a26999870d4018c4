//! User directory persistence under `furnishme-users`.
//!
//! The directory is loaded once at startup and rewritten in full after every
//! registration.

use chrono::{DateTime, Utc};

use furnishme_core::{Email, UserId};

use super::RepositoryError;
use crate::models::{User, UserDirectory, session_keys};
use crate::storage::{KeyValueStore, StorageError, read_json, write_json};
use crate::store::{Persist, Store};

impl Persist for UserDirectory {
    fn load(storage: &dyn KeyValueStore) -> Option<Self> {
        read_json(storage, session_keys::USERS)
    }

    fn save(&self, storage: &mut dyn KeyValueStore) -> Result<(), StorageError> {
        write_json(storage, session_keys::USERS, self)
    }
}

/// Repository for user directory operations.
pub struct UserRepository<'a> {
    users: &'a mut Store<UserDirectory>,
    storage: &'a mut dyn KeyValueStore,
}

impl<'a> UserRepository<'a> {
    /// Create a new user repository.
    #[must_use]
    pub fn new(users: &'a mut Store<UserDirectory>, storage: &'a mut dyn KeyValueStore) -> Self {
        Self { users, storage }
    }

    /// Get a user by their exact email address.
    #[must_use]
    pub fn get_by_email(&self, email: &str) -> Option<&User> {
        self.users.get().find_by_email(email)
    }

    /// Append a new user and persist the directory.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if the email already exists.
    /// Returns `RepositoryError::IdExhausted` if no sequential ID is left.
    /// Returns `RepositoryError::Storage` if the directory cannot be written.
    pub fn create(
        &mut self,
        name: &str,
        email: Email,
        password: &str,
        created_at: DateTime<Utc>,
    ) -> Result<User, RepositoryError> {
        if self.get_by_email(email.as_str()).is_some() {
            return Err(RepositoryError::Conflict("email already exists".to_owned()));
        }
        let id = self.users.get().next_id().ok_or(RepositoryError::IdExhausted)?;

        let user = User {
            id,
            name: name.to_owned(),
            email,
            password: password.to_owned(),
            created_at,
        };
        self.users
            .mutate(&mut *self.storage, |directory| directory.push(user.clone()))?;

        Ok(user)
    }

    /// Remove a user and persist the directory.
    ///
    /// Used to undo a registration whose session could not be started.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Storage` if the directory cannot be written.
    pub fn delete(&mut self, id: UserId) -> Result<bool, RepositoryError> {
        let removed = self
            .users
            .mutate(&mut *self.storage, |directory| directory.remove(id))?;
        Ok(removed)
    }
}
