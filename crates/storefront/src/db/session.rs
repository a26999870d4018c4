//! Session persistence under `furnishme-login` and `furnishme-current-user`.
//!
//! A session is restored only when the flag is `true` and the user record
//! parses. Anything else, including half-written state, reads as anonymous.

use crate::models::{Session, User, session_keys};
use crate::storage::{KeyValueStore, StorageError, read_json, write_json};
use crate::store::Persist;

impl Persist for Session {
    fn load(storage: &dyn KeyValueStore) -> Option<Self> {
        let logged_in = read_json::<bool>(storage, session_keys::LOGGED_IN).unwrap_or(false);
        if !logged_in {
            return Some(Self::anonymous());
        }
        let session = read_json::<User>(storage, session_keys::CURRENT_USER)
            .map_or_else(Self::anonymous, Self::authenticated);
        Some(session)
    }

    fn save(&self, storage: &mut dyn KeyValueStore) -> Result<(), StorageError> {
        match self.current_user() {
            // User first, so an interrupted save never leaves the flag set
            // without a user to restore.
            Some(user) => {
                write_json(storage, session_keys::CURRENT_USER, user)?;
                write_json(storage, session_keys::LOGGED_IN, &true)
            }
            None => {
                storage.remove(session_keys::LOGGED_IN)?;
                storage.remove(session_keys::CURRENT_USER)
            }
        }
    }
}
