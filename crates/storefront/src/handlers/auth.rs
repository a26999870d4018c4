//! Account event handlers.

use chrono::Utc;
use secrecy::SecretString;

use super::{Modal, ModalAction, Reply};
use crate::notifications::Notification;
use crate::services::Registration;
use crate::state::AppState;
use crate::storage::KeyValueStore;

/// Login form input.
#[derive(Debug, Clone)]
pub struct LoginForm {
    pub email: String,
    pub password: SecretString,
}

/// Log in and close the prompt.
pub fn login<S: KeyValueStore>(state: &mut AppState<S>, form: &LoginForm) -> Reply {
    match state.auth_service().login(&form.email, &form.password) {
        Ok(user) => Reply::notify(Notification::success(format!(
            "Welcome back, {}!",
            user.name
        )))
        .with_modal(ModalAction::Close),
        Err(e) => Reply::failure(e.into()),
    }
}

/// Register, log in and close the prompt.
pub fn register<S: KeyValueStore>(state: &mut AppState<S>, form: &Registration) -> Reply {
    match state.auth_service().register(form, Utc::now()) {
        Ok(user) => Reply::notify(Notification::success(format!(
            "Account created successfully! Welcome, {}!",
            user.name
        )))
        .with_modal(ModalAction::Close),
        Err(e) => Reply::failure(e.into()),
    }
}

/// Log out. No confirmation.
pub fn logout<S: KeyValueStore>(state: &mut AppState<S>) -> Reply {
    match state.auth_service().logout() {
        // Logout is shown in the error style.
        Ok(()) => Reply::notify(Notification::error("You have been logged out")),
        Err(e) => Reply::failure(e.into()),
    }
}

/// The header user icon: logout when logged in, login prompt otherwise.
pub fn user_icon<S: KeyValueStore>(state: &mut AppState<S>) -> Reply {
    if state.session().is_logged_in() {
        logout(state)
    } else {
        Reply::modal(ModalAction::Open(Modal::Login))
    }
}

/// Simulated password reset. Nothing is sent and nothing changes.
pub fn forgot_password(email: &str) -> Reply {
    tracing::info!(email, "Password reset requested");
    Reply::notify(Notification::success(format!(
        "Password reset link sent to {email}"
    )))
    .with_modal(ModalAction::Open(Modal::Login))
}
