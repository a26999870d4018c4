//! Header view: user icon and cart badge.

use crate::models::{Cart, Session};

/// Header state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderView {
    /// Logged-in user's name.
    pub user_name: Option<String>,
    /// What clicking the user icon does.
    pub user_action: &'static str,
    pub cart_count: u32,
    /// The badge is hidden at zero.
    pub show_badge: bool,
    /// Cart features are disabled while anonymous.
    pub cart_enabled: bool,
}

impl HeaderView {
    #[must_use]
    pub fn new(session: &Session, cart: &Cart) -> Self {
        let cart_count = cart.item_count();
        Self {
            user_name: session.current_user().map(|user| user.name.clone()),
            user_action: if session.is_logged_in() { "Logout" } else { "Login" },
            cart_count,
            show_badge: cart_count > 0,
            cart_enabled: session.is_logged_in(),
        }
    }
}
