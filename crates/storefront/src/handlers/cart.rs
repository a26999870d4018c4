//! Cart event handlers.

use chrono::Utc;

use furnishme_core::ProductId;

use super::{Modal, ModalAction, Reply};
use crate::models::QuantityChange;
use crate::notifications::Notification;
use crate::services::CartAction;
use crate::state::AppState;
use crate::storage::KeyValueStore;

const ITEM_REMOVED: &str = "Item removed from cart";

/// Add one unit of a product.
pub fn add<S: KeyValueStore>(state: &mut AppState<S>, product_id: ProductId) -> Reply {
    match state.cart_service().add(product_id) {
        Ok(Some(added)) => Reply::notify(Notification::success(format!(
            "{} added to cart",
            added.name
        ))),
        Ok(None) => Reply::default(),
        Err(e) => Reply::failure(e.into()),
    }
}

/// Remove a product's line.
pub fn remove<S: KeyValueStore>(state: &mut AppState<S>, product_id: ProductId) -> Reply {
    match state.cart_service().remove(product_id) {
        // Removal is shown in the error style.
        Ok(_) => Reply::notify(Notification::error(ITEM_REMOVED)),
        Err(e) => Reply::failure(e.into()),
    }
}

/// Increase or decrease a line's quantity.
pub fn change_quantity<S: KeyValueStore>(
    state: &mut AppState<S>,
    product_id: ProductId,
    delta: i32,
) -> Reply {
    match state.cart_service().change_quantity(product_id, delta) {
        Ok(QuantityChange::Removed) => Reply::notify(Notification::error(ITEM_REMOVED)),
        Ok(QuantityChange::Updated(_) | QuantityChange::Missing) => Reply::default(),
        Err(e) => Reply::failure(e.into()),
    }
}

/// Open the cart panel.
pub fn open<S: KeyValueStore>(state: &mut AppState<S>) -> Reply {
    match state.cart_service().require_session(CartAction::ViewCart) {
        Ok(()) => Reply::modal(ModalAction::Open(Modal::Cart)),
        Err(e) => Reply::failure(e.into()),
    }
}

/// Check out and show the receipt.
pub fn checkout<S: KeyValueStore>(state: &mut AppState<S>) -> Reply {
    let mut rng = rand::rng();
    match state.cart_service().checkout(&mut rng, Utc::now()) {
        Ok(receipt) => Reply {
            receipt: Some(receipt),
            ..Reply::modal(ModalAction::Open(Modal::Receipt))
        },
        Err(e) => Reply::failure(e.into()),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use secrecy::SecretString;

    use super::*;
    use crate::config::StorefrontConfig;
    use crate::handlers::{Event, LoginForm, dispatch};
    use crate::models::{DEMO_USER_EMAIL, DEMO_USER_PASSWORD};
    use crate::notifications::NotificationKind;
    use crate::storage::MemoryStorage;

    fn logged_in() -> AppState<MemoryStorage> {
        let mut state = AppState::load(MemoryStorage::new(), &StorefrontConfig::default()).unwrap();
        dispatch(
            &mut state,
            Event::Login(LoginForm {
                email: DEMO_USER_EMAIL.to_owned(),
                password: SecretString::from(DEMO_USER_PASSWORD.to_owned()),
            }),
        );
        state
    }

    #[test]
    fn test_unknown_product_is_silent() {
        let mut state = logged_in();
        let reply = add(&mut state, ProductId::new(42));
        assert_eq!(reply, Reply::default());
    }

    #[test]
    fn test_decrease_to_zero_notifies_removal() {
        let mut state = logged_in();
        add(&mut state, ProductId::new(1));

        let reply = change_quantity(&mut state, ProductId::new(1), -1);

        assert_eq!(reply.notifications[0].message, ITEM_REMOVED);
        assert_eq!(reply.notifications[0].kind, NotificationKind::Error);
        assert!(state.cart().is_empty());
    }

    #[test]
    fn test_increase_is_silent() {
        let mut state = logged_in();
        add(&mut state, ProductId::new(1));

        let reply = change_quantity(&mut state, ProductId::new(1), 1);

        assert!(reply.notifications.is_empty());
        assert_eq!(state.cart().item_count(), 2);
    }

    #[test]
    fn test_checkout_opens_receipt() {
        let mut state = logged_in();
        add(&mut state, ProductId::new(3));

        let reply = checkout(&mut state);

        assert_eq!(reply.modal, Some(ModalAction::Open(Modal::Receipt)));
        assert_eq!(reply.receipt.map(|r| r.lines.len()), Some(1));
        assert!(state.cart().is_empty());
    }

    #[test]
    fn test_checkout_empty_cart() {
        let mut state = logged_in();
        let reply = checkout(&mut state);

        assert_eq!(reply.notifications[0].message, "Your cart is empty");
        assert_eq!(reply.modal, None);
        assert!(reply.receipt.is_none());
    }

    #[test]
    fn test_open_cart_requires_login() {
        let mut state = AppState::load(MemoryStorage::new(), &StorefrontConfig::default()).unwrap();
        let reply = open(&mut state);

        assert_eq!(
            reply.notifications[0].message,
            "Please login first to view your cart"
        );
        assert_eq!(reply.modal, Some(ModalAction::Open(Modal::Login)));
    }
}
