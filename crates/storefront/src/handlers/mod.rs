//! Event handlers.
//!
//! Every user action is an [`Event`]. [`dispatch`] routes it to one handler,
//! which mutates state through the services and returns a [`Reply`]
//! describing what to show: notifications, a modal change, a receipt, and
//! which views need redrawing.
//!
//! # Events
//!
//! ## Cart
//! - `AddToCart`, `RemoveFromCart`, `ChangeQuantity` - Cart lines
//! - `OpenCart`, `Checkout` - Cart panel and receipt
//!
//! ## Account
//! - `Login`, `Register`, `Logout`, `UserIcon` - Session
//! - `ShowLogin`, `ShowRegister`, `ShowForgotPassword`, `ForgotPassword` - Prompts
//!
//! ## Catalog
//! - `SelectCategory` - Shop filter
//! - `NextSlide`, `GoToSlide` - Hero carousel
//!
//! ## Pages
//! - `Contact`, `Subscribe`, `ReadMore` - Static page forms

pub mod auth;
pub mod cart;
pub mod catalog;
pub mod pages;

use std::ops::BitOr;

use furnishme_core::ProductId;

use crate::catalog::CategoryFilter;
use crate::error::AppError;
use crate::models::Receipt;
use crate::notifications::Notification;
use crate::services::Registration;
use crate::state::{AppState, Revisions};
use crate::storage::KeyValueStore;

pub use auth::LoginForm;
pub use pages::ContactForm;

/// A user action.
#[derive(Debug, Clone)]
pub enum Event {
    AddToCart(ProductId),
    RemoveFromCart(ProductId),
    ChangeQuantity { product_id: ProductId, delta: i32 },
    OpenCart,
    CloseModal,
    Checkout,
    Login(LoginForm),
    Register(Registration),
    Logout,
    UserIcon,
    ShowLogin,
    ShowRegister,
    ShowForgotPassword,
    ForgotPassword { email: String },
    SelectCategory(CategoryFilter),
    NextSlide,
    GoToSlide(usize),
    Contact(ContactForm),
    Subscribe { email: String },
    ReadMore,
}

/// Modal dialogs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Modal {
    Login,
    Register,
    ForgotPassword,
    Cart,
    Receipt,
}

/// Change to the visible modal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModalAction {
    Open(Modal),
    Close,
}

/// Views that need redrawing after an event.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Rerender {
    /// User icon and cart badge.
    pub header: bool,
    /// Product grids (add-to-cart buttons follow the session).
    pub products: bool,
    /// Cart panel.
    pub cart: bool,
    /// Hero carousel.
    pub carousel: bool,
}

impl Rerender {
    /// Views depending on stores whose revision moved between two snapshots.
    #[must_use]
    pub const fn between(before: Revisions, after: Revisions) -> Self {
        let cart = before.cart != after.cart;
        let session = before.session != after.session;
        Self {
            header: cart || session,
            products: session,
            cart: cart || session,
            carousel: false,
        }
    }

    /// Whether anything needs redrawing.
    #[must_use]
    pub const fn any(&self) -> bool {
        self.header || self.products || self.cart || self.carousel
    }
}

impl BitOr for Rerender {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self::Output {
        Self {
            header: self.header || rhs.header,
            products: self.products || rhs.products,
            cart: self.cart || rhs.cart,
            carousel: self.carousel || rhs.carousel,
        }
    }
}

/// What the UI should do after an event.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Reply {
    pub notifications: Vec<Notification>,
    pub modal: Option<ModalAction>,
    pub receipt: Option<Receipt>,
    pub rerender: Rerender,
}

impl Reply {
    /// A reply carrying one notification.
    #[must_use]
    pub fn notify(notification: Notification) -> Self {
        Self {
            notifications: vec![notification],
            ..Self::default()
        }
    }

    /// A reply that only changes the modal.
    #[must_use]
    pub fn modal(action: ModalAction) -> Self {
        Self {
            modal: Some(action),
            ..Self::default()
        }
    }

    /// Set the modal change.
    #[must_use]
    pub const fn with_modal(mut self, action: ModalAction) -> Self {
        self.modal = Some(action);
        self
    }

    /// Reply for a failed event.
    ///
    /// Login-gated failures also open the login prompt.
    #[must_use]
    pub fn failure(err: AppError) -> Self {
        let requires_login = err.requires_login();
        let reply = Self::notify(err.into_notification());
        if requires_login {
            reply.with_modal(ModalAction::Open(Modal::Login))
        } else {
            reply
        }
    }
}

/// Route `event` to its handler.
pub fn dispatch<S: KeyValueStore>(state: &mut AppState<S>, event: Event) -> Reply {
    let before = state.revisions();

    let reply = match event {
        Event::AddToCart(product_id) => cart::add(state, product_id),
        Event::RemoveFromCart(product_id) => cart::remove(state, product_id),
        Event::ChangeQuantity { product_id, delta } => {
            cart::change_quantity(state, product_id, delta)
        }
        Event::OpenCart => cart::open(state),
        Event::CloseModal => Reply::modal(ModalAction::Close),
        Event::Checkout => cart::checkout(state),
        Event::Login(form) => auth::login(state, &form),
        Event::Register(form) => auth::register(state, &form),
        Event::Logout => auth::logout(state),
        Event::UserIcon => auth::user_icon(state),
        Event::ShowLogin => Reply::modal(ModalAction::Open(Modal::Login)),
        Event::ShowRegister => Reply::modal(ModalAction::Open(Modal::Register)),
        Event::ShowForgotPassword => Reply::modal(ModalAction::Open(Modal::ForgotPassword)),
        Event::ForgotPassword { email } => auth::forgot_password(&email),
        Event::SelectCategory(filter) => catalog::select_category(state, filter),
        Event::NextSlide => catalog::next_slide(state),
        Event::GoToSlide(index) => catalog::go_to_slide(state, index),
        Event::Contact(form) => pages::contact(&form),
        Event::Subscribe { email } => pages::subscribe(&email),
        Event::ReadMore => pages::read_more(),
    };

    let rerender = reply.rerender | Rerender::between(before, state.revisions());
    Reply { rerender, ..reply }
}
