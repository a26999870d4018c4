//! Terminal rendering through askama text templates.

use askama::Template;

use furnishme_storefront::AppState;
use furnishme_storefront::handlers::Modal;
use furnishme_storefront::models::Receipt;
use furnishme_storefront::notifications::Notification;
use furnishme_storefront::views::{
    CarouselView, CartView, HeaderView, ProductGridView, ReceiptView,
};

#[derive(Template)]
#[template(path = "notifications.txt")]
struct NotificationsTemplate<'a> {
    notifications: &'a [Notification],
}

#[derive(Template)]
#[template(path = "products.txt")]
struct ProductsTemplate {
    title: String,
    grid: ProductGridView,
}

#[derive(Template)]
#[template(path = "cart.txt")]
struct CartTemplate {
    cart: CartView,
}

#[derive(Template)]
#[template(path = "header.txt")]
struct HeaderTemplate {
    who: String,
    header: HeaderView,
}

#[derive(Template)]
#[template(path = "receipt.txt")]
struct ReceiptTemplate {
    receipt: ReceiptView,
}

#[derive(Template)]
#[template(path = "carousel.txt")]
struct CarouselTemplate {
    carousel: CarouselView,
}

pub fn notifications(notifications: &[Notification]) -> askama::Result<String> {
    NotificationsTemplate { notifications }.render()
}

/// The shop page under the active filter.
pub fn shop<S>(state: &AppState<S>) -> askama::Result<String> {
    ProductsTemplate {
        title: format!("Shop ({})", state.filter()),
        grid: ProductGridView::shop(
            state.catalog(),
            state.filter(),
            state.session().is_logged_in(),
        ),
    }
    .render()
}

/// The home page product selection.
pub fn featured<S>(state: &AppState<S>) -> askama::Result<String> {
    ProductsTemplate {
        title: "Featured products".to_owned(),
        grid: ProductGridView::featured(
            state.catalog(),
            state.featured_count(),
            state.session().is_logged_in(),
        ),
    }
    .render()
}

pub fn cart<S>(state: &AppState<S>) -> askama::Result<String> {
    CartTemplate {
        cart: CartView::from(state.cart()),
    }
    .render()
}

pub fn header<S>(state: &AppState<S>) -> askama::Result<String> {
    let header = HeaderView::new(state.session(), state.cart());
    HeaderTemplate {
        who: header
            .user_name
            .as_ref()
            .map_or_else(|| "Not logged in".to_owned(), |name| format!("Logged in as {name}")),
        header,
    }
    .render()
}

pub fn receipt(receipt: &Receipt) -> askama::Result<String> {
    ReceiptTemplate {
        receipt: ReceiptView::from(receipt),
    }
    .render()
}

pub fn carousel<S>(state: &AppState<S>) -> askama::Result<String> {
    CarouselTemplate {
        carousel: CarouselView::from(state.carousel()),
    }
    .render()
}

/// Hint for the command that completes an opened prompt.
pub fn prompt(modal: Modal) -> String {
    let hint = match modal {
        Modal::Login => "Log in with: furnishme login --email <EMAIL> --password <PASSWORD>",
        Modal::Register => "Register with: furnishme register --name <NAME> --email <EMAIL> ...",
        Modal::ForgotPassword => "Reset with: furnishme forgot-password --email <EMAIL>",
        Modal::Cart | Modal::Receipt => return String::new(),
    };
    format!("{hint}\n")
}
