//! Checkout receipt.
//!
//! A receipt is computed once at checkout, shown, and discarded. It is never
//! persisted.

use std::ops::RangeInclusive;

use chrono::{DateTime, Utc};
use rand::Rng;
use rust_decimal::Decimal;

use furnishme_core::{OrderId, Price};

use super::{Cart, User};

/// Sales tax applied at checkout (8%).
pub const TAX_RATE: Decimal = Decimal::from_parts(8, 0, 0, false, 2);

/// Customer name shown when nobody is logged in.
pub const GUEST_NAME: &str = "Guest";

/// Order numbers are six digits.
pub const ORDER_ID_RANGE: RangeInclusive<i32> = 100_000..=999_999;

/// One purchased line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReceiptLine {
    pub name: String,
    pub quantity: u32,
    pub unit_price: Price,
    pub total: Price,
}

/// Summary of a checkout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Receipt {
    pub order_id: OrderId,
    pub placed_at: DateTime<Utc>,
    pub customer: String,
    pub lines: Vec<ReceiptLine>,
    pub subtotal: Price,
    pub tax: Price,
    pub grand_total: Price,
}

impl Receipt {
    /// Compute the receipt for `cart`.
    #[must_use]
    pub fn new(
        order_id: OrderId,
        placed_at: DateTime<Utc>,
        cart: &Cart,
        customer: Option<&User>,
    ) -> Self {
        let lines: Vec<ReceiptLine> = cart
            .items()
            .iter()
            .map(|item| ReceiptLine {
                name: item.name.clone(),
                quantity: item.quantity,
                unit_price: item.price,
                total: item.line_total(),
            })
            .collect();

        let subtotal: Price = lines.iter().map(|line| line.total).sum();
        let tax = subtotal.scaled(TAX_RATE);

        Self {
            order_id,
            placed_at,
            customer: customer.map_or_else(|| GUEST_NAME.to_owned(), |user| user.name.clone()),
            lines,
            subtotal,
            tax,
            grand_total: subtotal + tax,
        }
    }
}

/// Draw a six-digit order number uniformly from [`ORDER_ID_RANGE`].
pub fn generate_order_id<R: Rng + ?Sized>(rng: &mut R) -> OrderId {
    OrderId::new(rng.random_range(ORDER_ID_RANGE))
}
