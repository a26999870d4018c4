//! Receipt view.
//!
//! Dates and times are shown in the local timezone.

use chrono::Local;

use crate::models::{Receipt, ReceiptLine};

/// Receipt line for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReceiptLineView {
    pub name: String,
    pub quantity: u32,
    pub unit_price: String,
    pub total: String,
}

/// Receipt for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReceiptView {
    pub order_id: String,
    pub date: String,
    pub time: String,
    pub customer: String,
    pub lines: Vec<ReceiptLineView>,
    pub subtotal: String,
    pub tax: String,
    pub grand_total: String,
}

impl From<&ReceiptLine> for ReceiptLineView {
    fn from(line: &ReceiptLine) -> Self {
        Self {
            name: line.name.clone(),
            quantity: line.quantity,
            unit_price: line.unit_price.display(),
            total: line.total.display(),
        }
    }
}

impl From<&Receipt> for ReceiptView {
    fn from(receipt: &Receipt) -> Self {
        let placed_at = receipt.placed_at.with_timezone(&Local);
        Self {
            order_id: receipt.order_id.to_string(),
            date: placed_at.format("%Y-%m-%d").to_string(),
            time: placed_at.format("%H:%M:%S").to_string(),
            customer: receipt.customer.clone(),
            lines: receipt.lines.iter().map(ReceiptLineView::from).collect(),
            subtotal: receipt.subtotal.display(),
            tax: receipt.tax.display(),
            grand_total: receipt.grand_total.display(),
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use furnishme_core::{OrderId, Price, ProductId};

    use super::*;
    use crate::models::{Cart, CartItem};

    #[test]
    fn test_receipt_view_formats_totals() {
        let cart = Cart::from_items([CartItem {
            id: ProductId::new(1),
            name: "Modern Furniture".to_owned(),
            price: Price::from_cents(14_000),
            quantity: 1,
        }]);
        let receipt = Receipt::new(OrderId::new(424_242), Utc::now(), &cart, None);

        let view = ReceiptView::from(&receipt);

        assert_eq!(view.order_id, "424242");
        assert_eq!(view.customer, "Guest");
        assert_eq!(view.subtotal, "$140.00");
        assert_eq!(view.tax, "$11.20");
        assert_eq!(view.grand_total, "$151.20");
        assert_eq!(view.lines[0].unit_price, "$140.00");
    }
}
