//! Cart persistence under `furnishme-cart`.

use crate::models::{Cart, CartItem, session_keys};
use crate::storage::{KeyValueStore, StorageError, read_json, write_json};
use crate::store::Persist;

impl Persist for Cart {
    fn load(storage: &dyn KeyValueStore) -> Option<Self> {
        read_json::<Vec<CartItem>>(storage, session_keys::CART).map(Self::from_items)
    }

    fn save(&self, storage: &mut dyn KeyValueStore) -> Result<(), StorageError> {
        write_json(storage, session_keys::CART, self)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use furnishme_core::Price;

    use super::*;
    use crate::models::Product;
    use crate::storage::MemoryStorage;

    #[test]
    fn test_round_trip_keeps_order_and_quantities() {
        let mut storage = MemoryStorage::new();
        let mut cart = Cart::default();
        cart.add(&Product::new(3, "Wooden Table", Price::from_cents(19_999), 5, 45, "table"));
        cart.add(&Product::new(2, "Comfortable Sofa", Price::from_cents(29_999), 4, 32, "sofa"));
        cart.add(&Product::new(3, "Wooden Table", Price::from_cents(19_999), 5, 45, "table"));

        cart.save(&mut storage).unwrap();

        assert_eq!(Cart::load(&storage), Some(cart));
    }

    #[test]
    fn test_stored_shape() {
        let mut storage = MemoryStorage::new();
        let mut cart = Cart::default();
        cart.add(&Product::new(5, "Corner Table", Price::from_cents(8_999), 5, 15, "corner"));
        cart.save(&mut storage).unwrap();

        let raw: serde_json::Value =
            serde_json::from_str(&storage.get(session_keys::CART).unwrap()).unwrap();
        assert_eq!(
            raw,
            serde_json::json!([{"id": 5, "name": "Corner Table", "price": 89.99, "quantity": 1}])
        );
    }

    #[test]
    fn test_malformed_cart_is_absent() {
        let mut storage = MemoryStorage::new();
        storage.set(session_keys::CART, "[{\"id\":".to_owned()).unwrap();
        assert_eq!(Cart::load(&storage), None);
    }

    #[test]
    fn test_zero_quantity_lines_are_dropped_on_load() {
        let mut storage = MemoryStorage::new();
        storage
            .set(
                session_keys::CART,
                r#"[{"id":1,"name":"Modern Furniture","price":140,"quantity":0}]"#.to_owned(),
            )
            .unwrap();

        assert_eq!(Cart::load(&storage), Some(Cart::default()));
    }
}
