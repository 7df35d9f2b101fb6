//! End-to-end cart walkthroughs against in-memory storage.

#![allow(clippy::unwrap_used, clippy::indexing_slicing)]

use marketplace_cart::{CartStore, DEFAULT_STORAGE_KEY, MemoryStore};
use marketplace_core::ProductId;
use marketplace_integration_tests::product;
use rust_decimal::Decimal;
use serde_json::json;

fn new_cart() -> CartStore<MemoryStore> {
    CartStore::open(MemoryStore::new(), DEFAULT_STORAGE_KEY)
}

#[test]
fn test_add_update_remove_walkthrough() {
    let mut cart = new_cart();
    let p = product(7, "20", Some(""));
    let id = ProductId::new(7);

    cart.add_to_cart(p.clone(), 1, None, None).unwrap();
    assert_eq!(cart.len(), 1);
    assert_eq!(cart.items()[0].quantity, 1);
    assert_eq!(cart.cart_item_count(), 1);
    assert_eq!(cart.cart_total(), Decimal::from(20));

    cart.add_to_cart(p, 2, None, None).unwrap();
    assert_eq!(cart.len(), 1);
    assert_eq!(cart.items()[0].quantity, 3);
    assert_eq!(cart.cart_item_count(), 3);
    assert_eq!(cart.cart_total(), Decimal::from(60));

    cart.update_quantity(id, 1, None, None);
    assert_eq!(cart.items()[0].quantity, 1);
    assert_eq!(cart.cart_total(), Decimal::from(20));

    cart.remove_from_cart(id, None, None);
    assert!(cart.is_empty());
    assert_eq!(cart.cart_item_count(), 0);
    assert_eq!(cart.cart_total(), Decimal::ZERO);
}

#[test]
fn test_total_uses_sale_price_then_regular() {
    let mut cart = new_cart();
    cart.add_to_cart(product(1, "15.00", Some("10.00")), 2, None, None)
        .unwrap();
    cart.add_to_cart(product(2, "5.00", None), 3, None, None)
        .unwrap();

    assert_eq!(cart.cart_total(), Decimal::new(3500, 2));
}

#[test]
fn test_variants_are_tracked_separately() {
    let mut cart = new_cart();
    let p = product(4, "12", None);
    let id = ProductId::new(4);

    cart.add_to_cart(p.clone(), 1, Some("red"), Some("M")).unwrap();
    cart.add_to_cart(p.clone(), 1, Some("blue"), Some("M")).unwrap();
    cart.add_to_cart(p, 2, Some("red"), Some("M")).unwrap();

    assert_eq!(cart.len(), 2);
    assert_eq!(cart.cart_item_count(), 4);
    assert!(cart.is_in_cart(id, Some("red"), Some("M")));
    assert!(cart.is_in_cart(id, Some("blue"), Some("M")));
    assert!(!cart.is_in_cart(id, Some("red"), Some("L")));
    assert!(!cart.is_in_cart(id, None, None));

    cart.update_quantity(id, 0, Some("blue"), Some("M"));
    assert_eq!(cart.len(), 1);
    assert_eq!(cart.items()[0].quantity, 3);
}

#[test]
fn test_insertion_order_is_preserved() {
    let mut cart = new_cart();
    for id in [3, 1, 2] {
        cart.add_to_cart(product(id, "1", None), 1, None, None).unwrap();
    }
    cart.add_to_cart(product(1, "1", None), 1, None, None).unwrap();

    let ids: Vec<i64> = cart.items().iter().map(|item| item.id.as_i64()).collect();
    assert_eq!(ids, vec![3, 1, 2]);
}

#[test]
fn test_checkout_clears_persisted_cart() {
    let mut cart = new_cart();
    cart.add_to_cart(product(1, "9.99", None), 2, Some("black"), None)
        .unwrap();
    cart.clear_cart();

    assert!(cart.is_empty());
    assert_eq!(cart.storage().raw(DEFAULT_STORAGE_KEY), Some(&json!([])));
}
