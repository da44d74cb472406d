//! Checkout integration tests: the atomic cart-to-order transaction.

mod support;

use std::sync::{Arc, Barrier};
use std::thread;

use storefront::{
    place_order, Cart, CheckoutError, Order, OrderStatus, Product, Store, StoreError,
};
use support::{checkout_request, fill_cart, seed_product, store};

#[test]
fn happy_path_creates_order_and_drains_stock() {
    let store = store();
    let a = seed_product(&store, "Kopi Gayo", 10000, 5);
    let b = seed_product(&store, "Teh Melati", 5000, 3);

    fill_cart(&store, "cust-1", &a.id, 2);
    fill_cart(&store, "cust-1", &b.id, 1);

    let order = place_order(&store, "cust-1", &checkout_request(25000)).unwrap();

    assert_eq!(order.total, 25000);
    assert_eq!(order.status, OrderStatus::Pending);
    assert_eq!(order.customer_id, "cust-1");
    assert_eq!(order.lines.len(), 2);

    let line_a = order.lines.iter().find(|l| l.product_id == a.id).unwrap();
    assert_eq!(line_a.quantity, 2);
    assert_eq!(line_a.price, 10000);
    assert_eq!(line_a.product_name, "Kopi Gayo");
    let line_b = order.lines.iter().find(|l| l.product_id == b.id).unwrap();
    assert_eq!(line_b.quantity, 1);
    assert_eq!(line_b.price, 5000);

    // Durable, stock decremented, cart gone.
    let persisted = store.get::<Order>(&order.id).unwrap().unwrap();
    assert_eq!(persisted.data.total, 25000);
    assert_eq!(store.get::<Product>(&a.id).unwrap().unwrap().data.stock, 3);
    assert_eq!(store.get::<Product>(&b.id).unwrap().unwrap().data.stock, 2);
    assert!(store.get::<Cart>("cust-1").unwrap().is_none());
}

#[test]
fn insufficient_stock_changes_nothing() {
    let store = store();
    let a = seed_product(&store, "Kopi Gayo", 10000, 5);
    fill_cart(&store, "cust-1", &a.id, 10);

    let err = place_order(&store, "cust-1", &checkout_request(100000)).unwrap_err();
    match err {
        CheckoutError::InsufficientStock {
            product_id,
            requested,
            available,
            ..
        } => {
            assert_eq!(product_id, a.id);
            assert_eq!(requested, 10);
            assert_eq!(available, 5);
        }
        other => panic!("expected InsufficientStock, got {:?}", other),
    }

    assert_eq!(store.get::<Product>(&a.id).unwrap().unwrap().data.stock, 5);
    let cart = store.get::<Cart>("cust-1").unwrap().unwrap();
    assert_eq!(cart.data.line(&a.id).unwrap().quantity, 10);
    assert!(store.find::<Order>(&|_| true).unwrap().is_empty());
}

#[test]
fn corrected_cart_succeeds_on_retry() {
    let store = store();
    let a = seed_product(&store, "Kopi Gayo", 10000, 5);
    fill_cart(&store, "cust-1", &a.id, 10);

    assert!(place_order(&store, "cust-1", &checkout_request(100000)).is_err());

    let mut cart = store.get::<Cart>("cust-1").unwrap().unwrap();
    assert!(cart.data.set_quantity(&a.id, 5));
    store.save(&cart.data).unwrap();

    let order = place_order(&store, "cust-1", &checkout_request(50000)).unwrap();
    assert_eq!(order.total, 50000);
    assert_eq!(store.get::<Product>(&a.id).unwrap().unwrap().data.stock, 0);
}

#[test]
fn empty_cart_is_rejected() {
    let store = store();
    let err = place_order(&store, "cust-1", &checkout_request(0)).unwrap_err();
    assert_eq!(err, CheckoutError::EmptyCart);
}

#[test]
fn blank_fields_are_rejected_before_anything_else() {
    let store = store();
    let a = seed_product(&store, "Kopi Gayo", 10000, 5);
    fill_cart(&store, "cust-1", &a.id, 1);

    let mut request = checkout_request(10000);
    request.address = "  ".to_string();
    assert_eq!(
        place_order(&store, "cust-1", &request).unwrap_err(),
        CheckoutError::MissingField("address")
    );

    let mut request = checkout_request(10000);
    request.payment = String::new();
    assert_eq!(
        place_order(&store, "cust-1", &request).unwrap_err(),
        CheckoutError::MissingField("payment")
    );

    assert_eq!(store.get::<Product>(&a.id).unwrap().unwrap().data.stock, 5);
}

#[test]
fn claimed_total_must_match_current_prices() {
    let store = store();
    let a = seed_product(&store, "Kopi Gayo", 10000, 5);
    fill_cart(&store, "cust-1", &a.id, 2);

    let err = place_order(&store, "cust-1", &checkout_request(19000)).unwrap_err();
    assert_eq!(
        err,
        CheckoutError::TotalMismatch {
            claimed: 19000,
            computed: 20000,
        }
    );

    assert_eq!(store.get::<Product>(&a.id).unwrap().unwrap().data.stock, 5);
    assert!(store.get::<Cart>("cust-1").unwrap().is_some());
}

#[test]
fn deleted_product_fails_the_checkout() {
    let store = store();
    let a = seed_product(&store, "Kopi Gayo", 10000, 5);
    fill_cart(&store, "cust-1", &a.id, 1);
    store.delete::<Product>(&a.id).unwrap();

    let err = place_order(&store, "cust-1", &checkout_request(10000)).unwrap_err();
    assert_eq!(
        err,
        CheckoutError::ProductMissing {
            product_id: a.id.clone(),
        }
    );
    assert!(store.get::<Cart>("cust-1").unwrap().is_some());
}

#[test]
fn order_prices_survive_later_catalog_edits() {
    let store = store();
    let a = seed_product(&store, "Kopi Gayo", 10000, 5);
    fill_cart(&store, "cust-1", &a.id, 2);
    let order = place_order(&store, "cust-1", &checkout_request(20000)).unwrap();

    // Reprice the product after the sale.
    let current = store.get::<Product>(&a.id).unwrap().unwrap();
    let mut repriced = current.data;
    repriced.price = 99000;
    store.update(&repriced, current.version).unwrap();

    let persisted = store.get::<Order>(&order.id).unwrap().unwrap();
    assert_eq!(persisted.data.lines[0].price, 10000);
    assert_eq!(persisted.data.total, 20000);
    assert_eq!(persisted.data.computed_total(), 20000);
}

#[test]
fn sequential_checkouts_never_oversell() {
    let store = store();
    let a = seed_product(&store, "Kopi Gayo", 10000, 3);

    let mut sold = 0;
    for customer in ["cust-1", "cust-2", "cust-3"] {
        fill_cart(&store, customer, &a.id, 2);
        if place_order(&store, customer, &checkout_request(20000)).is_ok() {
            sold += 2;
        }
    }

    let remaining = store.get::<Product>(&a.id).unwrap().unwrap().data.stock;
    assert_eq!(sold, 2); // only the first fits
    assert_eq!(remaining, 1);
}

#[test]
fn concurrent_checkouts_cannot_both_take_the_last_unit() {
    let store = store();
    let a = seed_product(&store, "Kopi Gayo", 10000, 1);
    fill_cart(&store, "cust-1", &a.id, 1);
    fill_cart(&store, "cust-2", &a.id, 1);

    let barrier = Arc::new(Barrier::new(2));
    let mut handles = Vec::new();
    for customer in ["cust-1", "cust-2"] {
        let store = store.clone();
        let barrier = barrier.clone();
        handles.push(thread::spawn(move || {
            barrier.wait();
            place_order(&store, customer, &checkout_request(10000))
        }));
    }

    let results: Vec<Result<Order, CheckoutError>> =
        handles.into_iter().map(|h| h.join().unwrap()).collect();

    let winners: Vec<&Order> = results.iter().filter_map(|r| r.as_ref().ok()).collect();
    let losers: Vec<&CheckoutError> = results.iter().filter_map(|r| r.as_ref().err()).collect();

    assert_eq!(winners.len(), 1);
    assert_eq!(losers.len(), 1);
    match losers[0] {
        // Re-validated against fresh stock after losing the version race.
        CheckoutError::InsufficientStock { available, .. } => assert_eq!(*available, 0),
        // Or the conflict itself, if the race outlasted the bounded retries.
        CheckoutError::Store(StoreError::Conflict { .. }) => {}
        other => panic!("unexpected loser error: {:?}", other),
    }

    assert_eq!(store.get::<Product>(&a.id).unwrap().unwrap().data.stock, 0);
    assert_eq!(store.find::<Order>(&|_| true).unwrap().len(), 1);

    // The loser's cart is untouched; the winner's is gone.
    let winner = &winners[0].customer_id;
    let loser = if winner == "cust-1" { "cust-2" } else { "cust-1" };
    assert!(store.get::<Cart>(winner).unwrap().is_none());
    let loser_cart = store.get::<Cart>(loser).unwrap().unwrap();
    assert_eq!(loser_cart.data.line(&a.id).unwrap().quantity, 1);
}
