//! Shared helpers for the integration suites.
#![allow(dead_code)]

use storefront::{Cart, CheckoutRequest, InMemoryStore, Product, Store};

/// Fresh store with test logging wired up.
pub fn store() -> InMemoryStore {
    let _ = env_logger::builder().is_test(true).try_init();
    InMemoryStore::new()
}

/// Insert a product and return it (with its generated id).
pub fn seed_product(store: &InMemoryStore, name: &str, price: u32, stock: u32) -> Product {
    let product = Product::new(name, format!("{} (test)", name), price, stock);
    store.insert(&product).unwrap();
    product
}

/// Put `quantity` units of a product into a customer's cart.
pub fn fill_cart(store: &InMemoryStore, customer_id: &str, product_id: &str, quantity: u32) {
    let mut cart = store
        .get::<Cart>(customer_id)
        .unwrap()
        .map(|c| c.data)
        .unwrap_or_else(|| Cart::new(customer_id));
    cart.add(product_id, quantity);
    store.save(&cart).unwrap();
}

/// A checkout request with the given claimed total.
pub fn checkout_request(total: u64) -> CheckoutRequest {
    CheckoutRequest {
        address: "Jl. Merdeka 1".to_string(),
        payment: "cod".to_string(),
        total,
    }
}
