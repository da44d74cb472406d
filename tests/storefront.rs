//! End-to-end dispatch tests: browse, cart, checkout, administer.

mod support;

use serde_json::json;
use storefront::seed;
use storefront::{storefront_service, InMemoryStore, Service, Session};

fn shop() -> (Service<InMemoryStore>, Session) {
    let store = support::store();
    let admin = seed::ensure_admin(&store, "admin@gmail.com", "Admin").unwrap();
    (storefront_service(store), Session::admin(admin.id))
}

fn register_customer(service: &Service<InMemoryStore>, email: &str) -> Session {
    let resp = service
        .dispatch(
            "users.register",
            json!({ "email": email, "name": "Budi" }),
            Session::anonymous(),
        )
        .unwrap();
    Session::customer(resp["user"]["id"].as_str().unwrap())
}

fn create_product(
    service: &Service<InMemoryStore>,
    admin: &Session,
    name: &str,
    price: u32,
    stock: u32,
) -> String {
    let resp = service
        .dispatch(
            "products.create",
            json!({ "name": name, "description": "", "price": price, "stock": stock }),
            admin.clone(),
        )
        .unwrap();
    resp["product"]["id"].as_str().unwrap().to_string()
}

#[test]
fn browsing_needs_no_session() {
    let (service, admin) = shop();
    create_product(&service, &admin, "Kopi Gayo", 75000, 10);

    let resp = service
        .dispatch("products.list", json!({}), Session::anonymous())
        .unwrap();
    let products = resp["products"].as_array().unwrap();
    assert_eq!(products.len(), 1);
    assert_eq!(products[0]["name"], "Kopi Gayo");
}

#[test]
fn catalog_commands_are_admin_only() {
    let (service, _admin) = shop();
    let customer = register_customer(&service, "budi@example.com");

    let err = service
        .dispatch(
            "products.create",
            json!({ "name": "X", "price": 1000, "stock": 1 }),
            customer,
        )
        .unwrap_err();
    assert_eq!(err.status_code(), 403);

    let err = service
        .dispatch(
            "products.create",
            json!({ "name": "X", "price": 1000, "stock": 1 }),
            Session::anonymous(),
        )
        .unwrap_err();
    assert_eq!(err.status_code(), 401);
}

#[test]
fn cart_commands_need_a_customer() {
    let (service, admin) = shop();

    let err = service
        .dispatch("cart.view", json!({}), Session::anonymous())
        .unwrap_err();
    assert_eq!(err.status_code(), 401);

    // Admins administer; they do not shop.
    let err = service.dispatch("cart.view", json!({}), admin).unwrap_err();
    assert_eq!(err.status_code(), 403);
}

#[test]
fn cart_add_merges_and_caps_at_stock() {
    let (service, admin) = shop();
    let product_id = create_product(&service, &admin, "Kopi Gayo", 75000, 5);
    let customer = register_customer(&service, "budi@example.com");

    let resp = service
        .dispatch(
            "cart.add",
            json!({ "product_id": product_id, "quantity": 2 }),
            customer.clone(),
        )
        .unwrap();
    assert_eq!(resp["quantity"], 2);

    let resp = service
        .dispatch(
            "cart.add",
            json!({ "product_id": product_id, "quantity": 3 }),
            customer.clone(),
        )
        .unwrap();
    assert_eq!(resp["quantity"], 5);

    // 5 in the cart already; one more would exceed stock.
    let err = service
        .dispatch(
            "cart.add",
            json!({ "product_id": product_id, "quantity": 1 }),
            customer.clone(),
        )
        .unwrap_err();
    assert_eq!(err.status_code(), 422);

    let resp = service
        .dispatch("cart.count", json!({}), customer)
        .unwrap();
    assert_eq!(resp["count"], 5);
}

#[test]
fn shop_flow_from_cart_to_delivered_order() {
    let (service, admin) = shop();
    let kopi = create_product(&service, &admin, "Kopi Gayo", 10000, 5);
    let teh = create_product(&service, &admin, "Teh Melati", 5000, 3);
    let customer = register_customer(&service, "budi@example.com");

    service
        .dispatch(
            "cart.add",
            json!({ "product_id": kopi, "quantity": 2 }),
            customer.clone(),
        )
        .unwrap();
    service
        .dispatch(
            "cart.add",
            json!({ "product_id": teh, "quantity": 1 }),
            customer.clone(),
        )
        .unwrap();

    let cart = service
        .dispatch("cart.view", json!({}), customer.clone())
        .unwrap();
    assert_eq!(cart["total"], 25000);
    assert_eq!(cart["items"].as_array().unwrap().len(), 2);

    let resp = service
        .dispatch(
            "orders.create",
            json!({ "address": "Jl. Merdeka 1", "payment": "cod", "total": 25000 }),
            customer.clone(),
        )
        .unwrap();
    let order_id = resp["order"]["id"].as_str().unwrap().to_string();
    assert_eq!(resp["order"]["total"], 25000);
    assert_eq!(resp["order"]["status"], "PENDING");

    // Cart emptied, stock drained.
    let resp = service
        .dispatch("cart.count", json!({}), customer.clone())
        .unwrap();
    assert_eq!(resp["count"], 0);
    let products = service
        .dispatch("products.list", json!({}), Session::anonymous())
        .unwrap();
    for product in products["products"].as_array().unwrap() {
        match product["name"].as_str().unwrap() {
            "Kopi Gayo" => assert_eq!(product["stock"], 3),
            "Teh Melati" => assert_eq!(product["stock"], 2),
            other => panic!("unexpected product {}", other),
        }
    }

    // The customer sees their order; the admin panel sees it too.
    let mine = service
        .dispatch("orders.list", json!({}), customer.clone())
        .unwrap();
    assert_eq!(mine["orders"].as_array().unwrap().len(), 1);
    let all = service
        .dispatch("orders.list_all", json!({}), admin.clone())
        .unwrap();
    assert_eq!(all["orders"].as_array().unwrap().len(), 1);

    // Customers cannot administer status; admins walk it to delivered.
    let err = service
        .dispatch(
            "orders.update_status",
            json!({ "order_id": order_id, "status": "PAID" }),
            customer,
        )
        .unwrap_err();
    assert_eq!(err.status_code(), 403);

    for status in ["PAID", "SHIPPED", "DELIVERED"] {
        let resp = service
            .dispatch(
                "orders.update_status",
                json!({ "order_id": order_id, "status": status }),
                admin.clone(),
            )
            .unwrap();
        assert_eq!(resp["order"]["status"], status);
    }
}

#[test]
fn checkout_with_stale_total_is_rejected() {
    let (service, admin) = shop();
    let kopi = create_product(&service, &admin, "Kopi Gayo", 10000, 5);
    let customer = register_customer(&service, "budi@example.com");

    service
        .dispatch(
            "cart.add",
            json!({ "product_id": kopi, "quantity": 1 }),
            customer.clone(),
        )
        .unwrap();

    // The shop page showed an older price.
    let err = service
        .dispatch(
            "orders.create",
            json!({ "address": "Jl. Merdeka 1", "payment": "cod", "total": 9000 }),
            customer.clone(),
        )
        .unwrap_err();
    assert_eq!(err.status_code(), 422);

    // Nothing moved; the corrected total goes through.
    let resp = service
        .dispatch(
            "orders.create",
            json!({ "address": "Jl. Merdeka 1", "payment": "cod", "total": 10000 }),
            customer,
        )
        .unwrap();
    assert_eq!(resp["order"]["total"], 10000);
}

#[test]
fn profile_update_renames_the_account() {
    let (service, _admin) = shop();
    let customer = register_customer(&service, "budi@example.com");

    let resp = service
        .dispatch("profile.update", json!({ "name": "Budi S." }), customer)
        .unwrap();
    assert_eq!(resp["user"]["name"], "Budi S.");
}

#[test]
fn duplicate_registration_is_rejected() {
    let (service, _admin) = shop();
    register_customer(&service, "budi@example.com");

    let err = service
        .dispatch(
            "users.register",
            json!({ "email": "budi@example.com" }),
            Session::anonymous(),
        )
        .unwrap_err();
    assert_eq!(err.status_code(), 422);
}

#[test]
fn guards_reject_malformed_payloads() {
    let (service, admin) = shop();

    let err = service
        .dispatch("products.create", json!({ "name": "X" }), admin.clone())
        .unwrap_err();
    assert_eq!(err.status_code(), 400);

    let err = service
        .dispatch(
            "orders.update_status",
            json!({ "order_id": "o-1" }),
            admin,
        )
        .unwrap_err();
    assert_eq!(err.status_code(), 400);
}
