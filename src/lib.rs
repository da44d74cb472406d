mod checkout;
mod domain;
mod handlers;
mod store;

pub mod orders;
pub mod seed;
pub mod service;

pub use checkout::{place_order, CheckoutError, CheckoutRequest};
pub use domain::{Cart, CartLine, Order, OrderLine, OrderStatus, Product, Role, User};
pub use handlers::storefront_service;
pub use orders::OrderStatusError;
pub use service::{Context, HandlerError, Service, Session};
pub use store::{InMemoryStore, Record, Store, StoreError, Versioned, WriteBatch};
