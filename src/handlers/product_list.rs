//! Handler: products.list
//!
//! Public: the shop listing needs no session.

use serde_json::{json, Value};

use crate::domain::Product;
use crate::service::{Context, HandlerError};
use crate::store::Store;

pub const COMMAND: &str = "products.list";

pub fn handle<S: Store>(ctx: &Context<S>) -> Result<Value, HandlerError> {
    let mut products: Vec<Product> = ctx
        .store()
        .find::<Product>(&|_| true)?
        .into_iter()
        .map(|v| v.data)
        .collect();
    products.sort_by(|a, b| b.created_at.cmp(&a.created_at));

    Ok(json!({ "products": serde_json::to_value(products)? }))
}
