//! Handler: cart.add
//!
//! Adds units of a product to the caller's cart, merging into an existing
//! line. The resulting quantity may not exceed the product's current stock.
//! Stock is validated again at checkout, so a later stock change only
//! surfaces there.

use serde::Deserialize;
use serde_json::{json, Value};

use crate::domain::{Cart, Product};
use crate::service::{Context, HandlerError};
use crate::store::Store;

pub const COMMAND: &str = "cart.add";

#[derive(Deserialize)]
pub struct Input {
    pub product_id: String,
    pub quantity: u32,
}

pub fn guard<S>(ctx: &Context<S>) -> bool {
    ctx.has_fields(&["product_id", "quantity"])
}

pub fn handle<S: Store>(ctx: &Context<S>) -> Result<Value, HandlerError> {
    let customer_id = ctx.require_customer()?;
    let input = ctx.input::<Input>()?;

    if input.quantity == 0 {
        return Err(HandlerError::Rejected("quantity must be positive".into()));
    }

    let product = ctx
        .store()
        .get::<Product>(&input.product_id)?
        .ok_or_else(|| HandlerError::NotFound(input.product_id.clone()))?;

    let mut cart = ctx
        .store()
        .get::<Cart>(customer_id)?
        .map(|c| c.data)
        .unwrap_or_else(|| Cart::new(customer_id));

    let merged = cart
        .line(&input.product_id)
        .map(|l| l.quantity)
        .unwrap_or(0)
        + input.quantity;
    if !product.data.has_stock(merged) {
        return Err(HandlerError::Rejected(format!(
            "insufficient stock for {} (requested {}, available {})",
            product.data.name, merged, product.data.stock
        )));
    }

    let quantity = cart.add(input.product_id, input.quantity);
    ctx.store().save(&cart)?;

    Ok(json!({ "quantity": quantity, "count": cart.count() }))
}
