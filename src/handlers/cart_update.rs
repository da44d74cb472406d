//! Handler: cart.update
//!
//! Replaces the quantity of a line already in the caller's cart.

use serde::Deserialize;
use serde_json::{json, Value};

use crate::domain::{Cart, Product};
use crate::service::{Context, HandlerError};
use crate::store::Store;

pub const COMMAND: &str = "cart.update";

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

    if !product.data.has_stock(input.quantity) {
        return Err(HandlerError::Rejected(format!(
            "insufficient stock for {} (requested {}, available {})",
            product.data.name, input.quantity, product.data.stock
        )));
    }

    let mut cart = ctx
        .store()
        .get::<Cart>(customer_id)?
        .map(|c| c.data)
        .ok_or_else(|| HandlerError::NotFound("cart".into()))?;

    if !cart.set_quantity(&input.product_id, input.quantity) {
        return Err(HandlerError::NotFound(input.product_id));
    }

    ctx.store().save(&cart)?;

    Ok(json!({ "quantity": input.quantity, "count": cart.count() }))
}
