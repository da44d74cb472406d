//! Handler: cart.remove

use serde::Deserialize;
use serde_json::{json, Value};

use crate::domain::Cart;
use crate::service::{Context, HandlerError};
use crate::store::Store;

pub const COMMAND: &str = "cart.remove";

#[derive(Deserialize)]
pub struct Input {
    pub product_id: String,
}

pub fn guard<S>(ctx: &Context<S>) -> bool {
    ctx.has_field("product_id")
}

pub fn handle<S: Store>(ctx: &Context<S>) -> Result<Value, HandlerError> {
    let customer_id = ctx.require_customer()?;
    let input = ctx.input::<Input>()?;

    let mut cart = ctx
        .store()
        .get::<Cart>(customer_id)?
        .map(|c| c.data)
        .ok_or_else(|| HandlerError::NotFound("cart".into()))?;

    if !cart.remove(&input.product_id) {
        return Err(HandlerError::NotFound(input.product_id));
    }

    if cart.is_empty() {
        ctx.store().delete::<Cart>(customer_id)?;
    } else {
        ctx.store().save(&cart)?;
    }

    Ok(json!({ "count": cart.count() }))
}
