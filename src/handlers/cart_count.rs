//! Handler: cart.count
//!
//! Cheap unit count for the cart badge.

use serde_json::{json, Value};

use crate::domain::Cart;
use crate::service::{Context, HandlerError};
use crate::store::Store;

pub const COMMAND: &str = "cart.count";

pub fn handle<S: Store>(ctx: &Context<S>) -> Result<Value, HandlerError> {
    let customer_id = ctx.require_customer()?;

    let count = ctx
        .store()
        .get::<Cart>(customer_id)?
        .map(|c| c.data.count())
        .unwrap_or(0);

    Ok(json!({ "count": count }))
}
