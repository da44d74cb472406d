//! Handler: orders.create
//!
//! Checkout. All the real work happens in [`checkout::place_order`]; this
//! handler only authenticates, decodes, and reports.

use serde_json::{json, Value};

use crate::checkout::{self, CheckoutRequest};
use crate::service::{Context, HandlerError};
use crate::store::Store;

pub const COMMAND: &str = "orders.create";

pub fn guard<S>(ctx: &Context<S>) -> bool {
    ctx.has_fields(&["address", "payment", "total"])
}

pub fn handle<S: Store>(ctx: &Context<S>) -> Result<Value, HandlerError> {
    let customer_id = ctx.require_customer()?;
    let request = ctx.input::<CheckoutRequest>()?;

    let order = checkout::place_order(ctx.store(), customer_id, &request)?;

    Ok(json!({ "order": serde_json::to_value(order)? }))
}
