//! Handler: orders.list
//!
//! The caller's own orders, newest first.

use serde_json::{json, Value};

use crate::orders;
use crate::service::{Context, HandlerError};
use crate::store::Store;

pub const COMMAND: &str = "orders.list";

pub fn handle<S: Store>(ctx: &Context<S>) -> Result<Value, HandlerError> {
    let customer_id = ctx.require_customer()?;

    let orders = orders::for_customer(ctx.store(), customer_id)?;

    Ok(json!({ "orders": serde_json::to_value(orders)? }))
}
