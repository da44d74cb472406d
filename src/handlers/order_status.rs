//! Handler: orders.update_status

use serde::Deserialize;
use serde_json::{json, Value};

use crate::orders;
use crate::service::{Context, HandlerError};
use crate::store::Store;

pub const COMMAND: &str = "orders.update_status";

#[derive(Deserialize)]
pub struct Input {
    pub order_id: String,
    pub status: String,
}

pub fn guard<S>(ctx: &Context<S>) -> bool {
    ctx.has_fields(&["order_id", "status"])
}

pub fn handle<S: Store>(ctx: &Context<S>) -> Result<Value, HandlerError> {
    ctx.require_admin()?;
    let input = ctx.input::<Input>()?;

    let order = orders::set_status(ctx.store(), &input.order_id, &input.status)?;

    Ok(json!({ "order": serde_json::to_value(order)? }))
}
