//! Handler: orders.list_all
//!
//! Every order in the store, for the admin panel.

use serde_json::{json, Value};

use crate::orders;
use crate::service::{Context, HandlerError};
use crate::store::Store;

pub const COMMAND: &str = "orders.list_all";

pub fn handle<S: Store>(ctx: &Context<S>) -> Result<Value, HandlerError> {
    ctx.require_admin()?;

    let orders = orders::all(ctx.store())?;

    Ok(json!({ "orders": serde_json::to_value(orders)? }))
}
