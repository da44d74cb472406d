//! Handler: products.delete

use serde::Deserialize;
use serde_json::{json, Value};

use crate::domain::Product;
use crate::service::{Context, HandlerError};
use crate::store::Store;

pub const COMMAND: &str = "products.delete";

#[derive(Deserialize)]
pub struct Input {
    pub id: String,
}

pub fn guard<S>(ctx: &Context<S>) -> bool {
    ctx.has_field("id")
}

pub fn handle<S: Store>(ctx: &Context<S>) -> Result<Value, HandlerError> {
    ctx.require_admin()?;
    let input = ctx.input::<Input>()?;

    if ctx.store().get::<Product>(&input.id)?.is_none() {
        return Err(HandlerError::NotFound(input.id));
    }

    ctx.store().delete::<Product>(&input.id)?;

    Ok(json!({ "deleted": true }))
}
