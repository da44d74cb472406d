//! Handler: cart.view

use serde_json::{json, Value};

use crate::domain::{Cart, Product};
use crate::service::{Context, HandlerError};
use crate::store::Store;

pub const COMMAND: &str = "cart.view";

pub fn handle<S: Store>(ctx: &Context<S>) -> Result<Value, HandlerError> {
    let customer_id = ctx.require_customer()?;

    let cart = ctx.store().get::<Cart>(customer_id)?;
    let lines = match &cart {
        Some(cart) => cart.data.lines(),
        None => &[],
    };

    let mut items = Vec::with_capacity(lines.len());
    let mut total: u64 = 0;
    for line in lines {
        // Lines whose product has been deleted are omitted; checkout will
        // still refuse them.
        if let Some(product) = ctx.store().get::<Product>(&line.product_id)? {
            let subtotal = u64::from(product.data.price) * u64::from(line.quantity);
            total += subtotal;
            items.push(json!({
                "product_id": product.data.id,
                "name": product.data.name,
                "price": product.data.price,
                "image_url": product.data.image_url,
                "stock": product.data.stock,
                "quantity": line.quantity,
                "subtotal": subtotal,
            }));
        }
    }

    Ok(json!({ "items": items, "total": total }))
}
