//! Handler: products.create

use serde::Deserialize;
use serde_json::{json, Value};

use crate::domain::Product;
use crate::service::{Context, HandlerError};
use crate::store::Store;

pub const COMMAND: &str = "products.create";

#[derive(Deserialize)]
pub struct Input {
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub price: u32,
    pub stock: u32,
    pub image_url: Option<String>,
}

pub fn guard<S>(ctx: &Context<S>) -> bool {
    ctx.has_fields(&["name", "price", "stock"])
}

pub fn handle<S: Store>(ctx: &Context<S>) -> Result<Value, HandlerError> {
    ctx.require_admin()?;
    let input = ctx.input::<Input>()?;

    if input.name.trim().is_empty() {
        return Err(HandlerError::Rejected("product name is required".into()));
    }
    if input.price == 0 {
        return Err(HandlerError::Rejected("price must be positive".into()));
    }

    let mut product = Product::new(
        input.name.trim(),
        input.description,
        input.price,
        input.stock,
    );
    if let Some(image_url) = input.image_url {
        product = product.with_image(image_url);
    }

    ctx.store().insert(&product)?;

    Ok(json!({ "product": serde_json::to_value(product)? }))
}
