//! Handler: products.update

use serde::Deserialize;
use serde_json::{json, Value};

use crate::domain::Product;
use crate::service::{Context, HandlerError};
use crate::store::Store;

pub const COMMAND: &str = "products.update";

#[derive(Deserialize)]
pub struct Input {
    pub id: String,
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<u32>,
    pub stock: Option<u32>,
    pub image_url: Option<String>,
}

pub fn guard<S>(ctx: &Context<S>) -> bool {
    ctx.has_field("id")
}

pub fn handle<S: Store>(ctx: &Context<S>) -> Result<Value, HandlerError> {
    ctx.require_admin()?;
    let input = ctx.input::<Input>()?;

    let existing = ctx
        .store()
        .get::<Product>(&input.id)?
        .ok_or_else(|| HandlerError::NotFound(input.id.clone()))?;

    let mut product = existing.data;
    if let Some(name) = input.name {
        if name.trim().is_empty() {
            return Err(HandlerError::Rejected("product name is required".into()));
        }
        product.name = name.trim().to_string();
    }
    if let Some(description) = input.description {
        product.description = description;
    }
    if let Some(price) = input.price {
        if price == 0 {
            return Err(HandlerError::Rejected("price must be positive".into()));
        }
        product.price = price;
    }
    if let Some(stock) = input.stock {
        product.stock = stock;
    }
    if let Some(image_url) = input.image_url {
        product.image_url = image_url;
    }

    let updated = ctx.store().update(&product, existing.version)?;

    Ok(json!({ "product": serde_json::to_value(updated.data)? }))
}
