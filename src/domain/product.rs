use std::time::SystemTime;

use serde::{Deserialize, Serialize};

use crate::store::Record;

/// Shown for products created without an uploaded image.
pub const PLACEHOLDER_IMAGE: &str = "/placeholder-product.jpg";

/// A catalog product. `price` is in the smallest currency unit; `stock` is
/// the remaining sellable quantity and can never go negative, since every
/// decrement goes through [`Product::take_stock`].
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Product {
    pub id: String,
    pub name: String,
    pub description: String,
    pub price: u32,
    pub stock: u32,
    pub image_url: String,
    pub created_at: SystemTime,
}

impl Product {
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        price: u32,
        stock: u32,
    ) -> Self {
        Product {
            id: uuid::Uuid::now_v7().to_string(),
            name: name.into(),
            description: description.into(),
            price,
            stock,
            image_url: PLACEHOLDER_IMAGE.to_string(),
            created_at: SystemTime::now(),
        }
    }

    pub fn with_image(mut self, image_url: impl Into<String>) -> Self {
        self.image_url = image_url.into();
        self
    }

    pub fn has_stock(&self, quantity: u32) -> bool {
        quantity <= self.stock
    }

    /// Decrement stock by `quantity`. Returns false and leaves stock
    /// untouched if fewer than `quantity` units remain.
    pub fn take_stock(&mut self, quantity: u32) -> bool {
        if !self.has_stock(quantity) {
            return false;
        }
        self.stock -= quantity;
        true
    }
}

impl Record for Product {
    const COLLECTION: &'static str = "products";

    fn id(&self) -> &str {
        &self.id
    }
}
