use serde::{Deserialize, Serialize};

use crate::store::Record;

/// One (product, quantity) pairing awaiting checkout.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLine {
    pub product_id: String,
    pub quantity: u32,
}

/// A customer's cart. One cart per customer, stored under the customer id
/// with its lines embedded, so a single version number covers the whole
/// cart and checkout can detect any concurrent cart edit.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Cart {
    pub customer_id: String,
    lines: Vec<CartLine>,
}

impl Cart {
    pub fn new(customer_id: impl Into<String>) -> Self {
        Cart {
            customer_id: customer_id.into(),
            lines: Vec::new(),
        }
    }

    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    pub fn line(&self, product_id: &str) -> Option<&CartLine> {
        self.lines.iter().find(|l| l.product_id == product_id)
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Total number of units across all lines (the cart badge count).
    pub fn count(&self) -> u32 {
        self.lines.iter().map(|l| l.quantity).sum()
    }

    /// Add `quantity` units of a product, merging into an existing line.
    /// Returns the resulting quantity for that product.
    pub fn add(&mut self, product_id: impl Into<String>, quantity: u32) -> u32 {
        let product_id = product_id.into();
        match self.lines.iter_mut().find(|l| l.product_id == product_id) {
            Some(line) => {
                line.quantity += quantity;
                line.quantity
            }
            None => {
                self.lines.push(CartLine {
                    product_id,
                    quantity,
                });
                quantity
            }
        }
    }

    /// Replace the quantity of an existing line. Returns false if the
    /// product is not in the cart.
    pub fn set_quantity(&mut self, product_id: &str, quantity: u32) -> bool {
        match self.lines.iter_mut().find(|l| l.product_id == product_id) {
            Some(line) => {
                line.quantity = quantity;
                true
            }
            None => false,
        }
    }

    /// Remove a product's line. Returns false if it was not in the cart.
    pub fn remove(&mut self, product_id: &str) -> bool {
        let before = self.lines.len();
        self.lines.retain(|l| l.product_id != product_id);
        self.lines.len() < before
    }
}

impl Record for Cart {
    const COLLECTION: &'static str = "carts";

    fn id(&self) -> &str {
        &self.customer_id
    }
}
