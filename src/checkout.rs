//! Checkout - convert a customer's cart into a durable order.
//!
//! The whole effect (order created, stock decremented per line, cart
//! emptied) is queued into one [`WriteBatch`] and applied atomically. Every
//! product row and the cart row are version-checked, so a competing checkout
//! (or a concurrent cart edit) rejects the batch before anything is written.
//! On a conflict the call retries against fresh state; the retry either
//! passes with the new stock or fails `InsufficientStock` with no side
//! effects. Stock can never go negative.

use std::fmt;

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};

use crate::domain::{Cart, Order, OrderLine, Product};
use crate::store::{Store, StoreError, Versioned, WriteBatch};

/// How many times a checkout re-reads and re-validates after losing a
/// version race before giving up and surfacing the conflict.
const MAX_COMMIT_ATTEMPTS: u32 = 3;

/// What the customer submits at checkout. `total` is the amount the customer
/// confirmed on screen; it must match the total recomputed from current
/// prices or the checkout is rejected.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CheckoutRequest {
    pub address: String,
    pub payment: String,
    pub total: u64,
}

/// Error type for checkout. Every variant means nothing was written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckoutError {
    /// A required request field was empty.
    MissingField(&'static str),
    /// Checkout attempted with no cart lines.
    EmptyCart,
    /// A cart line references a product that no longer exists.
    ProductMissing { product_id: String },
    /// A cart line asks for more units than remain.
    InsufficientStock {
        product_id: String,
        product_name: String,
        requested: u32,
        available: u32,
    },
    /// The customer-confirmed total disagrees with current prices.
    TotalMismatch { claimed: u64, computed: u64 },
    /// The store rejected the transaction. Transient; safe to retry.
    Store(StoreError),
}

impl fmt::Display for CheckoutError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CheckoutError::MissingField(field) => write!(f, "missing field: {}", field),
            CheckoutError::EmptyCart => write!(f, "cart is empty"),
            CheckoutError::ProductMissing { product_id } => {
                write!(f, "product no longer exists: {}", product_id)
            }
            CheckoutError::InsufficientStock {
                product_name,
                requested,
                available,
                ..
            } => write!(
                f,
                "insufficient stock for {} (requested {}, available {})",
                product_name, requested, available
            ),
            CheckoutError::TotalMismatch { claimed, computed } => write!(
                f,
                "total mismatch (claimed {}, computed {})",
                claimed, computed
            ),
            CheckoutError::Store(e) => write!(f, "checkout aborted by store: {}", e),
        }
    }
}

impl std::error::Error for CheckoutError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CheckoutError::Store(e) => Some(e),
            _ => None,
        }
    }
}

impl From<StoreError> for CheckoutError {
    fn from(err: StoreError) -> Self {
        CheckoutError::Store(err)
    }
}

/// Place an order from the customer's current cart.
///
/// Preconditions are checked in order before any mutation: non-empty
/// address and payment, non-empty cart, every product present, every line
/// within stock, and the claimed total equal to the recomputed one. Only
/// then is the order inserted, stock decremented, and the cart deleted,
/// as one atomic batch or not at all.
pub fn place_order<S: Store>(
    store: &S,
    customer_id: &str,
    request: &CheckoutRequest,
) -> Result<Order, CheckoutError> {
    if request.address.trim().is_empty() {
        return Err(CheckoutError::MissingField("address"));
    }
    if request.payment.trim().is_empty() {
        return Err(CheckoutError::MissingField("payment"));
    }

    let mut attempt = 1;
    loop {
        match try_place_order(store, customer_id, request) {
            // A version race, or a row that vanished between read and
            // commit. Fresh reads either pass or fail a precondition.
            Err(CheckoutError::Store(
                err @ (StoreError::Conflict { .. } | StoreError::NotFound { .. }),
            )) if attempt < MAX_COMMIT_ATTEMPTS => {
                warn!(
                    "checkout for {} lost a write race ({}), retrying (attempt {})",
                    customer_id, err, attempt
                );
                attempt += 1;
            }
            result => return result,
        }
    }
}

fn try_place_order<S: Store>(
    store: &S,
    customer_id: &str,
    request: &CheckoutRequest,
) -> Result<Order, CheckoutError> {
    let cart: Versioned<Cart> = store
        .get(customer_id)?
        .filter(|c: &Versioned<Cart>| !c.data.is_empty())
        .ok_or(CheckoutError::EmptyCart)?;

    let mut lines = Vec::with_capacity(cart.data.lines().len());
    let mut touched_products = Vec::with_capacity(cart.data.lines().len());

    for cart_line in cart.data.lines() {
        let mut product: Versioned<Product> =
            store
                .get(&cart_line.product_id)?
                .ok_or_else(|| CheckoutError::ProductMissing {
                    product_id: cart_line.product_id.clone(),
                })?;

        if !product.data.take_stock(cart_line.quantity) {
            return Err(CheckoutError::InsufficientStock {
                product_id: product.data.id.clone(),
                product_name: product.data.name.clone(),
                requested: cart_line.quantity,
                available: product.data.stock,
            });
        }

        // Price and name snapshots; live catalog edits never touch them.
        lines.push(OrderLine {
            product_id: product.data.id.clone(),
            product_name: product.data.name.clone(),
            quantity: cart_line.quantity,
            price: product.data.price,
        });
        touched_products.push(product);
    }

    let order = Order::new(
        customer_id,
        request.address.as_str(),
        request.payment.as_str(),
        lines,
    );
    if order.total != request.total {
        return Err(CheckoutError::TotalMismatch {
            claimed: request.total,
            computed: order.total,
        });
    }

    let mut batch = WriteBatch::new().insert(&order)?;
    for product in &touched_products {
        batch = batch.update(&product.data, product.version)?;
    }
    batch = batch.delete::<Cart>(customer_id, Some(cart.version));

    debug!(
        "committing checkout for {}: {} lines, {} writes",
        customer_id,
        order.lines.len(),
        batch.len()
    );
    store.apply(batch)?;

    info!(
        "order {} created for {} (total {}, {} lines)",
        order.id,
        customer_id,
        order.total,
        order.lines.len()
    );
    Ok(order)
}
