//! Order administration: status transitions and listings.

use std::fmt;

use log::info;

use crate::domain::{Order, OrderStatus};
use crate::store::{Store, StoreError, Versioned};

const MAX_COMMIT_ATTEMPTS: u32 = 3;

/// Error type for status transitions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OrderStatusError {
    /// The order does not exist.
    NotFound(String),
    /// The requested status is not one of the recognized values.
    InvalidStatus(String),
    /// The requested status is recognized but the lifecycle forbids the move.
    IllegalTransition {
        from: OrderStatus,
        to: OrderStatus,
    },
    /// The store rejected the update. Transient; safe to retry.
    Store(StoreError),
}

impl fmt::Display for OrderStatusError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OrderStatusError::NotFound(id) => write!(f, "order not found: {}", id),
            OrderStatusError::InvalidStatus(s) => write!(f, "invalid status: {}", s),
            OrderStatusError::IllegalTransition { from, to } => write!(
                f,
                "illegal transition: {} -> {}",
                from.as_str(),
                to.as_str()
            ),
            OrderStatusError::Store(e) => write!(f, "status update aborted by store: {}", e),
        }
    }
}

impl std::error::Error for OrderStatusError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            OrderStatusError::Store(e) => Some(e),
            _ => None,
        }
    }
}

impl From<StoreError> for OrderStatusError {
    fn from(err: StoreError) -> Self {
        OrderStatusError::Store(err)
    }
}

/// Apply one status transition. Only the moves in
/// [`OrderStatus::next_options`] are accepted; nothing else on the order
/// changes, and there are no stock or cart side effects.
pub fn set_status<S: Store>(
    store: &S,
    order_id: &str,
    requested: &str,
) -> Result<Order, OrderStatusError> {
    let next = OrderStatus::parse(requested)
        .ok_or_else(|| OrderStatusError::InvalidStatus(requested.to_string()))?;

    let mut attempt = 1;
    loop {
        let mut order: Versioned<Order> = store
            .get(order_id)?
            .ok_or_else(|| OrderStatusError::NotFound(order_id.to_string()))?;

        let from = order.data.status;
        if !from.can_transition_to(next) {
            return Err(OrderStatusError::IllegalTransition { from, to: next });
        }

        order.data.status = next;
        match store.update(&order.data, order.version) {
            Ok(_) => {
                info!(
                    "order {} moved {} -> {}",
                    order_id,
                    from.as_str(),
                    next.as_str()
                );
                return Ok(order.data);
            }
            Err(StoreError::Conflict { .. }) if attempt < MAX_COMMIT_ATTEMPTS => {
                attempt += 1;
            }
            Err(e) => return Err(e.into()),
        }
    }
}

/// A customer's orders, newest first.
pub fn for_customer<S: Store>(store: &S, customer_id: &str) -> Result<Vec<Order>, StoreError> {
    let mut orders: Vec<Order> = store
        .find::<Order>(&|o| o.customer_id == customer_id)?
        .into_iter()
        .map(|v| v.data)
        .collect();
    orders.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    Ok(orders)
}

/// Every order in the store, newest first.
pub fn all<S: Store>(store: &S) -> Result<Vec<Order>, StoreError> {
    let mut orders: Vec<Order> = store
        .find::<Order>(&|_| true)?
        .into_iter()
        .map(|v| v.data)
        .collect();
    orders.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    Ok(orders)
}
