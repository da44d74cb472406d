use std::time::SystemTime;

use serde::{Deserialize, Serialize};

use crate::store::Record;

/// Order lifecycle. `Delivered` and `Cancelled` are terminal; a shipped
/// order can no longer be cancelled.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderStatus {
    Pending,
    Paid,
    Shipped,
    Delivered,
    Cancelled,
}

impl Default for OrderStatus {
    fn default() -> Self {
        OrderStatus::Pending
    }
}

impl OrderStatus {
    /// Parse the wire form. Returns None for anything unrecognized.
    pub fn parse(s: &str) -> Option<OrderStatus> {
        match s {
            "PENDING" => Some(OrderStatus::Pending),
            "PAID" => Some(OrderStatus::Paid),
            "SHIPPED" => Some(OrderStatus::Shipped),
            "DELIVERED" => Some(OrderStatus::Delivered),
            "CANCELLED" => Some(OrderStatus::Cancelled),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "PENDING",
            OrderStatus::Paid => "PAID",
            OrderStatus::Shipped => "SHIPPED",
            OrderStatus::Delivered => "DELIVERED",
            OrderStatus::Cancelled => "CANCELLED",
        }
    }

    /// The statuses an admin may move this order to next.
    pub fn next_options(&self) -> &'static [OrderStatus] {
        match self {
            OrderStatus::Pending => &[OrderStatus::Paid, OrderStatus::Cancelled],
            OrderStatus::Paid => &[OrderStatus::Shipped, OrderStatus::Cancelled],
            OrderStatus::Shipped => &[OrderStatus::Delivered],
            OrderStatus::Delivered | OrderStatus::Cancelled => &[],
        }
    }

    pub fn can_transition_to(&self, next: OrderStatus) -> bool {
        self.next_options().contains(&next)
    }

    pub fn is_terminal(&self) -> bool {
        self.next_options().is_empty()
    }
}

/// One (product, quantity, price) record permanently attached to an order.
/// `price` and `product_name` are snapshots taken at order creation; later
/// catalog edits never change what a historical order was worth.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderLine {
    pub product_id: String,
    pub product_name: String,
    pub quantity: u32,
    pub price: u32,
}

impl OrderLine {
    pub fn subtotal(&self) -> u64 {
        u64::from(self.price) * u64::from(self.quantity)
    }
}

/// A completed checkout. Created once, atomically; `total` and the line
/// prices are immutable afterwards.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Order {
    pub id: String,
    pub customer_id: String,
    pub status: OrderStatus,
    pub address: String,
    pub payment: String,
    pub total: u64,
    pub created_at: SystemTime,
    pub lines: Vec<OrderLine>,
}

impl Order {
    pub fn new(
        customer_id: impl Into<String>,
        address: impl Into<String>,
        payment: impl Into<String>,
        lines: Vec<OrderLine>,
    ) -> Self {
        let total = lines.iter().map(OrderLine::subtotal).sum();
        Order {
            id: uuid::Uuid::now_v7().to_string(),
            customer_id: customer_id.into(),
            status: OrderStatus::Pending,
            address: address.into(),
            payment: payment.into(),
            total,
            created_at: SystemTime::now(),
            lines,
        }
    }

    /// Recompute the total from the lines. Always equals `total`.
    pub fn computed_total(&self) -> u64 {
        self.lines.iter().map(OrderLine::subtotal).sum()
    }
}

impl Record for Order {
    const COLLECTION: &'static str = "orders";

    fn id(&self) -> &str {
        &self.id
    }
}
