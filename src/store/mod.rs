//! Store - versioned CRUD storage for storefront records.
//!
//! Every persisted entity (products, carts, orders, users) is a [`Record`]:
//! a serde-serializable struct with a collection name and an id. Records are
//! stored as opaque bytes keyed `"COLLECTION:id"` and carry a per-row version
//! for optimistic concurrency.
//!
//! ## Example
//!
//! ```ignore
//! use storefront::{InMemoryStore, Record, Store};
//!
//! let store = InMemoryStore::new();
//! store.insert(&product)?;
//! let loaded = store.get::<Product>("prod-1")?;
//! ```

mod batch;
mod in_memory;
mod store;

use serde::{de::DeserializeOwned, Serialize};
use std::fmt;

/// Trait for types that can be persisted as store records.
pub trait Record: Serialize + DeserializeOwned + Clone + Send + Sync {
    /// The collection name for this record type (e.g., "products", "orders").
    /// Maps to a table in SQL, a collection in MongoDB, a key prefix in KV stores, etc.
    const COLLECTION: &'static str;

    /// Returns the unique identifier for this record instance.
    fn id(&self) -> &str;
}

/// A versioned wrapper around record data for optimistic concurrency control.
#[derive(Debug, Clone)]
pub struct Versioned<T> {
    pub data: T,
    pub version: u64,
}

/// Error type for store operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// Optimistic concurrency conflict. Nothing was written; the whole
    /// operation is safe to retry against fresh state.
    Conflict {
        collection: String,
        id: String,
        expected: u64,
        actual: u64,
    },
    /// Serialization/deserialization error.
    Serde(String),
    /// Backend-level error (lock poisoned, connection lost).
    Backend(String),
    /// Record not found.
    NotFound { collection: String, id: String },
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::Conflict {
                collection,
                id,
                expected,
                actual,
            } => write!(
                f,
                "concurrency conflict on {}:{} (expected version {}, actual {})",
                collection, id, expected, actual
            ),
            StoreError::Serde(msg) => write!(f, "record serialization error: {}", msg),
            StoreError::Backend(msg) => write!(f, "store backend error: {}", msg),
            StoreError::NotFound { collection, id } => {
                write!(f, "record not found: {}:{}", collection, id)
            }
        }
    }
}

impl std::error::Error for StoreError {}

pub use batch::WriteBatch;
pub use in_memory::InMemoryStore;
pub use store::Store;

/// Storage key for a record: `"COLLECTION:id"`.
pub(crate) fn record_key(collection: &str, id: &str) -> String {
    format!("{}:{}", collection, id)
}
