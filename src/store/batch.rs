//! WriteBatch - queue multiple record writes for one atomic apply.
//!
//! ## Example
//!
//! ```ignore
//! let batch = WriteBatch::new()
//!     .insert(&order)?
//!     .update(&product, product_version)?
//!     .delete::<Cart>(customer_id, Some(cart_version));
//! store.apply(batch)?;
//! ```

use super::{record_key, Record, StoreError};

/// A queued write operation (type-erased).
pub(crate) enum WriteOp {
    /// Insert a new row. Fails validation if the key already exists.
    Insert { key: String, bytes: Vec<u8> },
    /// Overwrite a row, checking its current version first.
    Update {
        key: String,
        bytes: Vec<u8>,
        expected_version: u64,
    },
    /// Remove a row, optionally checking its current version first.
    Delete {
        key: String,
        expected_version: Option<u64>,
    },
}

impl WriteOp {
    pub(crate) fn key(&self) -> &str {
        match self {
            WriteOp::Insert { key, .. } => key,
            WriteOp::Update { key, .. } => key,
            WriteOp::Delete { key, .. } => key,
        }
    }
}

/// Builder for chaining multiple record writes into a single atomic apply.
#[derive(Default)]
pub struct WriteBatch {
    pub(crate) ops: Vec<WriteOp>,
}

impl WriteBatch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue an insert. The key must not exist at apply time.
    pub fn insert<R: Record>(mut self, record: &R) -> Result<Self, StoreError> {
        let key = record_key(R::COLLECTION, record.id());
        let bytes = serde_json::to_vec(record).map_err(|e| StoreError::Serde(e.to_string()))?;
        self.ops.push(WriteOp::Insert { key, bytes });
        Ok(self)
    }

    /// Queue a version-checked update. The row must exist at apply time with
    /// exactly `expected_version`.
    pub fn update<R: Record>(
        mut self,
        record: &R,
        expected_version: u64,
    ) -> Result<Self, StoreError> {
        let key = record_key(R::COLLECTION, record.id());
        let bytes = serde_json::to_vec(record).map_err(|e| StoreError::Serde(e.to_string()))?;
        self.ops.push(WriteOp::Update {
            key,
            bytes,
            expected_version,
        });
        Ok(self)
    }

    /// Queue a delete. With `expected_version`, the row must exist with that
    /// version at apply time; without, a missing row is not an error.
    pub fn delete<R: Record>(mut self, id: &str, expected_version: Option<u64>) -> Self {
        let key = record_key(R::COLLECTION, id);
        self.ops.push(WriteOp::Delete {
            key,
            expected_version,
        });
        self
    }

    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }

    pub fn len(&self) -> usize {
        self.ops.len()
    }
}
