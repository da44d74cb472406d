//! Store - abstract CRUD storage for records.

use super::{Record, StoreError, Versioned, WriteBatch};

/// Abstract CRUD storage for records.
///
/// Single-record operations cover the thin CRUD surface (catalog edits, cart
/// edits, profile updates). Multi-record effects that must be all-or-nothing,
/// checkout above all, go through [`Store::apply`] with a [`WriteBatch`].
pub trait Store: Send + Sync {
    /// Get a record by ID. Returns None if not found.
    fn get<R: Record>(&self, id: &str) -> Result<Option<Versioned<R>>, StoreError>;

    /// Upsert a record (insert or update, no version check).
    fn save<R: Record>(&self, record: &R) -> Result<Versioned<R>, StoreError>;

    /// Insert a new record. Fails if it already exists.
    fn insert<R: Record>(&self, record: &R) -> Result<Versioned<R>, StoreError>;

    /// Update an existing record with optimistic concurrency control.
    fn update<R: Record>(
        &self,
        record: &R,
        expected_version: u64,
    ) -> Result<Versioned<R>, StoreError>;

    /// Delete a record by ID. Returns true if it existed.
    fn delete<R: Record>(&self, id: &str) -> Result<bool, StoreError>;

    /// Find records matching a predicate.
    fn find<R: Record>(
        &self,
        predicate: &dyn Fn(&R) -> bool,
    ) -> Result<Vec<Versioned<R>>, StoreError>;

    /// Apply a batch of writes atomically: every queued operation is
    /// validated (key presence, expected versions) before any of them is
    /// applied. The store either reflects the whole batch or none of it.
    fn apply(&self, batch: WriteBatch) -> Result<(), StoreError>;
}
