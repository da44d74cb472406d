//! InMemoryStore - HashMap-backed store for testing and development.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use super::batch::WriteOp;
use super::{record_key, Record, Store, StoreError, Versioned, WriteBatch};

/// Internal stored representation of a record.
struct StoredRow {
    bytes: Vec<u8>,
    version: u64,
}

/// In-memory store backed by a HashMap.
///
/// Storage key is `"COLLECTION:id"`. Clone-friendly via Arc. A single
/// `RwLock` guards the map, so a batch applied through [`Store::apply`] is
/// atomic relative to every other reader and writer.
#[derive(Clone)]
pub struct InMemoryStore {
    storage: Arc<RwLock<HashMap<String, StoredRow>>>,
}

impl Default for InMemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryStore {
    /// Create a new empty store.
    pub fn new() -> Self {
        Self {
            storage: Arc::new(RwLock::new(HashMap::new())),
        }
    }
}

impl Store for InMemoryStore {
    fn get<R: Record>(&self, id: &str) -> Result<Option<Versioned<R>>, StoreError> {
        let key = record_key(R::COLLECTION, id);
        let storage = self
            .storage
            .read()
            .map_err(|_| StoreError::Backend("lock poisoned".into()))?;

        match storage.get(&key) {
            Some(row) => {
                let data: R = serde_json::from_slice(&row.bytes)
                    .map_err(|e| StoreError::Serde(e.to_string()))?;
                Ok(Some(Versioned {
                    data,
                    version: row.version,
                }))
            }
            None => Ok(None),
        }
    }

    fn save<R: Record>(&self, record: &R) -> Result<Versioned<R>, StoreError> {
        let key = record_key(R::COLLECTION, record.id());
        let bytes = serde_json::to_vec(record).map_err(|e| StoreError::Serde(e.to_string()))?;

        let mut storage = self
            .storage
            .write()
            .map_err(|_| StoreError::Backend("lock poisoned".into()))?;

        let new_version = storage.get(&key).map(|r| r.version + 1).unwrap_or(1);

        storage.insert(
            key,
            StoredRow {
                bytes,
                version: new_version,
            },
        );

        Ok(Versioned {
            data: record.clone(),
            version: new_version,
        })
    }

    fn insert<R: Record>(&self, record: &R) -> Result<Versioned<R>, StoreError> {
        let key = record_key(R::COLLECTION, record.id());
        let bytes = serde_json::to_vec(record).map_err(|e| StoreError::Serde(e.to_string()))?;

        let mut storage = self
            .storage
            .write()
            .map_err(|_| StoreError::Backend("lock poisoned".into()))?;

        if let Some(existing) = storage.get(&key) {
            return Err(StoreError::Conflict {
                collection: R::COLLECTION.to_string(),
                id: record.id().to_string(),
                expected: 0,
                actual: existing.version,
            });
        }

        storage.insert(key, StoredRow { bytes, version: 1 });

        Ok(Versioned {
            data: record.clone(),
            version: 1,
        })
    }

    fn update<R: Record>(
        &self,
        record: &R,
        expected_version: u64,
    ) -> Result<Versioned<R>, StoreError> {
        let key = record_key(R::COLLECTION, record.id());
        let bytes = serde_json::to_vec(record).map_err(|e| StoreError::Serde(e.to_string()))?;

        let mut storage = self
            .storage
            .write()
            .map_err(|_| StoreError::Backend("lock poisoned".into()))?;

        let actual_version = storage
            .get(&key)
            .map(|r| r.version)
            .ok_or_else(|| StoreError::NotFound {
                collection: R::COLLECTION.to_string(),
                id: record.id().to_string(),
            })?;

        if actual_version != expected_version {
            return Err(StoreError::Conflict {
                collection: R::COLLECTION.to_string(),
                id: record.id().to_string(),
                expected: expected_version,
                actual: actual_version,
            });
        }

        let new_version = actual_version + 1;
        storage.insert(
            key,
            StoredRow {
                bytes,
                version: new_version,
            },
        );

        Ok(Versioned {
            data: record.clone(),
            version: new_version,
        })
    }

    fn delete<R: Record>(&self, id: &str) -> Result<bool, StoreError> {
        let key = record_key(R::COLLECTION, id);
        let mut storage = self
            .storage
            .write()
            .map_err(|_| StoreError::Backend("lock poisoned".into()))?;

        Ok(storage.remove(&key).is_some())
    }

    fn find<R: Record>(
        &self,
        predicate: &dyn Fn(&R) -> bool,
    ) -> Result<Vec<Versioned<R>>, StoreError> {
        let storage = self
            .storage
            .read()
            .map_err(|_| StoreError::Backend("lock poisoned".into()))?;

        let prefix = format!("{}:", R::COLLECTION);
        let mut results = Vec::new();

        for (key, row) in storage.iter() {
            if key.starts_with(&prefix) {
                if let Ok(data) = serde_json::from_slice::<R>(&row.bytes) {
                    if predicate(&data) {
                        results.push(Versioned {
                            data,
                            version: row.version,
                        });
                    }
                }
            }
        }

        Ok(results)
    }

    fn apply(&self, batch: WriteBatch) -> Result<(), StoreError> {
        if batch.is_empty() {
            return Ok(());
        }

        let mut storage = self
            .storage
            .write()
            .map_err(|_| StoreError::Backend("lock poisoned".into()))?;

        // Validate every operation before applying any of them.
        for op in &batch.ops {
            let current = storage.get(op.key()).map(|r| r.version);
            match op {
                WriteOp::Insert { key, .. } => {
                    if let Some(actual) = current {
                        return Err(conflict(key, 0, actual));
                    }
                }
                WriteOp::Update {
                    key,
                    expected_version,
                    ..
                } => match current {
                    None => return Err(not_found(key)),
                    Some(actual) if actual != *expected_version => {
                        return Err(conflict(key, *expected_version, actual));
                    }
                    Some(_) => {}
                },
                WriteOp::Delete {
                    key,
                    expected_version: Some(expected),
                } => match current {
                    None => return Err(not_found(key)),
                    Some(actual) if actual != *expected => {
                        return Err(conflict(key, *expected, actual));
                    }
                    Some(_) => {}
                },
                WriteOp::Delete {
                    expected_version: None,
                    ..
                } => {}
            }
        }

        for op in batch.ops {
            match op {
                WriteOp::Insert { key, bytes } => {
                    storage.insert(key, StoredRow { bytes, version: 1 });
                }
                WriteOp::Update { key, bytes, .. } => {
                    let new_version = storage.get(&key).map(|r| r.version + 1).unwrap_or(1);
                    storage.insert(
                        key,
                        StoredRow {
                            bytes,
                            version: new_version,
                        },
                    );
                }
                WriteOp::Delete { key, .. } => {
                    storage.remove(&key);
                }
            }
        }

        Ok(())
    }
}

fn split_key(key: &str) -> (String, String) {
    match key.split_once(':') {
        Some((collection, id)) => (collection.to_string(), id.to_string()),
        None => (String::new(), key.to_string()),
    }
}

fn conflict(key: &str, expected: u64, actual: u64) -> StoreError {
    let (collection, id) = split_key(key);
    StoreError::Conflict {
        collection,
        id,
        expected,
        actual,
    }
}

fn not_found(key: &str) -> StoreError {
    let (collection, id) = split_key(key);
    StoreError::NotFound { collection, id }
}
