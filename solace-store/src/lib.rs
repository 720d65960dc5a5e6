//! Document store seam.
//!
//! The encryption subsystem never talks to a concrete backend: it consumes
//! `get` / `put` / `update` through [`DocumentStore`] as `Arc<dyn …>`, and
//! each call is treated as atomic. Backend failures pass through as
//! [`StoreError::Backend`], uninterpreted.
//!
//! [`MemoryStore`] is the in-process implementation used by tests; its
//! operation counter lets tests assert that a code path performed no store
//! access at all.

use serde_json::Value;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::RwLock;
use thiserror::Error;

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

#[derive(Debug, Error)]
pub enum StoreError {
    /// Underlying persistence call failed; passed through unchanged.
    #[error("storage backend error: {0}")]
    Backend(String),

    #[error("document not found: {0}")]
    NotFound(String),

    #[error("invalid document: {0}")]
    InvalidDocument(String),
}

/// Minimal document-store surface consumed by this subsystem.
pub trait DocumentStore: Send + Sync {
    /// Fetches the document at `path`, or `None` when absent.
    fn get(&self, path: &str) -> StoreResult<Option<Value>>;

    /// Writes (or replaces) the document at `path`.
    fn put(&self, path: &str, record: Value) -> StoreResult<()>;

    /// Merges top-level fields of `partial` into the existing document.
    /// Fails with [`StoreError::NotFound`] when there is nothing to update.
    fn update(&self, path: &str, partial: Value) -> StoreResult<()>;
}

/// In-memory document store for tests.
#[derive(Default)]
pub struct MemoryStore {
    docs: RwLock<HashMap<String, Value>>,
    ops: AtomicU64,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Total number of store operations performed so far.
    pub fn op_count(&self) -> u64 {
        self.ops.load(Ordering::Relaxed)
    }
}

impl DocumentStore for MemoryStore {
    fn get(&self, path: &str) -> StoreResult<Option<Value>> {
        self.ops.fetch_add(1, Ordering::Relaxed);
        Ok(self.docs.read().unwrap().get(path).cloned())
    }

    fn put(&self, path: &str, record: Value) -> StoreResult<()> {
        self.ops.fetch_add(1, Ordering::Relaxed);
        self.docs.write().unwrap().insert(path.to_string(), record);
        Ok(())
    }

    fn update(&self, path: &str, partial: Value) -> StoreResult<()> {
        self.ops.fetch_add(1, Ordering::Relaxed);
        let Value::Object(fields) = partial else {
            return Err(StoreError::InvalidDocument(
                "partial update must be a JSON object".to_string(),
            ));
        };

        let mut docs = self.docs.write().unwrap();
        let existing = docs
            .get_mut(path)
            .ok_or_else(|| StoreError::NotFound(path.to_string()))?;
        let Value::Object(target) = existing else {
            return Err(StoreError::InvalidDocument(format!(
                "document at {path} is not a JSON object"
            )));
        };
        for (key, value) in fields {
            target.insert(key, value);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn get_absent_returns_none() {
        let store = MemoryStore::new();
        assert!(store.get("users/u1").unwrap().is_none());
    }

    #[test]
    fn put_then_get() {
        let store = MemoryStore::new();
        store.put("users/u1", json!({"name": "a"})).unwrap();
        assert_eq!(store.get("users/u1").unwrap(), Some(json!({"name": "a"})));
    }

    #[test]
    fn put_replaces_existing() {
        let store = MemoryStore::new();
        store.put("users/u1", json!({"name": "a"})).unwrap();
        store.put("users/u1", json!({"name": "b"})).unwrap();
        assert_eq!(store.get("users/u1").unwrap(), Some(json!({"name": "b"})));
    }

    #[test]
    fn update_merges_top_level_fields() {
        let store = MemoryStore::new();
        store.put("users/u1", json!({"name": "a", "age": 1})).unwrap();
        store.update("users/u1", json!({"age": 2})).unwrap();
        assert_eq!(
            store.get("users/u1").unwrap(),
            Some(json!({"name": "a", "age": 2}))
        );
    }

    #[test]
    fn update_absent_fails() {
        let store = MemoryStore::new();
        let err = store.update("users/missing", json!({"x": 1})).unwrap_err();
        assert!(matches!(err, StoreError::NotFound(_)));
    }

    #[test]
    fn op_count_tracks_every_call() {
        let store = MemoryStore::new();
        assert_eq!(store.op_count(), 0);
        store.put("a", json!(1)).unwrap();
        let _ = store.get("a").unwrap();
        let _ = store.get("b").unwrap();
        assert_eq!(store.op_count(), 3);
    }
}
