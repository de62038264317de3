//! Key-value persistence
//!
//! Highlights are persisted through the [`KeyValueStore`] trait so the
//! backing store is substitutable: the default [`MemoryStore`] models
//! local-only browser storage (including its quota behavior), while callers
//! can provide anything else that speaks `get`/`set` of string values.
//!
//! Writes are unconditional overwrites: last writer wins, no versioning.

use std::collections::HashMap;

use crate::error::StoreError;

/// String key-value store contract
pub trait KeyValueStore {
    /// Read a value; `Ok(None)` when the key is absent
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Write a value, overwriting any prior one
    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError>;
}

/// In-memory store with an optional per-value byte quota
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
    quota: Option<usize>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Enforce a byte budget per stored value, like browser storage quotas
    pub fn with_quota(quota: usize) -> Self {
        Self {
            entries: HashMap::new(),
            quota: Some(quota),
        }
    }

    /// Number of stored keys
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        if let Some(limit) = self.quota {
            if value.len() > limit {
                return Err(StoreError::QuotaExceeded {
                    attempted: value.len(),
                    limit,
                });
            }
        }
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_absent_key() {
        let store = MemoryStore::new();
        assert_eq!(store.get("missing").unwrap(), None);
    }

    #[test]
    fn test_set_overwrites() {
        let mut store = MemoryStore::new();
        store.set("k", "one").unwrap();
        store.set("k", "two").unwrap();
        assert_eq!(store.get("k").unwrap().as_deref(), Some("two"));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_quota_enforced() {
        let mut store = MemoryStore::with_quota(4);
        store.set("k", "abcd").unwrap();
        let err = store.set("k", "abcde").unwrap_err();
        assert!(matches!(
            err,
            StoreError::QuotaExceeded {
                attempted: 5,
                limit: 4
            }
        ));
        // Failed write leaves the prior value intact
        assert_eq!(store.get("k").unwrap().as_deref(), Some("abcd"));
    }
}
