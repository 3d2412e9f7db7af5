//! JSON-backed fetch cache.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;

use crate::CacheError;

/// Session-scoped key/value cache with automatic JSON serialization.
///
/// Entries never expire; the owning feature calls [`FetchCache::invalidate`]
/// or [`FetchCache::clear`] when it knows the data changed.
#[derive(Debug, Clone, Default)]
pub struct FetchCache {
    entries: Arc<Mutex<HashMap<String, Value>>>,
}

impl FetchCache {
    /// Create an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    fn entries(&self) -> MutexGuard<'_, HashMap<String, Value>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Get a value from the cache.
    ///
    /// Returns `None` if the key doesn't exist.
    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, CacheError> {
        let value = match self.entries().get(key) {
            Some(value) => value.clone(),
            None => return Ok(None),
        };

        serde_json::from_value(value)
            .map(Some)
            .map_err(|source| CacheError::Deserialize {
                key: key.to_string(),
                source,
            })
    }

    /// Store a value, replacing any previous entry.
    pub fn set<T: Serialize>(&self, key: &str, value: &T) -> Result<(), CacheError> {
        let value = serde_json::to_value(value).map_err(CacheError::Serialize)?;
        self.entries().insert(key.to_string(), value);
        tracing::trace!(cache_key = key, "cache entry stored");
        Ok(())
    }

    /// Drop one entry. Returns whether it existed.
    pub fn invalidate(&self, key: &str) -> bool {
        let removed = self.entries().remove(key).is_some();
        if removed {
            tracing::debug!(cache_key = key, "cache entry invalidated");
        }
        removed
    }

    /// Drop every entry whose key starts with `prefix`.
    pub fn invalidate_prefix(&self, prefix: &str) -> usize {
        let mut entries = self.entries();
        let before = entries.len();
        entries.retain(|key, _| !key.starts_with(prefix));
        before - entries.len()
    }

    /// Drop every entry.
    pub fn clear(&self) {
        self.entries().clear();
    }

    /// Check if a key exists in the cache.
    pub fn contains(&self, key: &str) -> bool {
        self.entries().contains_key(key)
    }

    /// All keys, sorted.
    pub fn keys(&self) -> Vec<String> {
        let mut keys: Vec<String> = self.entries().keys().cloned().collect();
        keys.sort();
        keys
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries().len()
    }

    /// Whether the cache holds no entries.
    pub fn is_empty(&self) -> bool {
        self.entries().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Listing {
        names: Vec<String>,
        total: u32,
    }

    #[test]
    fn test_set_and_get() {
        let cache = FetchCache::new();
        let listing = Listing {
            names: vec!["cors".into(), "jwt".into()],
            total: 2,
        };
        cache.set("policies", &listing).unwrap();

        let cached: Option<Listing> = cache.get("policies").unwrap();
        assert_eq!(cached, Some(listing));
        assert_eq!(cache.get::<Listing>("missing").unwrap(), None);
    }

    #[test]
    fn test_clones_share_entries() {
        let cache = FetchCache::new();
        let other = cache.clone();
        other.set("k", &1u32).unwrap();
        assert_eq!(cache.get::<u32>("k").unwrap(), Some(1));
    }

    #[test]
    fn test_overwrite_replaces() {
        let cache = FetchCache::new();
        cache.set("k", &vec![1, 2, 3]).unwrap();
        cache.set("k", &vec![4]).unwrap();
        assert_eq!(cache.get::<Vec<i32>>("k").unwrap(), Some(vec![4]));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_invalidate_and_clear() {
        let cache = FetchCache::new();
        cache.set("docs-cors-1.0.0", &"a").unwrap();
        cache.set("docs-cors-2.0.0", &"b").unwrap();
        cache.set("versions-cors", &"c").unwrap();

        assert!(cache.invalidate("versions-cors"));
        assert!(!cache.invalidate("versions-cors"));
        assert_eq!(cache.invalidate_prefix("docs-cors-"), 2);
        assert!(cache.is_empty());

        cache.set("x", &1).unwrap();
        cache.clear();
        assert!(!cache.contains("x"));
    }

    #[test]
    fn test_type_mismatch_is_an_error() {
        let cache = FetchCache::new();
        cache.set("k", &"text").unwrap();
        let err = cache.get::<u32>("k").unwrap_err();
        assert!(matches!(err, CacheError::Deserialize { ref key, .. } if key == "k"));
    }

    #[test]
    fn test_keys_sorted() {
        let cache = FetchCache::new();
        cache.set("b", &1).unwrap();
        cache.set("a", &1).unwrap();
        assert_eq!(cache.keys(), vec!["a".to_string(), "b".to_string()]);
    }
}
