//! Policy name to version list cache.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use hub_catalog::Policy;

/// Session-scoped cache of every version of a policy.
///
/// Lists are stored whole; [`VersionsCache::set`] replaces any previous list.
#[derive(Debug, Clone, Default)]
pub struct VersionsCache {
    lists: Arc<Mutex<HashMap<String, Vec<Policy>>>>,
}

impl VersionsCache {
    /// Create an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    fn lists(&self) -> MutexGuard<'_, HashMap<String, Vec<Policy>>> {
        self.lists.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Versions of `policy`, if cached.
    pub fn get(&self, policy: &str) -> Option<Vec<Policy>> {
        self.lists().get(policy).cloned()
    }

    /// Store the versions of `policy`.
    pub fn set(&self, policy: &str, versions: Vec<Policy>) {
        tracing::trace!(policy, count = versions.len(), "versions cached");
        self.lists().insert(policy.to_string(), versions);
    }

    /// Drop the versions of `policy`.
    pub fn invalidate(&self, policy: &str) -> bool {
        self.lists().remove(policy).is_some()
    }

    /// Drop every list.
    pub fn clear(&self) {
        self.lists().clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn version(name: &str, version: &str) -> Policy {
        serde_json::from_value(serde_json::json!({
            "name": name,
            "version": version,
            "displayName": name,
            "provider": "WSO2",
        }))
        .unwrap()
    }

    #[test]
    fn test_get_missing() {
        assert!(VersionsCache::new().get("cors").is_none());
    }

    #[test]
    fn test_set_overwrites_whole_list() {
        let cache = VersionsCache::new();
        cache.set("cors", vec![version("cors", "1.0.0"), version("cors", "0.9.0")]);
        cache.set("cors", vec![version("cors", "2.0.0")]);

        let versions = cache.get("cors").unwrap();
        assert_eq!(versions.len(), 1);
        assert_eq!(versions[0].version, "2.0.0");
    }

    #[test]
    fn test_invalidate() {
        let cache = VersionsCache::new();
        let shared = cache.clone();
        shared.set("jwt", vec![version("jwt", "1.0.0")]);
        assert!(cache.invalidate("jwt"));
        assert!(shared.get("jwt").is_none());
    }
}
