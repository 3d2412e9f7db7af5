//! Session-scoped caches for Policy Hub.
//!
//! Two stores live for the whole session and are never evicted:
//!
//! - [`FetchCache`]: string key to previously fetched value, with automatic
//!   JSON serialization, shared by every data-fetch hook that passes a key
//! - [`VersionsCache`]: policy name to its full version list
//!
//! Both are cheap-clone handles; clones share the same entries.
//!
//! # Example
//!
//! ```rust,ignore
//! use hub_cache::{cache_key, FetchCache};
//!
//! let cache = FetchCache::new();
//! let key = cache_key!("docs", "cors", "1.0.0");
//! // "docs-cors-1.0.0"
//!
//! cache.set(&key, &docs)?;
//! let docs: Option<Vec<DocsPage>> = cache.get(&key)?;
//! cache.invalidate(&key);
//! ```

mod error;
mod store;
mod versions;

pub use error::CacheError;
pub use store::FetchCache;
pub use versions::VersionsCache;

/// Build a cache key from a prefix and parts joined by `-`.
///
/// # Example
///
/// ```rust,ignore
/// let key = cache_key!("versions", policy_name);
/// // Returns "versions-rate-limit"
/// ```
#[macro_export]
macro_rules! cache_key {
    ($prefix:expr, $($part:expr),+) => {{
        let mut key = String::from($prefix);
        $(
            key.push('-');
            key.push_str(&$part.to_string());
        )+
        key
    }};
}

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::{cache_key, CacheError, FetchCache, VersionsCache};
}
