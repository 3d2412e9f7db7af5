//! Cache error types.

use thiserror::Error;

/// Errors that can occur when using the cache.
#[derive(Error, Debug)]
pub enum CacheError {
    /// Failed to serialize a value on write.
    #[error("Serialization error: {0}")]
    Serialize(#[source] serde_json::Error),

    /// A stored value does not match the requested type.
    #[error("Cached value under '{key}' has unexpected shape: {source}")]
    Deserialize {
        key: String,
        #[source]
        source: serde_json::Error,
    },
}
