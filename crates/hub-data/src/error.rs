//! Fetch error types.

use hub_catalog::constants::messages;
use hub_catalog::CatalogError;

/// Error type for fetch operations.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("HTTP error: {status} for {url}")]
    Http { status: u16, url: String },

    #[error("Timeout after {0:?}")]
    Timeout(std::time::Duration),

    #[error("Connection error: {0}")]
    Connection(String),

    #[error("Deserialization error: {0}")]
    Decode(String),

    /// The API answered with `success: false`.
    #[error("API error {code}: {message}")]
    Api { code: String, message: String },

    #[error("Request error: {0}")]
    Request(String),

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// A path parameter was rejected before any request was made.
    #[error(transparent)]
    InvalidInput(#[from] CatalogError),
}

impl FetchError {
    /// Message suitable for showing to a user.
    pub fn user_message(&self) -> &str {
        match self {
            Self::Timeout(_) => messages::ERROR_TIMEOUT,
            Self::Connection(_) | Self::Request(_) => messages::ERROR_NETWORK,
            Self::Api { message, .. } if !message.is_empty() => message,
            _ => messages::ERROR_UNKNOWN,
        }
    }

    /// Whether the server reported the resource as missing.
    pub fn is_not_found(&self) -> bool {
        match self {
            Self::Http { status, .. } => *status == 404,
            Self::Api { code, .. } => code.ends_with("NOT_FOUND"),
            _ => false,
        }
    }
}

impl From<serde_json::Error> for FetchError {
    fn from(e: serde_json::Error) -> Self {
        FetchError::Decode(e.to_string())
    }
}
