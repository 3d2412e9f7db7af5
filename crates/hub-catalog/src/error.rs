//! Catalog error types.

use thiserror::Error;

/// Errors raised while validating catalog identifiers.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CatalogError {
    /// Policy name contains characters outside `[A-Za-z0-9_-]` or is too long.
    #[error("Invalid policy name: {0}")]
    InvalidPolicyName(String),

    /// Version is not `MAJOR.MINOR.PATCH`.
    #[error("Invalid version: {0}")]
    InvalidVersion(String),

    /// Documentation page is not one of the known pages.
    #[error("Unknown documentation page: {0}")]
    UnknownDocPage(String),
}
