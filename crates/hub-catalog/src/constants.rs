//! Catalog-wide constants shared with the Policy Hub API.

/// Page size used when none is given.
pub const DEFAULT_PAGE_SIZE: u32 = 20;

/// Largest page size the API accepts.
pub const MAX_PAGE_SIZE: u32 = 100;

/// Smallest page size the API accepts.
pub const MIN_PAGE_SIZE: u32 = 1;

/// User-facing status messages.
pub mod messages {
    pub const LOADING: &str = "Loading...";
    pub const NO_POLICIES_FOUND: &str = "No policies found";
    pub const NO_POLICIES_FOUND_DESCRIPTION: &str =
        "Try adjusting your search or filters to find what you're looking for.";
    pub const POLICY_NOT_FOUND: &str = "Policy not found";
    pub const VERSION_NOT_FOUND: &str = "Version not found";
    pub const DOCS_NOT_AVAILABLE: &str = "Documentation not available";
    pub const ERROR_LOADING_POLICIES: &str = "Error loading policies";
    pub const ERROR_LOADING_POLICY: &str = "Error loading policy";
    pub const ERROR_LOADING_VERSIONS: &str = "Error loading versions";
    pub const ERROR_LOADING_DOCS: &str = "Error loading documentation";
    pub const ERROR_NETWORK: &str = "Network error occurred";
    pub const ERROR_TIMEOUT: &str = "Request timed out";
    pub const ERROR_UNKNOWN: &str = "An unexpected error occurred";
}
