//! Policy catalog domain types for Policy Hub.
//!
//! This crate holds everything about the catalog that does not need a network
//! or a runtime:
//!
//! - **Policy**: the policy/version record returned by the API
//! - **Search**: filter state, its query-string codec, pagination
//! - **Docs**: documentation pages and tab availability
//! - **Routes**: navigable paths for detail and version pages
//!
//! # Example
//!
//! ```rust,ignore
//! use hub_catalog::prelude::*;
//!
//! let filters = FilterState::from_query_string("search=rate&categories=auth");
//! let next = filters.with_update(FilterUpdate::new().page(3));
//! assert_eq!(next.to_query_string(), "search=rate&categories=auth&page=3");
//! ```

pub mod constants;
pub mod docs;
pub mod error;
pub mod policy;
pub mod routes;
pub mod search;

pub use error::CatalogError;
pub use policy::{Checksum, Policy};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::constants::{DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE};
    pub use crate::docs::{DocPage, DocTab, DocsIndex, DocsPage};
    pub use crate::error::CatalogError;
    pub use crate::policy::{is_latest_version, latest_version, Checksum, Policy};
    pub use crate::search::{
        ApiErrorBody, ApiResponse, FilterKind, FilterState, FilterUpdate, Pagination,
        ResponseMeta,
    };
}
