//! Search module.
//!
//! Contains the filter state, its query-string codec, and pagination.

mod filter;
pub mod query;
mod results;

pub use filter::{FilterKind, FilterState, FilterUpdate};
pub use query::merge_query_string;
pub use results::{total_pages, ApiErrorBody, ApiResponse, Pagination, ResponseMeta};
