//! Data access layer for the Policy Hub API.
//!
//! This crate provides:
//! - `PolicyApi` - The catalog API seam used by every fetch
//! - `HttpPolicyClient` - reqwest implementation against the REST API
//! - `MemoryPolicyApi` - In-process catalog with the same filter and paging rules
//! - `TimeoutConfig` - Per-request timeouts
//! - `FetchError` - Network, HTTP and envelope failures

mod api;
mod client;
mod error;
mod memory;
mod timeout;

pub use api::*;
pub use client::*;
pub use error::*;
pub use memory::*;
pub use timeout::*;
