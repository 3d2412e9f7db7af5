//! Client core for the Policy Hub catalog.
//!
//! Wires the catalog types, caches, API client and reactive primitives into
//! the controllers a front end drives:
//!
//! - [`HubSession`]: API handle, session caches, config and app data
//! - [`CatalogView`]: filters kept in the location, the policy list fetch
//!   and the debounced search box
//! - [`PolicyVersions`]: version list, latest version and version navigation
//! - [`DocsView`]: documentation tabs of a policy version
//!
//! # Example
//!
//! ```rust,ignore
//! use hub_core::prelude::*;
//!
//! let session = HubSession::connect(HubConfig::discover(None)?)?;
//! let mut catalog = CatalogView::new(&session, MemoryLocation::new("/policies"));
//!
//! catalog.toggle_filter(FilterKind::Categories, "security", true);
//! let state = catalog.settled().await;
//! for policy in catalog.policies() {
//!     println!("{} {}", policy.name, policy.version);
//! }
//! ```

pub mod catalog;
pub mod config;
pub mod docs;
pub mod filter_panel;
pub mod location;
pub mod query_params;
pub mod search_box;
pub mod session;
pub mod versions;

pub use catalog::{CatalogNotice, CatalogView};
pub use config::HubConfig;
pub use docs::{DocPanel, DocsView};
pub use location::{Location, MemoryLocation};
pub use query_params::QueryParams;
pub use session::{AppData, CatalogStats, HubSession};
pub use versions::PolicyVersions;

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::filter_panel::{FacetSection, FilterPanel};
    pub use crate::search_box::SearchBox;
    pub use crate::{
        AppData, CatalogNotice, CatalogStats, CatalogView, DocPanel, DocsView, HubConfig,
        HubSession, Location, MemoryLocation, PolicyVersions, QueryParams,
    };
    pub use hub_catalog::prelude::*;
    pub use hub_data::{FetchError, PolicyApi, PolicyPage};
    pub use hub_reactive::{AsyncData, AsyncDataState, Debounced, FetchOptions};
}
