//! The Policy Hub API seam.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use hub_catalog::docs::{DocPage, DocsPage};
use hub_catalog::search::{FilterKind, FilterState, Pagination};
use hub_catalog::Policy;

use crate::error::FetchError;

/// One page of policies with its pagination metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PolicyPage {
    pub items: Vec<Policy>,
    pub pagination: Pagination,
}

impl PolicyPage {
    /// An empty first page.
    pub fn empty(page_size: u32) -> Self {
        Self {
            items: Vec::new(),
            pagination: Pagination::new(1, page_size, 0),
        }
    }
}

/// Read access to the policy catalog.
///
/// Missing resources are reported as `None` or an empty list, never as an
/// error.
#[async_trait]
pub trait PolicyApi: Send + Sync {
    /// List the latest version of every policy matching `filters`.
    async fn list_policies(&self, filters: &FilterState) -> Result<PolicyPage, FetchError>;

    /// Latest version of one policy.
    async fn get_latest_version(&self, name: &str) -> Result<Option<Policy>, FetchError>;

    /// One specific version of a policy.
    async fn get_policy_version(
        &self,
        name: &str,
        version: &str,
    ) -> Result<Option<Policy>, FetchError>;

    /// First page of a policy's versions, newest first.
    async fn list_policy_versions(
        &self,
        name: &str,
        page_size: u32,
    ) -> Result<PolicyPage, FetchError>;

    /// Every documentation page of a policy version.
    async fn get_all_docs(&self, name: &str, version: &str) -> Result<Vec<DocsPage>, FetchError>;

    /// One documentation page of a policy version.
    async fn get_single_doc(
        &self,
        name: &str,
        version: &str,
        page: DocPage,
    ) -> Result<Option<DocsPage>, FetchError>;

    /// Distinct categories across the catalog.
    async fn list_categories(&self) -> Result<Vec<String>, FetchError>;

    /// Distinct providers across the catalog.
    async fn list_providers(&self) -> Result<Vec<String>, FetchError>;

    /// Distinct supported platforms across the catalog.
    async fn list_platforms(&self) -> Result<Vec<String>, FetchError>;

    /// Distinct values of one facet.
    async fn list_facet_values(&self, kind: FilterKind) -> Result<Vec<String>, FetchError> {
        match kind {
            FilterKind::Categories => self.list_categories().await,
            FilterKind::Providers => self.list_providers().await,
            FilterKind::Platforms => self.list_platforms().await,
        }
    }
}
