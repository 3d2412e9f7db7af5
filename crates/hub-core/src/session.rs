//! Session-wide state shared by every view.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tokio::sync::OnceCell;

use hub_cache::{FetchCache, VersionsCache};
use hub_catalog::search::{FilterKind, FilterState, FilterUpdate};
use hub_data::{FetchError, HttpPolicyClient, PolicyApi};

use crate::config::HubConfig;

/// Catalog-wide facet values, loaded once per session.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppData {
    pub categories: Vec<String>,
    pub providers: Vec<String>,
    pub platforms: Vec<String>,
    pub total_policies: u32,
}

impl AppData {
    /// Known values of one facet.
    pub fn values(&self, kind: FilterKind) -> &[String] {
        match kind {
            FilterKind::Categories => &self.categories,
            FilterKind::Providers => &self.providers,
            FilterKind::Platforms => &self.platforms,
        }
    }

    /// Catalog totals.
    pub fn stats(&self) -> CatalogStats {
        CatalogStats {
            total_policies: self.total_policies,
            total_categories: self.categories.len(),
            total_platforms: self.platforms.len(),
            total_providers: self.providers.len(),
        }
    }
}

/// Catalog totals shown on the about page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogStats {
    pub total_policies: u32,
    pub total_categories: usize,
    pub total_platforms: usize,
    pub total_providers: usize,
}

/// Everything that lives for the whole session: the API, both caches, the
/// config and the lazily loaded [`AppData`].
///
/// Cheap to clone; clones share caches and app data.
#[derive(Clone)]
pub struct HubSession {
    api: Arc<dyn PolicyApi>,
    config: Arc<HubConfig>,
    fetch_cache: FetchCache,
    versions_cache: VersionsCache,
    app_data: Arc<OnceCell<AppData>>,
}

impl HubSession {
    /// Create a session over any API implementation.
    pub fn new(api: Arc<dyn PolicyApi>, config: HubConfig) -> Self {
        Self {
            api,
            config: Arc::new(config),
            fetch_cache: FetchCache::new(),
            versions_cache: VersionsCache::new(),
            app_data: Arc::new(OnceCell::new()),
        }
    }

    /// Create a session talking HTTP to `config.api.base_url`.
    pub fn connect(config: HubConfig) -> Result<Self, FetchError> {
        let client = HttpPolicyClient::new(&config.api.base_url, config.timeout())?;
        tracing::info!(base_url = %client.base_url(), "connected to policy hub");
        Ok(Self::new(Arc::new(client), config))
    }

    pub fn api(&self) -> Arc<dyn PolicyApi> {
        Arc::clone(&self.api)
    }

    pub fn config(&self) -> &HubConfig {
        &self.config
    }

    /// Shared fetch cache.
    pub fn fetch_cache(&self) -> &FetchCache {
        &self.fetch_cache
    }

    /// Shared versions cache.
    pub fn versions_cache(&self) -> &VersionsCache {
        &self.versions_cache
    }

    /// Facet values and totals, fetched on first use.
    ///
    /// Concurrent callers share one load; a failed load is retried by the
    /// next caller.
    pub async fn ensure_loaded(&self) -> Result<&AppData, FetchError> {
        self.app_data
            .get_or_try_init(|| async {
                tracing::debug!("loading app data");
                let categories = self.api.list_categories().await?;
                let providers = self.api.list_providers().await?;
                let platforms = self.api.list_platforms().await?;
                let probe = FilterState::default().with_update(FilterUpdate::new().page_size(1));
                let total_policies = self.api.list_policies(&probe).await?.pagination.total_items;

                Ok::<_, FetchError>(AppData {
                    categories,
                    providers,
                    platforms,
                    total_policies,
                })
            })
            .await
    }

    /// App data if already loaded.
    pub fn app_data(&self) -> Option<&AppData> {
        self.app_data.get()
    }

    /// Catalog totals, loading app data if needed.
    pub async fn stats(&self) -> Result<CatalogStats, FetchError> {
        Ok(self.ensure_loaded().await?.stats())
    }
}

impl std::fmt::Debug for HubSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HubSession")
            .field("config", &self.config)
            .field("cached", &self.fetch_cache.len())
            .field("app_data_loaded", &self.app_data.initialized())
            .finish()
    }
}
