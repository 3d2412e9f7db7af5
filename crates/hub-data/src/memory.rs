//! In-process catalog.

use std::collections::{BTreeSet, HashMap};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;

use hub_catalog::constants::{DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE, MIN_PAGE_SIZE};
use hub_catalog::docs::{DocPage, DocsPage};
use hub_catalog::search::{FilterState, Pagination};
use hub_catalog::Policy;

use crate::api::{PolicyApi, PolicyPage};
use crate::error::FetchError;

/// A catalog served from memory with the API's filter and paging rules.
///
/// Search matches name, display name and description case-insensitively.
/// Within a facet any selected value matches; facets combine with AND.
/// Results are sorted by name.
#[derive(Debug, Clone, Default)]
pub struct MemoryPolicyApi {
    versions: Vec<Policy>,
    docs: HashMap<(String, String), Vec<DocsPage>>,
    latency: Option<Duration>,
    offline: Arc<AtomicBool>,
    calls: Arc<AtomicUsize>,
}

impl MemoryPolicyApi {
    /// Create an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a policy version. Versions of one policy are kept newest first
    /// in insertion order.
    pub fn with_policy(mut self, policy: Policy) -> Self {
        self.versions.push(policy);
        self
    }

    /// Add the documentation of a policy version.
    pub fn with_docs(mut self, name: &str, version: &str, pages: Vec<DocsPage>) -> Self {
        self.docs.insert((name.to_string(), version.to_string()), pages);
        self
    }

    /// Delay every call by `latency`.
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = Some(latency);
        self
    }

    /// Make every following call fail with a connection error.
    pub fn set_offline(&self, offline: bool) {
        self.offline.store(offline, Ordering::SeqCst);
    }

    /// Number of calls served so far.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    async fn begin(&self) -> Result<(), FetchError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(latency) = self.latency {
            tokio::time::sleep(latency).await;
        }
        if self.offline.load(Ordering::SeqCst) {
            return Err(FetchError::Connection("catalog offline".to_string()));
        }
        Ok(())
    }

    fn latest(&self) -> Vec<&Policy> {
        let mut seen = BTreeSet::new();
        let mut latest: Vec<&Policy> = Vec::new();
        for policy in &self.versions {
            if seen.insert(policy.name.as_str()) {
                let pick = self
                    .versions
                    .iter()
                    .filter(|p| p.name == policy.name)
                    .find(|p| p.is_latest)
                    .unwrap_or(policy);
                latest.push(pick);
            }
        }
        latest.sort_by(|a, b| a.name.cmp(&b.name));
        latest
    }

    fn distinct(&self, field: impl Fn(&Policy) -> Vec<String>) -> Vec<String> {
        self.latest()
            .into_iter()
            .flat_map(field)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }
}

fn matches(policy: &Policy, filters: &FilterState) -> bool {
    let search = filters.search.trim().to_lowercase();
    let text_match = search.is_empty()
        || policy.name.to_lowercase().contains(&search)
        || policy.display_name.to_lowercase().contains(&search)
        || policy
            .description
            .as_deref()
            .is_some_and(|d| d.to_lowercase().contains(&search));

    let any_of = |selected: &BTreeSet<String>, values: &[String]| {
        selected.is_empty() || values.iter().any(|v| selected.contains(v))
    };

    text_match
        && any_of(&filters.categories, &policy.categories)
        && any_of(&filters.providers, std::slice::from_ref(&policy.provider))
        && any_of(&filters.platforms, &policy.supported_platforms)
}

fn paginate(items: Vec<Policy>, page: u32, page_size: u32) -> PolicyPage {
    let page_size = if (MIN_PAGE_SIZE..=MAX_PAGE_SIZE).contains(&page_size) {
        page_size
    } else {
        DEFAULT_PAGE_SIZE
    };
    let page = page.max(1);
    let pagination = Pagination::new(page, page_size, items.len() as u32);
    let start = ((page - 1) as usize).saturating_mul(page_size as usize);
    let items = items.into_iter().skip(start).take(page_size as usize).collect();
    PolicyPage { items, pagination }
}

#[async_trait]
impl PolicyApi for MemoryPolicyApi {
    async fn list_policies(&self, filters: &FilterState) -> Result<PolicyPage, FetchError> {
        self.begin().await?;
        let matching = self
            .latest()
            .into_iter()
            .filter(|p| matches(p, filters))
            .cloned()
            .collect();
        Ok(paginate(matching, filters.page, filters.page_size))
    }

    async fn get_latest_version(&self, name: &str) -> Result<Option<Policy>, FetchError> {
        self.begin().await?;
        Ok(self.latest().into_iter().find(|p| p.name == name).cloned())
    }

    async fn get_policy_version(
        &self,
        name: &str,
        version: &str,
    ) -> Result<Option<Policy>, FetchError> {
        self.begin().await?;
        Ok(self
            .versions
            .iter()
            .find(|p| p.name == name && p.version == version)
            .cloned())
    }

    async fn list_policy_versions(
        &self,
        name: &str,
        page_size: u32,
    ) -> Result<PolicyPage, FetchError> {
        self.begin().await?;
        let versions = self
            .versions
            .iter()
            .filter(|p| p.name == name)
            .cloned()
            .collect();
        Ok(paginate(versions, 1, page_size))
    }

    async fn get_all_docs(&self, name: &str, version: &str) -> Result<Vec<DocsPage>, FetchError> {
        self.begin().await?;
        Ok(self
            .docs
            .get(&(name.to_string(), version.to_string()))
            .cloned()
            .unwrap_or_default())
    }

    async fn get_single_doc(
        &self,
        name: &str,
        version: &str,
        page: DocPage,
    ) -> Result<Option<DocsPage>, FetchError> {
        Ok(self
            .get_all_docs(name, version)
            .await?
            .into_iter()
            .find(|doc| doc.page == page.as_str()))
    }

    async fn list_categories(&self) -> Result<Vec<String>, FetchError> {
        self.begin().await?;
        Ok(self.distinct(|p| p.categories.clone()))
    }

    async fn list_providers(&self) -> Result<Vec<String>, FetchError> {
        self.begin().await?;
        Ok(self.distinct(|p| vec![p.provider.clone()]))
    }

    async fn list_platforms(&self) -> Result<Vec<String>, FetchError> {
        self.begin().await?;
        Ok(self.distinct(|p| p.supported_platforms.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hub_catalog::search::{FilterKind, FilterUpdate};

    fn policy(name: &str, version: &str, latest: bool, categories: &[&str]) -> Policy {
        let provider = if name.starts_with('a') { "Acme" } else { "WSO2" };
        serde_json::from_value(serde_json::json!({
            "name": name,
            "version": version,
            "displayName": name.to_uppercase(),
            "description": format!("The {} policy", name),
            "provider": provider,
            "categories": categories,
            "supportedPlatforms": ["gateway"],
            "isLatest": latest,
        }))
        .unwrap()
    }

    fn catalog() -> MemoryPolicyApi {
        MemoryPolicyApi::new()
            .with_policy(policy("jwt", "2.0.0", true, &["auth", "security"]))
            .with_policy(policy("jwt", "1.0.0", false, &["auth"]))
            .with_policy(policy("cors", "1.1.0", true, &["security"]))
            .with_policy(policy("api-key", "1.0.0", true, &["auth"]))
            .with_policy(policy("rate-limit", "3.0.0", true, &["traffic"]))
    }

    #[tokio::test]
    async fn test_list_latest_only_sorted() {
        let page = catalog().list_policies(&FilterState::default()).await.unwrap();
        let names: Vec<&str> = page.items.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["api-key", "cors", "jwt", "rate-limit"]);
        assert_eq!(page.items[2].version, "2.0.0");
        assert_eq!(page.pagination.total_items, 4);
    }

    #[tokio::test]
    async fn test_list_filters() {
        let api = catalog();
        let filters = FilterState::default()
            .with_update(FilterUpdate::new().categories(["auth"]).providers(["WSO2"]));
        let page = api.list_policies(&filters).await.unwrap();
        let names: Vec<&str> = page.items.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["jwt"]);

        let filters = FilterState::default().with_update(FilterUpdate::new().search("RATE"));
        assert_eq!(api.list_policies(&filters).await.unwrap().items.len(), 1);
    }

    #[tokio::test]
    async fn test_list_pagination() {
        let filters = FilterState::default().with_update(FilterUpdate::new().page(2).page_size(3));
        let page = catalog().list_policies(&filters).await.unwrap();
        assert_eq!(page.items.len(), 1);
        assert_eq!(page.pagination, Pagination::new(2, 3, 4));
    }

    #[tokio::test]
    async fn test_versions_and_facets() {
        let api = catalog();
        let versions = api.list_policy_versions("jwt", MAX_PAGE_SIZE).await.unwrap();
        assert_eq!(versions.items.len(), 2);
        assert!(api.list_policy_versions("nope", 10).await.unwrap().items.is_empty());

        assert_eq!(
            api.list_facet_values(FilterKind::Categories).await.unwrap(),
            vec!["auth", "security", "traffic"]
        );
        assert_eq!(api.list_providers().await.unwrap(), vec!["Acme", "WSO2"]);
    }

    #[tokio::test]
    async fn test_offline_and_call_count() {
        let api = catalog();
        api.set_offline(true);
        let err = api.list_categories().await.unwrap_err();
        assert!(matches!(err, FetchError::Connection(_)));
        assert_eq!(api.calls(), 1);
    }
}
