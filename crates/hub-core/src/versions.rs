//! Version list of one policy and navigation between versions.

use hub_cache::{cache_key, VersionsCache};
use hub_catalog::constants::MAX_PAGE_SIZE;
use hub_catalog::policy::{is_latest_version, latest_version};
use hub_catalog::routes::version_target;
use hub_catalog::Policy;
use hub_reactive::{AsyncData, AsyncDataState, FetchOptions};

use crate::location::Location;
use crate::session::HubSession;

/// Every version of one policy, newest first.
///
/// Served from the session's versions cache when possible; fetched lists
/// are stored there for the rest of the session.
pub struct PolicyVersions {
    versions: AsyncData<Vec<Policy>, String>,
    cache: VersionsCache,
}

impl PolicyVersions {
    /// Must be called within a tokio runtime.
    pub fn new(session: &HubSession, name: &str) -> Self {
        let api = session.api();
        let cache = session.versions_cache().clone();
        let producer_cache = cache.clone();

        let versions = AsyncData::new(
            move |name: String| {
                let api = api.clone();
                let cache = producer_cache.clone();
                async move {
                    if let Some(versions) = cache.get(&name) {
                        return Ok(versions);
                    }
                    let page = api.list_policy_versions(&name, MAX_PAGE_SIZE).await?;
                    cache.set(&name, page.items.clone());
                    Ok(page.items)
                }
            },
            name.to_string(),
            FetchOptions::immediate().with_cache_key_fn(|name: &String| cache_key!("versions", name)),
            session.fetch_cache().clone(),
        );

        Self { versions, cache }
    }

    /// Policy whose versions are listed.
    pub fn policy(&self) -> &str {
        self.versions.deps()
    }

    /// Switch to another policy.
    pub fn set_policy(&mut self, name: &str) -> bool {
        self.versions.set_deps(name.to_string())
    }

    pub fn state(&self) -> AsyncDataState<Vec<Policy>> {
        self.versions.state()
    }

    pub async fn settled(&self) -> AsyncDataState<Vec<Policy>> {
        self.versions.settled().await
    }

    /// Drop the cached list and fetch it again.
    pub fn refetch(&self) {
        self.cache.invalidate(self.policy());
        self.versions.refetch();
    }

    /// Loaded versions; empty until the first load.
    pub fn versions(&self) -> Vec<Policy> {
        self.state().data.unwrap_or_default()
    }

    /// Latest version: the one flagged latest, else the first.
    pub fn latest_version(&self) -> Option<String> {
        latest_version(&self.versions()).map(str::to_string)
    }

    pub fn is_latest(&self, version: &str) -> bool {
        is_latest_version(version, self.latest_version().as_deref())
    }

    /// Banner shown when viewing a version other than the latest.
    pub fn older_version_notice(&self, current: &str) -> Option<String> {
        let latest = self.latest_version()?;
        (latest != current).then(|| {
            format!(
                "You are viewing an older version of this policy. The latest version is {}.",
                latest
            )
        })
    }

    /// Path that selecting `version` leads to.
    pub fn version_path(&self, version: &str) -> String {
        version_target(self.policy(), version, self.latest_version().as_deref())
    }

    /// Navigate `location` to `version`.
    pub fn select_version(&self, location: &impl Location, version: &str) {
        let path = self.version_path(version);
        tracing::debug!(policy = self.policy(), version, path = %path, "version selected");
        location.navigate(&path);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::HubConfig;
    use crate::location::MemoryLocation;
    use hub_data::MemoryPolicyApi;
    use std::sync::Arc;

    fn policy(name: &str, version: &str, latest: bool) -> Policy {
        serde_json::from_value(serde_json::json!({
            "name": name,
            "version": version,
            "displayName": name,
            "provider": "WSO2",
            "isLatest": latest,
        }))
        .unwrap()
    }

    fn session() -> (HubSession, MemoryPolicyApi) {
        let api = MemoryPolicyApi::new()
            .with_policy(policy("jwt", "2.0.0", true))
            .with_policy(policy("jwt", "1.1.0", false))
            .with_policy(policy("jwt", "1.0.0", false))
            .with_policy(policy("cors", "1.0.0", true));
        (HubSession::new(Arc::new(api.clone()), HubConfig::default()), api)
    }

    #[tokio::test]
    async fn test_versions_and_latest() {
        let (session, _) = session();
        let versions = PolicyVersions::new(&session, "jwt");
        versions.settled().await;

        assert_eq!(versions.versions().len(), 3);
        assert_eq!(versions.latest_version().as_deref(), Some("2.0.0"));
        assert!(versions.is_latest("2.0.0"));
        assert_eq!(versions.older_version_notice("2.0.0"), None);
        assert_eq!(
            versions.older_version_notice("1.0.0").as_deref(),
            Some("You are viewing an older version of this policy. The latest version is 2.0.0.")
        );
    }

    #[tokio::test]
    async fn test_versions_cache_is_shared() {
        let (session, api) = session();
        let first = PolicyVersions::new(&session, "jwt");
        first.settled().await;
        let calls = api.calls();
        assert!(session.versions_cache().get("jwt").is_some());

        let second = PolicyVersions::new(&session, "jwt");
        assert_eq!(second.state().data.map(|v| v.len()), Some(3));
        assert_eq!(api.calls(), calls);
    }

    #[tokio::test]
    async fn test_refetch_skips_caches() {
        let (session, api) = session();
        let versions = PolicyVersions::new(&session, "jwt");
        versions.settled().await;
        let calls = api.calls();

        versions.refetch();
        versions.settled().await;
        assert_eq!(api.calls(), calls + 1);
    }

    #[tokio::test]
    async fn test_select_version_navigates() {
        let (session, _) = session();
        let location = MemoryLocation::new("/policies/jwt");
        let versions = PolicyVersions::new(&session, "jwt");
        versions.settled().await;

        versions.select_version(&location, "1.1.0");
        assert_eq!(location.path(), "/policies/jwt/versions/1.1.0");

        versions.select_version(&location, "2.0.0");
        assert_eq!(location.path(), "/policies/jwt");
    }

    #[tokio::test]
    async fn test_unknown_policy_has_no_versions() {
        let (session, _) = session();
        let mut versions = PolicyVersions::new(&session, "jwt");
        versions.settled().await;

        assert!(versions.set_policy("missing"));
        let state = versions.settled().await;
        assert_eq!(state.data, Some(Vec::new()));
        assert_eq!(versions.latest_version(), None);
        assert_eq!(versions.older_version_notice("1.0.0"), None);
    }
}
