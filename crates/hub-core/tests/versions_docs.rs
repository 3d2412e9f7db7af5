//! Moving between versions of a policy and their documentation.

use std::sync::Arc;

use hub_core::prelude::*;
use hub_data::MemoryPolicyApi;

fn version(version: &str, latest: bool) -> Policy {
    serde_json::from_value(serde_json::json!({
        "name": "rate-limit",
        "version": version,
        "displayName": "Rate Limit",
        "provider": "WSO2",
        "releaseDate": "2025-01-02",
        "isLatest": latest,
    }))
    .unwrap()
}

fn doc(page: &str, content: &str) -> DocsPage {
    DocsPage {
        page: page.to_string(),
        format: "markdown".to_string(),
        content: content.to_string(),
    }
}

fn session() -> HubSession {
    let api = MemoryPolicyApi::new()
        .with_policy(version("2.1.0", true))
        .with_policy(version("2.0.0", false))
        .with_docs("rate-limit", "2.1.0", vec![doc("overview", "v2.1"), doc("examples", "ex")])
        .with_docs("rate-limit", "2.0.0", vec![doc("overview", "v2.0")]);
    HubSession::new(Arc::new(api), HubConfig::default())
}

#[tokio::test]
async fn test_switch_to_older_version() {
    let session = session();
    let location = MemoryLocation::new("/policies/rate-limit");
    let versions = PolicyVersions::new(&session, "rate-limit");
    let mut docs = DocsView::new(&session, "rate-limit", "2.1.0");
    versions.settled().await;
    docs.settled().await;

    assert!(docs.select(DocPage::Examples));
    assert_eq!(docs.panel(), DocPanel::Content(doc("examples", "ex")));

    versions.select_version(&location, "2.0.0");
    assert_eq!(location.path(), "/policies/rate-limit/versions/2.0.0");
    assert!(versions.older_version_notice("2.0.0").is_some());

    assert!(docs.set_version("rate-limit", "2.0.0"));
    docs.settled().await;
    assert!(matches!(docs.panel(), DocPanel::NotAvailable { .. }));
    assert!(docs.select(DocPage::Overview));
    assert_eq!(docs.panel(), DocPanel::Content(doc("overview", "v2.0")));

    versions.select_version(&location, "2.1.0");
    assert_eq!(location.path(), "/policies/rate-limit");
}

#[tokio::test]
async fn test_release_date_display() {
    let session = session();
    let versions = PolicyVersions::new(&session, "rate-limit");
    let state = versions.settled().await;
    let latest = state.data.unwrap().into_iter().find(|v| v.is_latest).unwrap();
    assert_eq!(latest.release_date_display().as_deref(), Some("Jan 2, 2025"));
}
