//! Policy records as served by the catalog API.

use chrono::{DateTime, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::CatalogError;

/// Longest policy name the API accepts.
pub const MAX_POLICY_NAME_LENGTH: usize = 100;

/// Longest version string the API accepts.
pub const MAX_VERSION_LENGTH: usize = 50;

/// Artifact checksum.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Checksum {
    pub algorithm: String,
    pub value: String,
}

/// A single policy version.
///
/// List endpoints return the latest version of each policy; the versions
/// endpoint returns every version of one policy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Policy {
    /// Policy identifier (stable across versions).
    pub name: String,
    /// Semantic version, `MAJOR.MINOR.PATCH`.
    pub version: String,
    pub display_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub provider: String,
    #[serde(default)]
    pub categories: Vec<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub supported_platforms: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logo_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub banner_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon_url: Option<String>,
    /// Release date as sent by the API (`YYYY-MM-DD`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub release_date: Option<String>,
    #[serde(default)]
    pub is_latest: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub download_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub checksum: Option<Checksum>,
}

impl Policy {
    /// Release date formatted for display, e.g. `Jan 2, 2025`.
    ///
    /// Accepts plain dates and RFC 3339 timestamps; anything else is shown as-is.
    pub fn release_date_display(&self) -> Option<String> {
        self.release_date.as_deref().map(format_date)
    }

    /// Title shown in lists, falling back to the identifier.
    pub fn title(&self) -> &str {
        if self.display_name.is_empty() {
            &self.name
        } else {
            &self.display_name
        }
    }
}

/// Format an API date for display.
pub fn format_date(raw: &str) -> String {
    let date = NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .or_else(|| DateTime::parse_from_rfc3339(raw).ok().map(|d| d.date_naive()));

    match date {
        Some(date) => date.format("%b %-d, %Y").to_string(),
        None => raw.to_string(),
    }
}

/// Pick the latest version from a version list.
///
/// The entry flagged `is_latest` wins; otherwise the first entry (the API
/// orders versions newest first).
pub fn latest_version(versions: &[Policy]) -> Option<&str> {
    versions
        .iter()
        .find(|v| v.is_latest)
        .or_else(|| versions.first())
        .map(|v| v.version.as_str())
}

/// Whether `version` is the known latest version.
pub fn is_latest_version(version: &str, latest: Option<&str>) -> bool {
    latest.is_some_and(|latest| latest == version)
}

/// Validate a policy name before it is placed into a path.
pub fn validate_policy_name(name: &str) -> Result<(), CatalogError> {
    let valid = !name.is_empty()
        && name.len() <= MAX_POLICY_NAME_LENGTH
        && name
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || b == b'_' || b == b'-');

    if valid {
        Ok(())
    } else {
        Err(CatalogError::InvalidPolicyName(name.to_string()))
    }
}

/// Validate a `MAJOR.MINOR.PATCH` version before it is placed into a path.
pub fn validate_version(version: &str) -> Result<(), CatalogError> {
    let parts: Vec<&str> = version.split('.').collect();
    let valid = version.len() <= MAX_VERSION_LENGTH
        && parts.len() == 3
        && parts
            .iter()
            .all(|p| !p.is_empty() && p.bytes().all(|b| b.is_ascii_digit()));

    if valid {
        Ok(())
    } else {
        Err(CatalogError::InvalidVersion(version.to_string()))
    }
}

#[cfg(test)]
pub(crate) fn sample_policy(name: &str, version: &str, is_latest: bool) -> Policy {
    Policy {
        name: name.to_string(),
        version: version.to_string(),
        display_name: String::new(),
        description: None,
        provider: "WSO2".to_string(),
        categories: vec!["security".to_string()],
        tags: Vec::new(),
        supported_platforms: Vec::new(),
        logo_url: None,
        banner_url: None,
        icon_url: None,
        release_date: None,
        is_latest,
        source_type: None,
        download_url: None,
        checksum: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_api_policy() {
        let json = r#"{
            "name": "rate-limit",
            "version": "1.2.0",
            "displayName": "Rate Limit",
            "provider": "WSO2",
            "categories": ["traffic"],
            "tags": [],
            "supportedPlatforms": ["gateway"],
            "releaseDate": "2025-01-02",
            "isLatest": true
        }"#;

        let policy: Policy = serde_json::from_str(json).unwrap();
        assert_eq!(policy.name, "rate-limit");
        assert_eq!(policy.supported_platforms, vec!["gateway"]);
        assert!(policy.is_latest);
        assert_eq!(policy.description, None);
        assert_eq!(policy.release_date_display().as_deref(), Some("Jan 2, 2025"));
    }

    #[test]
    fn test_format_date_variants() {
        assert_eq!(format_date("2024-11-30"), "Nov 30, 2024");
        assert_eq!(format_date("2024-11-30T10:00:00Z"), "Nov 30, 2024");
        assert_eq!(format_date("someday"), "someday");
    }

    #[test]
    fn test_latest_version_prefers_flag() {
        let versions = vec![
            sample_policy("jwt", "2.0.0", false),
            sample_policy("jwt", "1.5.0", true),
        ];
        assert_eq!(latest_version(&versions), Some("1.5.0"));
    }

    #[test]
    fn test_latest_version_falls_back_to_first() {
        let versions = vec![
            sample_policy("jwt", "2.0.0", false),
            sample_policy("jwt", "1.5.0", false),
        ];
        assert_eq!(latest_version(&versions), Some("2.0.0"));
        assert_eq!(latest_version(&[]), None);
    }

    #[test]
    fn test_is_latest_version() {
        assert!(is_latest_version("1.0.0", Some("1.0.0")));
        assert!(!is_latest_version("1.0.0", Some("1.1.0")));
        assert!(!is_latest_version("1.0.0", None));
    }

    #[test]
    fn test_title_fallback() {
        let mut policy = sample_policy("cors", "1.0.0", true);
        assert_eq!(policy.title(), "cors");
        policy.display_name = "CORS".to_string();
        assert_eq!(policy.title(), "CORS");
    }

    #[test]
    fn test_validate_policy_name() {
        assert!(validate_policy_name("basic-auth_v2").is_ok());
        assert!(validate_policy_name("").is_err());
        assert!(validate_policy_name("../etc").is_err());
        assert!(validate_policy_name(&"a".repeat(101)).is_err());
    }

    #[test]
    fn test_validate_version() {
        assert!(validate_version("1.0.0").is_ok());
        assert!(validate_version("10.20.30").is_ok());
        assert_eq!(
            validate_version("1.0"),
            Err(CatalogError::InvalidVersion("1.0".to_string()))
        );
        assert!(validate_version("1.0.x").is_err());
        assert!(validate_version("1..0").is_err());
    }
}
