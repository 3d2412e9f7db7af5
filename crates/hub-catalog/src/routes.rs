//! Navigable paths of the catalog.

/// Home page.
pub const HOME: &str = "/";

/// Catalog listing.
pub const POLICIES: &str = "/policies";

/// Guide for contributing custom policies.
pub const CUSTOM_POLICY_GUIDE: &str = "/custom-policy-guide";

/// About page.
pub const ABOUT: &str = "/about";

/// Detail page of a policy (its latest version).
pub fn policy_detail(name: &str) -> String {
    format!("{}/{}", POLICIES, name)
}

/// Detail page of a specific policy version.
pub fn policy_version(name: &str, version: &str) -> String {
    format!("{}/{}/versions/{}", POLICIES, name, version)
}

/// Where selecting `version` in the version picker navigates to.
///
/// The latest version lives at the policy's own detail path.
pub fn version_target(name: &str, version: &str, latest: Option<&str>) -> String {
    if crate::policy::is_latest_version(version, latest) {
        policy_detail(name)
    } else {
        policy_version(name, version)
    }
}
