//! Policy documentation pages.

use std::collections::BTreeMap;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CatalogError;

/// A documentation page of a policy version.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum DocPage {
    #[default]
    Overview,
    Configuration,
    Examples,
    Faq,
}

impl DocPage {
    /// All pages, in tab order.
    pub const ALL: [DocPage; 4] = [Self::Overview, Self::Configuration, Self::Examples, Self::Faq];

    /// Page name used by the API.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Overview => "overview",
            Self::Configuration => "configuration",
            Self::Examples => "examples",
            Self::Faq => "faq",
        }
    }

    /// Tab label.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Overview => "Overview",
            Self::Configuration => "Configuration",
            Self::Examples => "Examples",
            Self::Faq => "FAQ",
        }
    }
}

impl std::fmt::Display for DocPage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for DocPage {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|page| page.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| CatalogError::UnknownDocPage(s.to_string()))
    }
}

/// A documentation page as returned by the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocsPage {
    pub page: String,
    #[serde(default = "default_format")]
    pub format: String,
    pub content: String,
}

fn default_format() -> String {
    "markdown".to_string()
}

/// A tab in the documentation view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DocTab {
    pub page: DocPage,
    pub label: &'static str,
    pub disabled: bool,
}

/// Documentation of one policy version, indexed by page.
///
/// Pages the API returns under unknown names are dropped.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DocsIndex {
    pages: BTreeMap<DocPage, DocsPage>,
}

impl DocsIndex {
    /// Index pages returned by the all-docs endpoint.
    pub fn from_pages(pages: impl IntoIterator<Item = DocsPage>) -> Self {
        let pages = pages
            .into_iter()
            .filter_map(|doc| match doc.page.parse::<DocPage>() {
                Ok(page) => Some((page, doc)),
                Err(_) => {
                    tracing::debug!(page = %doc.page, "dropping unknown documentation page");
                    None
                }
            })
            .collect();
        Self { pages }
    }

    /// Document for a page, if present.
    pub fn get(&self, page: DocPage) -> Option<&DocsPage> {
        self.pages.get(&page)
    }

    /// Whether no page is available.
    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }

    /// Tabs for every page; absent pages are disabled once loading finished.
    pub fn tabs(&self, loading: bool) -> Vec<DocTab> {
        DocPage::ALL
            .into_iter()
            .map(|page| DocTab {
                page,
                label: page.label(),
                disabled: !loading && !self.pages.contains_key(&page),
            })
            .collect()
    }
}
