//! Catalog filter state and partial updates.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE, MIN_PAGE_SIZE};

/// A multi-valued facet of the filter state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FilterKind {
    Categories,
    Providers,
    Platforms,
}

impl FilterKind {
    /// All facets, in display order.
    pub const ALL: [FilterKind; 3] = [Self::Categories, Self::Providers, Self::Platforms];

    /// Query parameter name.
    pub fn param(&self) -> &'static str {
        match self {
            Self::Categories => "categories",
            Self::Providers => "providers",
            Self::Platforms => "platforms",
        }
    }

    /// Heading shown above the facet's checkboxes.
    pub fn title(&self) -> &'static str {
        match self {
            Self::Categories => "Categories",
            Self::Providers => "Providers",
            Self::Platforms => "Platforms",
        }
    }
}

impl std::fmt::Display for FilterKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.param())
    }
}

/// The canonical search, filter and pagination state of the catalog.
///
/// Facet values are opaque strings; they are not checked against the list of
/// known categories, providers or platforms.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterState {
    /// Free-text search.
    pub search: String,
    pub categories: BTreeSet<String>,
    pub providers: BTreeSet<String>,
    pub platforms: BTreeSet<String>,
    /// Current page (1-indexed).
    pub page: u32,
    /// Items per page.
    pub page_size: u32,
}

impl Default for FilterState {
    fn default() -> Self {
        Self {
            search: String::new(),
            categories: BTreeSet::new(),
            providers: BTreeSet::new(),
            platforms: BTreeSet::new(),
            page: 1,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl FilterState {
    /// Create the default state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Selected values of a facet.
    pub fn values(&self, kind: FilterKind) -> &BTreeSet<String> {
        match kind {
            FilterKind::Categories => &self.categories,
            FilterKind::Providers => &self.providers,
            FilterKind::Platforms => &self.platforms,
        }
    }

    /// Merge a partial update into this state.
    ///
    /// Touching the search text or any facet moves back to page 1 unless the
    /// update carries its own page. Returns whether anything changed.
    ///
    /// An explicit page size is clamped into `MIN_PAGE_SIZE..=MAX_PAGE_SIZE`
    /// and a page below 1 becomes 1. Parsing a location instead falls back to
    /// the defaults (see [`FilterState::from_query_string`]).
    pub fn apply(&mut self, update: FilterUpdate) -> bool {
        let before = self.clone();
        let resets_page = update.touches_filters();
        let FilterUpdate {
            search,
            categories,
            providers,
            platforms,
            page,
            page_size,
        } = update;

        if let Some(search) = search {
            self.search = search;
        }
        if let Some(values) = categories {
            self.categories = values;
        }
        if let Some(values) = providers {
            self.providers = values;
        }
        if let Some(values) = platforms {
            self.platforms = values;
        }
        if let Some(page_size) = page_size {
            self.page_size = page_size.clamp(MIN_PAGE_SIZE, MAX_PAGE_SIZE);
        }
        match page {
            Some(page) => self.page = page.max(1),
            None if resets_page => self.page = 1,
            None => {}
        }

        *self != before
    }

    /// Consuming variant of [`FilterState::apply`].
    pub fn with_update(mut self, update: FilterUpdate) -> Self {
        self.apply(update);
        self
    }

    /// Number of selected facet values.
    pub fn active_filter_count(&self) -> usize {
        self.categories.len() + self.providers.len() + self.platforms.len()
    }

    /// Whether a search or any facet narrows the result set.
    pub fn is_filtered(&self) -> bool {
        !self.search.is_empty() || self.active_filter_count() > 0
    }
}

/// A partial [`FilterState`]; `None` fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterUpdate {
    pub search: Option<String>,
    pub categories: Option<BTreeSet<String>>,
    pub providers: Option<BTreeSet<String>>,
    pub platforms: Option<BTreeSet<String>>,
    pub page: Option<u32>,
    pub page_size: Option<u32>,
}

impl FilterUpdate {
    /// Create an empty update.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the search text.
    pub fn search(mut self, search: impl Into<String>) -> Self {
        self.search = Some(search.into());
        self
    }

    /// Replace the selected values of a facet. Empty values are dropped.
    pub fn facet<I, S>(mut self, kind: FilterKind, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let values = Some(
            values
                .into_iter()
                .map(Into::into)
                .filter(|value: &String| !value.is_empty())
                .collect(),
        );
        match kind {
            FilterKind::Categories => self.categories = values,
            FilterKind::Providers => self.providers = values,
            FilterKind::Platforms => self.platforms = values,
        }
        self
    }

    /// Replace the selected categories.
    pub fn categories<I, S>(self, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.facet(FilterKind::Categories, values)
    }

    /// Replace the selected providers.
    pub fn providers<I, S>(self, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.facet(FilterKind::Providers, values)
    }

    /// Replace the selected platforms.
    pub fn platforms<I, S>(self, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.facet(FilterKind::Platforms, values)
    }

    /// Set the page.
    pub fn page(mut self, page: u32) -> Self {
        self.page = Some(page);
        self
    }

    /// Set the page size.
    pub fn page_size(mut self, page_size: u32) -> Self {
        self.page_size = Some(page_size);
        self
    }

    /// Check or uncheck one facet value relative to `current`.
    pub fn toggle(current: &FilterState, kind: FilterKind, value: &str, checked: bool) -> Self {
        let mut values = current.values(kind).clone();
        if checked {
            values.insert(value.to_string());
        } else {
            values.remove(value);
        }
        Self::new().facet(kind, values)
    }

    /// Clear every selected value of one facet.
    pub fn clear(kind: FilterKind) -> Self {
        Self::new().facet(kind, Vec::<String>::new())
    }

    /// Selected values carried for a facet, if any.
    pub fn facet_values(&self, kind: FilterKind) -> Option<&BTreeSet<String>> {
        match kind {
            FilterKind::Categories => self.categories.as_ref(),
            FilterKind::Providers => self.providers.as_ref(),
            FilterKind::Platforms => self.platforms.as_ref(),
        }
    }

    /// Whether the update touches search or any facet.
    pub fn touches_filters(&self) -> bool {
        self.search.is_some()
            || FilterKind::ALL.iter().any(|kind| self.facet_values(*kind).is_some())
    }

    /// Whether the update carries no fields.
    pub fn is_empty(&self) -> bool {
        !self.touches_filters() && self.page.is_none() && self.page_size.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(values: &[&str]) -> BTreeSet<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    #[test]
    fn test_defaults() {
        let state = FilterState::default();
        assert_eq!(state.search, "");
        assert!(state.categories.is_empty());
        assert_eq!(state.page, 1);
        assert_eq!(state.page_size, DEFAULT_PAGE_SIZE);
        assert!(!state.is_filtered());
    }

    #[test]
    fn test_search_change_resets_page() {
        let mut state = FilterState {
            page: 5,
            search: "x".to_string(),
            ..Default::default()
        };
        assert!(state.apply(FilterUpdate::new().search("y")));
        assert_eq!(state.page, 1);
        assert_eq!(state.search, "y");
    }

    #[test]
    fn test_page_alone_keeps_search() {
        let mut state = FilterState {
            page: 5,
            search: "x".to_string(),
            ..Default::default()
        };
        state.apply(FilterUpdate::new().page(3));
        assert_eq!(state.page, 3);
        assert_eq!(state.search, "x");
    }

    #[test]
    fn test_page_size_alone_keeps_page() {
        let mut state = FilterState {
            page: 4,
            ..Default::default()
        };
        state.apply(FilterUpdate::new().page_size(50));
        assert_eq!(state.page, 4);
        assert_eq!(state.page_size, 50);
    }

    #[test]
    fn test_explicit_page_wins_over_reset() {
        let mut state = FilterState {
            page: 5,
            ..Default::default()
        };
        state.apply(FilterUpdate::new().categories(["auth"]).page(2));
        assert_eq!(state.page, 2);
        assert_eq!(state.categories, set(&["auth"]));
    }

    #[test]
    fn test_facet_change_resets_page() {
        let mut state = FilterState {
            page: 7,
            ..Default::default()
        };
        state.apply(FilterUpdate::new().platforms(["gateway"]));
        assert_eq!(state.page, 1);
    }

    #[test]
    fn test_page_and_size_are_bounded() {
        let state = FilterState::default()
            .with_update(FilterUpdate::new().page(0).page_size(1000));
        assert_eq!(state.page, 1);
        assert_eq!(state.page_size, MAX_PAGE_SIZE);
    }

    #[test]
    fn test_apply_reports_no_change() {
        let mut state = FilterState::default();
        assert!(!state.apply(FilterUpdate::new()));
        assert!(!state.apply(FilterUpdate::new().page(1)));
    }

    #[test]
    fn test_toggle_and_clear() {
        let start = FilterState::default();
        let state = start
            .clone()
            .with_update(FilterUpdate::toggle(&start, FilterKind::Providers, "WSO2", true));
        assert_eq!(state.providers, set(&["WSO2"]));

        let added = FilterUpdate::toggle(&state, FilterKind::Providers, "Acme", true);
        let state = state.with_update(added);
        assert_eq!(state.active_filter_count(), 2);

        let removed = FilterUpdate::toggle(&state, FilterKind::Providers, "WSO2", false);
        let state = state.with_update(removed);
        assert_eq!(state.providers, set(&["Acme"]));

        let state = state.with_update(FilterUpdate::clear(FilterKind::Providers));
        assert!(state.providers.is_empty());
    }

    #[test]
    fn test_duplicate_values_collapse() {
        let state = FilterState::default()
            .with_update(FilterUpdate::new().categories(["auth", "auth", "security"]));
        assert_eq!(state.categories, set(&["auth", "security"]));
    }

    #[test]
    fn test_empty_facet_values_dropped() {
        let state = FilterState::default()
            .with_update(FilterUpdate::new().categories(["", "auth"]));
        assert_eq!(state.categories, set(&["auth"]));

        let toggled = FilterUpdate::toggle(&state, FilterKind::Categories, "", true);
        assert_eq!(toggled.categories, Some(set(&["auth"])));
    }

    #[test]
    fn test_update_flags() {
        assert!(FilterUpdate::new().is_empty());
        assert!(!FilterUpdate::new().page(2).touches_filters());
        assert!(FilterUpdate::clear(FilterKind::Categories).touches_filters());
    }
}
