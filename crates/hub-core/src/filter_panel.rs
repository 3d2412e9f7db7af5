//! Facet checkbox groups.

use std::collections::BTreeSet;

use hub_catalog::search::{FilterKind, FilterState, FilterUpdate};

use crate::config::UiConfig;
use crate::session::AppData;

/// One facet's checkbox group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FacetSection {
    pub kind: FilterKind,
    options: Vec<String>,
    selected: BTreeSet<String>,
    max_visible: usize,
    show_all: bool,
}

impl FacetSection {
    pub fn new(
        kind: FilterKind,
        options: Vec<String>,
        selected: BTreeSet<String>,
        max_visible: usize,
    ) -> Self {
        Self {
            kind,
            options,
            selected,
            max_visible,
            show_all: false,
        }
    }

    /// Options currently listed.
    pub fn visible(&self) -> &[String] {
        if self.show_all {
            &self.options
        } else {
            &self.options[..self.options.len().min(self.max_visible)]
        }
    }

    /// Options beyond the visible limit.
    pub fn hidden_count(&self) -> usize {
        self.options.len().saturating_sub(self.max_visible)
    }

    /// Label of the expand/collapse control, if the list is long enough.
    pub fn toggle_label(&self) -> Option<String> {
        match (self.hidden_count(), self.show_all) {
            (0, _) => None,
            (_, true) => Some("Show fewer".to_string()),
            (hidden, false) => Some(format!("Show {} more", hidden)),
        }
    }

    /// Expand or collapse the list.
    pub fn toggle_show_all(&mut self) {
        self.show_all = !self.show_all;
    }

    pub fn is_checked(&self, value: &str) -> bool {
        self.selected.contains(value)
    }

    /// Badge shown next to the title when something is selected.
    pub fn selected_label(&self) -> Option<String> {
        (!self.selected.is_empty()).then(|| format!("{} selected", self.selected.len()))
    }

    /// Update that checks or unchecks `value`.
    pub fn check(&self, value: &str, checked: bool) -> FilterUpdate {
        let mut values = self.selected.clone();
        if checked {
            values.insert(value.to_string());
        } else {
            values.remove(value);
        }
        FilterUpdate::new().facet(self.kind, values)
    }

    /// Update that clears this facet.
    pub fn clear(&self) -> FilterUpdate {
        FilterUpdate::clear(self.kind)
    }
}

/// The filter sidebar: one section per facet that has known values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterPanel {
    sections: Vec<FacetSection>,
    active_count: usize,
}

impl FilterPanel {
    pub fn new(app_data: &AppData, filters: &FilterState, limits: &UiConfig) -> Self {
        let sections = FilterKind::ALL
            .into_iter()
            .filter(|kind| !app_data.values(*kind).is_empty())
            .map(|kind| {
                let max_visible = match kind {
                    FilterKind::Categories => limits.max_visible_categories,
                    FilterKind::Providers => limits.max_visible_providers,
                    FilterKind::Platforms => limits.max_visible_platforms,
                };
                FacetSection::new(
                    kind,
                    app_data.values(kind).to_vec(),
                    filters.values(kind).clone(),
                    max_visible,
                )
            })
            .collect();

        Self {
            sections,
            active_count: filters.active_filter_count(),
        }
    }

    pub fn sections(&self) -> &[FacetSection] {
        &self.sections
    }

    pub fn section(&self, kind: FilterKind) -> Option<&FacetSection> {
        self.sections.iter().find(|s| s.kind == kind)
    }

    pub fn section_mut(&mut self, kind: FilterKind) -> Option<&mut FacetSection> {
        self.sections.iter_mut().find(|s| s.kind == kind)
    }

    /// Number of selected values across facets.
    pub fn active_count(&self) -> usize {
        self.active_count
    }

    /// Update that clears every facet.
    pub fn clear_all(&self) -> FilterUpdate {
        FilterKind::ALL
            .into_iter()
            .fold(FilterUpdate::new(), |update, kind| {
                update.facet(kind, Vec::<String>::new())
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    fn app_data() -> AppData {
        AppData {
            categories: strings(&["a", "b", "c", "d", "e", "f", "g", "h", "i", "j"]),
            providers: strings(&["WSO2"]),
            platforms: Vec::new(),
            total_policies: 12,
        }
    }

    #[test]
    fn test_sections_skip_empty_facets() {
        let panel = FilterPanel::new(&app_data(), &FilterState::default(), &UiConfig::default());
        let kinds: Vec<FilterKind> = panel.sections().iter().map(|s| s.kind).collect();
        assert_eq!(kinds, vec![FilterKind::Categories, FilterKind::Providers]);
        assert!(panel.section(FilterKind::Platforms).is_none());
    }

    #[test]
    fn test_show_more() {
        let mut panel = FilterPanel::new(&app_data(), &FilterState::default(), &UiConfig::default());
        let section = panel.section_mut(FilterKind::Categories).unwrap();
        assert_eq!(section.visible().len(), 8);
        assert_eq!(section.toggle_label().as_deref(), Some("Show 2 more"));

        section.toggle_show_all();
        assert_eq!(section.visible().len(), 10);
        assert_eq!(section.toggle_label().as_deref(), Some("Show fewer"));

        assert_eq!(panel.section(FilterKind::Providers).unwrap().toggle_label(), None);
    }

    #[test]
    fn test_check_and_clear() {
        let filters = FilterState::default().with_update(FilterUpdate::new().categories(["b"]));
        let panel = FilterPanel::new(&app_data(), &filters, &UiConfig::default());
        let section = panel.section(FilterKind::Categories).unwrap();
        assert!(section.is_checked("b"));
        assert_eq!(section.selected_label().as_deref(), Some("1 selected"));
        assert_eq!(panel.active_count(), 1);

        let next = filters.clone().with_update(section.check("c", true));
        assert_eq!(next.active_filter_count(), 2);

        let next = next.with_update(section.clear());
        assert!(next.categories.is_empty());

        let all = filters
            .with_update(FilterUpdate::new().providers(["WSO2"]))
            .with_update(panel.clear_all());
        assert_eq!(all.active_filter_count(), 0);
    }
}
