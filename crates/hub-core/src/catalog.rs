//! The searchable, filterable policy catalog.

use hub_catalog::constants::messages;
use hub_catalog::search::{FilterKind, FilterState, FilterUpdate, Pagination};
use hub_catalog::Policy;
use hub_data::PolicyPage;
use hub_reactive::{AsyncData, AsyncDataState, FetchOptions};

use crate::filter_panel::FilterPanel;
use crate::location::Location;
use crate::query_params::QueryParams;
use crate::search_box::SearchBox;
use crate::session::HubSession;

/// What the results area shows instead of a list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogNotice {
    /// The query matched nothing.
    Empty { title: &'static str, hint: &'static str },
    /// The last fetch failed.
    Error { title: &'static str, message: String },
}

/// Catalog page controller.
///
/// Owns the filter state (through the location), the policy list fetch
/// keyed on that state and the debounced search box.
pub struct CatalogView<L> {
    session: HubSession,
    params: QueryParams<L>,
    policies: AsyncData<PolicyPage, FilterState>,
    search: SearchBox,
}

impl<L: Location> CatalogView<L> {
    /// Mount the catalog: read filters from `location` and start fetching.
    ///
    /// Must be called within a tokio runtime.
    pub fn new(session: &HubSession, location: L) -> Self {
        let params = QueryParams::new(location);
        let filters = params.filters();
        let search = SearchBox::new(&filters.search, session.config().debounce());

        let api = session.api();
        let policies = AsyncData::new(
            move |filters: FilterState| {
                let api = api.clone();
                async move { api.list_policies(&filters).await }
            },
            filters,
            FetchOptions::immediate(),
            session.fetch_cache().clone(),
        );

        Self {
            session: session.clone(),
            params,
            policies,
            search,
        }
    }

    /// Current filter state.
    pub fn filters(&self) -> FilterState {
        self.params.filters()
    }

    pub fn location(&self) -> &L {
        self.params.location()
    }

    /// Merge `update` into the filters, write the location and refetch if
    /// the state changed.
    pub fn update_filters(&mut self, update: FilterUpdate) -> FilterState {
        let filters = self.params.update_filters(update);
        self.commit(filters)
    }

    /// Restore default filters.
    pub fn reset_filters(&mut self) -> FilterState {
        let filters = self.params.reset_filters();
        self.commit(filters)
    }

    /// The location changed from outside (back/forward, link).
    pub fn location_changed(&mut self) -> FilterState {
        let filters = self.params.filters();
        self.commit(filters)
    }

    fn commit(&mut self, filters: FilterState) -> FilterState {
        self.search.sync(&filters.search);
        if self.policies.set_deps(filters.clone()) {
            tracing::debug!(query = %filters.to_query_string(), "catalog filters changed");
        }
        filters
    }

    pub fn on_page_change(&mut self, page: u32) -> FilterState {
        self.update_filters(FilterUpdate::new().page(page))
    }

    pub fn on_page_size_change(&mut self, page_size: u32) -> FilterState {
        self.update_filters(FilterUpdate::new().page_size(page_size).page(1))
    }

    pub fn on_search_change(&mut self, search: impl Into<String>) -> FilterState {
        self.update_filters(FilterUpdate::new().search(search).page(1))
    }

    /// Check or uncheck a facet value.
    pub fn toggle_filter(&mut self, kind: FilterKind, value: &str, checked: bool) -> FilterState {
        let update = FilterUpdate::toggle(&self.filters(), kind, value, checked);
        self.update_filters(update)
    }

    pub fn clear_filter(&mut self, kind: FilterKind) -> FilterState {
        self.update_filters(FilterUpdate::clear(kind))
    }

    /// Feed typed text into the search box.
    pub fn type_search(&self, text: impl Into<String>) {
        self.search.input(text);
    }

    /// Text shown in the search box.
    pub fn search_text(&self) -> String {
        self.search.text()
    }

    /// Clear the search box and the search filter at once.
    pub fn clear_search(&mut self) -> FilterState {
        let update = self.search.clear();
        self.update_filters(update)
    }

    /// Wait for typed text to settle and apply it.
    ///
    /// Returns whether the filters changed.
    pub async fn next_search(&mut self) -> bool {
        let current = self.filters().search;
        match self.search.next_update(&current).await {
            Some(update) => {
                self.update_filters(update);
                true
            }
            None => false,
        }
    }

    /// Fetch state of the policy list.
    pub fn state(&self) -> AsyncDataState<PolicyPage> {
        self.policies.state()
    }

    /// Wait for the current fetch to finish.
    pub async fn settled(&self) -> AsyncDataState<PolicyPage> {
        self.policies.settled().await
    }

    /// Fetch the current page again.
    pub fn refetch(&self) {
        self.policies.refetch();
    }

    /// Policies on the current page; empty until the first load.
    pub fn policies(&self) -> Vec<Policy> {
        self.state().data.map(|page| page.items).unwrap_or_default()
    }

    pub fn pagination(&self) -> Option<Pagination> {
        self.state().data.map(|page| page.pagination)
    }

    /// Page numbers to offer around the current page.
    pub fn page_numbers(&self) -> Vec<u32> {
        self.pagination()
            .map(|p| p.page_numbers(self.session.config().ui.max_visible_pages))
            .unwrap_or_default()
    }

    /// Notice to show instead of (or above) the results.
    pub fn notice(&self) -> Option<CatalogNotice> {
        let state = self.state();
        if let Some(error) = &state.error {
            return Some(CatalogNotice::Error {
                title: messages::ERROR_LOADING_POLICIES,
                message: error.user_message().to_string(),
            });
        }
        match &state.data {
            Some(page) if page.items.is_empty() && !state.loading => Some(CatalogNotice::Empty {
                title: messages::NO_POLICIES_FOUND,
                hint: messages::NO_POLICIES_FOUND_DESCRIPTION,
            }),
            _ => None,
        }
    }

    /// Filter sidebar, once app data has been loaded.
    pub fn filter_panel(&self) -> Option<FilterPanel> {
        let app_data = self.session.app_data()?;
        Some(FilterPanel::new(app_data, &self.filters(), &self.session.config().ui))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::HubConfig;
    use crate::location::MemoryLocation;
    use hub_data::MemoryPolicyApi;
    use std::sync::Arc;

    fn session(count: usize) -> (HubSession, MemoryPolicyApi) {
        let mut api = MemoryPolicyApi::new();
        for i in 0..count {
            let provider = if i % 2 == 0 { "WSO2" } else { "Acme" };
            let category = if i % 3 == 0 { "auth" } else { "traffic" };
            let policy: Policy = serde_json::from_value(serde_json::json!({
                "name": format!("policy-{:02}", i),
                "version": "1.0.0",
                "displayName": format!("Policy {}", i),
                "provider": provider,
                "categories": [category],
                "isLatest": true,
            }))
            .unwrap();
            api = api.with_policy(policy);
        }
        (HubSession::new(Arc::new(api.clone()), HubConfig::default()), api)
    }

    #[tokio::test]
    async fn test_huge_page_from_location() {
        let (session, _) = session(45);
        let view = CatalogView::new(
            &session,
            MemoryLocation::new("/policies?page=4294967295&pageSize=5"),
        );

        let state = view.settled().await;
        assert!(state.error.is_none());
        assert!(view.policies().is_empty());
        assert_eq!(view.filters().page, u32::MAX);
        assert_eq!(view.page_numbers(), vec![5, 6, 7, 8, 9]);
    }

    #[tokio::test]
    async fn test_mount_reads_location() {
        let (session, _) = session(45);
        let view = CatalogView::new(&session, MemoryLocation::new("/policies?page=2"));

        let state = view.settled().await;
        assert!(state.error.is_none());
        assert_eq!(view.policies().len(), 20);
        assert_eq!(view.pagination(), Some(Pagination::new(2, 20, 45)));
        assert_eq!(view.page_numbers(), vec![1, 2, 3]);
    }

    #[tokio::test]
    async fn test_page_size_change_resets_page() {
        let (session, _) = session(45);
        let location = MemoryLocation::new("/policies?page=3");
        let mut view = CatalogView::new(&session, location.clone());
        view.settled().await;

        let filters = view.on_page_size_change(10);
        assert_eq!(filters.page, 1);
        assert_eq!(location.query(), "pageSize=10");

        view.settled().await;
        assert_eq!(view.pagination().map(|p| p.total_pages), Some(5));
    }

    #[tokio::test]
    async fn test_toggle_filter_refetches() {
        let (session, _) = session(12);
        let location = MemoryLocation::new("/policies?page=2&pageSize=5");
        let mut view = CatalogView::new(&session, location.clone());
        view.settled().await;

        view.toggle_filter(FilterKind::Categories, "auth", true);
        assert_eq!(location.query(), "categories=auth&pageSize=5");

        view.settled().await;
        assert_eq!(view.policies().len(), 4);
        assert!(view
            .policies()
            .iter()
            .all(|p| p.categories.contains(&"auth".to_string())));
    }

    #[tokio::test]
    async fn test_empty_and_error_notices() {
        let (session, api) = session(3);
        let mut view = CatalogView::new(&session, MemoryLocation::new("/policies"));
        view.settled().await;
        assert_eq!(view.notice(), None);

        view.on_search_change("does-not-exist");
        view.settled().await;
        assert!(matches!(view.notice(), Some(CatalogNotice::Empty { .. })));

        api.set_offline(true);
        view.on_search_change("policy");
        view.settled().await;
        assert_eq!(
            view.notice(),
            Some(CatalogNotice::Error {
                title: messages::ERROR_LOADING_POLICIES,
                message: messages::ERROR_NETWORK.to_string(),
            })
        );
        assert!(view.policies().is_empty());
    }

    #[tokio::test]
    async fn test_filter_panel_after_app_data() {
        let (session, _) = session(6);
        let view = CatalogView::new(&session, MemoryLocation::new("/policies?providers=Acme"));
        assert!(view.filter_panel().is_none());

        session.ensure_loaded().await.unwrap();
        let panel = view.filter_panel().unwrap();
        assert_eq!(panel.active_count(), 1);
        assert!(panel.section(FilterKind::Providers).unwrap().is_checked("Acme"));
    }
}
