//! Documentation tabs of one policy version.

use hub_cache::cache_key;
use hub_catalog::constants::messages;
use hub_catalog::docs::{DocPage, DocTab, DocsIndex, DocsPage};
use hub_reactive::{AsyncData, AsyncDataState, FetchOptions};

use crate::session::HubSession;

/// What the active tab shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DocPanel {
    Loading,
    Error { title: &'static str, message: String },
    NotAvailable { title: &'static str, message: String },
    Content(DocsPage),
}

/// Documentation tabs: all pages are fetched once per policy version.
pub struct DocsView {
    docs: AsyncData<Vec<DocsPage>, (String, String)>,
    active: DocPage,
}

impl DocsView {
    /// Must be called within a tokio runtime.
    pub fn new(session: &HubSession, name: &str, version: &str) -> Self {
        let api = session.api();
        let docs = AsyncData::new(
            move |(name, version): (String, String)| {
                let api = api.clone();
                async move { api.get_all_docs(&name, &version).await }
            },
            (name.to_string(), version.to_string()),
            FetchOptions::immediate()
                .with_cache_key_fn(|(name, version): &(String, String)| {
                    cache_key!("docs", name, version)
                }),
            session.fetch_cache().clone(),
        );

        Self {
            docs,
            active: DocPage::default(),
        }
    }

    /// Open the view on `page` instead of the overview.
    pub fn with_initial_page(mut self, page: DocPage) -> Self {
        self.active = page;
        self
    }

    /// Switch to another policy version.
    pub fn set_version(&mut self, name: &str, version: &str) -> bool {
        self.docs.set_deps((name.to_string(), version.to_string()))
    }

    pub fn state(&self) -> AsyncDataState<Vec<DocsPage>> {
        self.docs.state()
    }

    pub async fn settled(&self) -> AsyncDataState<Vec<DocsPage>> {
        self.docs.settled().await
    }

    /// Loaded pages by name.
    pub fn index(&self) -> DocsIndex {
        DocsIndex::from_pages(self.state().data.unwrap_or_default())
    }

    /// Tabs in display order. Nothing is disabled before the first load.
    pub fn tabs(&self) -> Vec<DocTab> {
        let state = self.state();
        match state.data {
            Some(pages) => DocsIndex::from_pages(pages).tabs(state.loading),
            None => DocsIndex::default().tabs(true),
        }
    }

    pub fn active(&self) -> DocPage {
        self.active
    }

    /// Activate a tab. Disabled tabs cannot be selected.
    pub fn select(&mut self, page: DocPage) -> bool {
        let enabled = self.tabs().iter().any(|tab| tab.page == page && !tab.disabled);
        if enabled {
            self.active = page;
        }
        enabled
    }

    /// Content of the active tab.
    pub fn panel(&self) -> DocPanel {
        let state = self.state();
        if state.loading {
            return DocPanel::Loading;
        }
        if let Some(error) = &state.error {
            return DocPanel::Error {
                title: messages::ERROR_LOADING_DOCS,
                message: error.user_message().to_string(),
            };
        }

        let index = DocsIndex::from_pages(state.data.unwrap_or_default());
        match index.get(self.active) {
            Some(doc) => DocPanel::Content(doc.clone()),
            None => DocPanel::NotAvailable {
                title: messages::DOCS_NOT_AVAILABLE,
                message: format!(
                    "The {} documentation is not available for this version.",
                    self.active.label().to_lowercase()
                ),
            },
        }
    }
}
