//! Filter state kept in the location's query string.

use hub_catalog::search::{merge_query_string, FilterState, FilterUpdate};

use crate::location::Location;

/// Reads and writes [`FilterState`] through a [`Location`].
///
/// The location is the single source of truth: every read parses the
/// current query string and every change is pushed back, keeping keys that
/// do not belong to the filter state.
#[derive(Debug, Clone)]
pub struct QueryParams<L> {
    location: L,
}

impl<L: Location> QueryParams<L> {
    pub fn new(location: L) -> Self {
        Self { location }
    }

    /// The underlying location.
    pub fn location(&self) -> &L {
        &self.location
    }

    /// Current filter state.
    pub fn filters(&self) -> FilterState {
        FilterState::from_query_string(&self.location.query())
    }

    /// Merge `update` into the current state and write it back.
    ///
    /// Returns the state as read back from the location.
    pub fn update_filters(&self, update: FilterUpdate) -> FilterState {
        let mut filters = self.filters();
        filters.apply(update);
        self.write(&filters);
        self.filters()
    }

    /// Restore the default state, removing every filter key.
    pub fn reset_filters(&self) -> FilterState {
        let filters = FilterState::default();
        self.write(&filters);
        filters
    }

    fn write(&self, filters: &FilterState) {
        let current = self.location.query();
        let next = merge_query_string(&current, filters);
        if next != current {
            self.location.push_query(&next);
        }
    }
}
