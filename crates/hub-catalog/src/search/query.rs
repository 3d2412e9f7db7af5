//! Query-string codec for [`FilterState`].
//!
//! Location encoding: `application/x-www-form-urlencoded`, one pair per facet
//! value (`categories=auth&categories=security`), default-valued fields
//! omitted. [`FilterState::from_query_string`] is the exact inverse of
//! [`FilterState::to_query_string`].
//!
//! API encoding: facets are comma-joined into a single pair, because the
//! catalog API reads the first value of each key and splits it on commas.

use url::form_urlencoded;

use crate::constants::{DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE, MIN_PAGE_SIZE};
use crate::search::{FilterKind, FilterState};

/// Query parameter names.
pub mod keys {
    pub const SEARCH: &str = "search";
    pub const CATEGORIES: &str = "categories";
    pub const PROVIDERS: &str = "providers";
    pub const PLATFORMS: &str = "platforms";
    pub const PAGE: &str = "page";
    pub const PAGE_SIZE: &str = "pageSize";

    /// Every key owned by the filter state.
    pub const ALL: [&str; 6] = [SEARCH, CATEGORIES, PROVIDERS, PLATFORMS, PAGE, PAGE_SIZE];
}

impl FilterState {
    /// Parse filter state from a location query string.
    ///
    /// Never fails: missing keys take their defaults, malformed or
    /// out-of-range numbers fall back to defaults, empty values are skipped
    /// and unknown keys are ignored.
    ///
    /// A `pageSize` outside `MIN_PAGE_SIZE..=MAX_PAGE_SIZE` falls back to
    /// `DEFAULT_PAGE_SIZE`, as the catalog API does, whereas
    /// [`FilterState::apply`] clamps an explicit page size into range.
    pub fn from_query_string(qs: &str) -> Self {
        let qs = qs.strip_prefix('?').unwrap_or(qs);
        let mut state = FilterState::default();

        for (key, value) in form_urlencoded::parse(qs.as_bytes()) {
            match key.as_ref() {
                keys::SEARCH => state.search = value.into_owned(),
                keys::CATEGORIES | keys::PROVIDERS | keys::PLATFORMS => {
                    if value.is_empty() {
                        continue;
                    }
                    let values = match key.as_ref() {
                        keys::CATEGORIES => &mut state.categories,
                        keys::PROVIDERS => &mut state.providers,
                        _ => &mut state.platforms,
                    };
                    values.insert(value.into_owned());
                }
                keys::PAGE => {
                    state.page = parse_bounded(&value, 1, u32::MAX).unwrap_or_else(|| {
                        tracing::debug!(value = %value, "ignoring malformed page parameter");
                        1
                    });
                }
                keys::PAGE_SIZE => {
                    state.page_size = parse_bounded(&value, MIN_PAGE_SIZE, MAX_PAGE_SIZE)
                        .unwrap_or_else(|| {
                            tracing::debug!(value = %value, "ignoring malformed pageSize parameter");
                            DEFAULT_PAGE_SIZE
                        });
                }
                _ => {}
            }
        }

        state
    }

    /// Serialize filter state for the location, omitting defaults.
    pub fn to_query_string(&self) -> String {
        let mut serializer = form_urlencoded::Serializer::new(String::new());
        self.append_location_pairs(&mut serializer);
        serializer.finish()
    }

    /// Parameters for the catalog list endpoint.
    ///
    /// Page and page size are always sent; empty search and facets are not.
    pub fn to_request_params(&self) -> Vec<(String, String)> {
        let mut params = Vec::new();
        if !self.search.is_empty() {
            params.push((keys::SEARCH.to_string(), self.search.clone()));
        }
        for kind in FilterKind::ALL {
            let values = self.values(kind);
            if !values.is_empty() {
                let joined = values.iter().map(String::as_str).collect::<Vec<_>>().join(",");
                params.push((kind.param().to_string(), joined));
            }
        }
        params.push((keys::PAGE.to_string(), self.page.to_string()));
        params.push((keys::PAGE_SIZE.to_string(), self.page_size.to_string()));
        params
    }

    fn append_location_pairs(&self, serializer: &mut form_urlencoded::Serializer<'_, String>) {
        if !self.search.is_empty() {
            serializer.append_pair(keys::SEARCH, &self.search);
        }
        for kind in FilterKind::ALL {
            for value in self.values(kind) {
                serializer.append_pair(kind.param(), value);
            }
        }
        if self.page != 1 {
            serializer.append_pair(keys::PAGE, &self.page.to_string());
        }
        if self.page_size != DEFAULT_PAGE_SIZE {
            serializer.append_pair(keys::PAGE_SIZE, &self.page_size.to_string());
        }
    }
}

/// Rewrite the filter keys of an existing query string.
///
/// Pairs whose key is not a filter key keep their relative order and come
/// first; the filter pairs for `state` follow.
pub fn merge_query_string(existing: &str, state: &FilterState) -> String {
    let existing = existing.strip_prefix('?').unwrap_or(existing);
    let mut serializer = form_urlencoded::Serializer::new(String::new());

    for (key, value) in form_urlencoded::parse(existing.as_bytes()) {
        if !keys::ALL.contains(&key.as_ref()) {
            serializer.append_pair(&key, &value);
        }
    }
    state.append_location_pairs(&mut serializer);

    serializer.finish()
}

fn parse_bounded(raw: &str, min: u32, max: u32) -> Option<u32> {
    raw.trim()
        .parse::<u32>()
        .ok()
        .filter(|v| (min..=max).contains(v))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::FilterUpdate;

    #[test]
    fn test_round_trip_after_update() {
        let state = FilterState::default()
            .with_update(FilterUpdate::new().categories(["auth", "security"]).search("rate"));

        let qs = state.to_query_string();
        let parsed = FilterState::from_query_string(&qs);

        assert_eq!(parsed, state);
        assert_eq!(parsed.page, 1);
        assert_eq!(parsed.page_size, DEFAULT_PAGE_SIZE);
        assert!(parsed.providers.is_empty());
    }

    #[test]
    fn test_round_trip_awkward_values() {
        let state = FilterState::default().with_update(
            FilterUpdate::new()
                .search("rate & limit = 100%")
                .providers(["Acme, Inc.", "ünïcode"])
                .platforms(["a+b"])
                .page(4)
                .page_size(50),
        );

        let parsed = FilterState::from_query_string(&state.to_query_string());
        assert_eq!(parsed, state);
    }

    #[test]
    fn test_defaults_are_omitted() {
        assert_eq!(FilterState::default().to_query_string(), "");

        let state = FilterState::default().with_update(FilterUpdate::new().page(2));
        assert_eq!(state.to_query_string(), "page=2");
    }

    #[test]
    fn test_repeated_keys_encoding() {
        let state = FilterState::default()
            .with_update(FilterUpdate::new().categories(["security", "auth"]));
        assert_eq!(
            state.to_query_string(),
            "categories=auth&categories=security"
        );
    }

    #[test]
    fn test_parse_tolerates_malformed_input() {
        let state = FilterState::from_query_string("?page=abc&pageSize=-4&categories=&search=ok");
        assert_eq!(state.page, 1);
        assert_eq!(state.page_size, DEFAULT_PAGE_SIZE);
        assert!(state.categories.is_empty());
        assert_eq!(state.search, "ok");
    }

    #[test]
    fn test_parse_out_of_range_page_size() {
        assert_eq!(FilterState::from_query_string("pageSize=0").page_size, DEFAULT_PAGE_SIZE);
        assert_eq!(FilterState::from_query_string("pageSize=101").page_size, DEFAULT_PAGE_SIZE);
        assert_eq!(FilterState::from_query_string("pageSize=100").page_size, 100);
        assert_eq!(FilterState::from_query_string("page=0").page, 1);
    }

    #[test]
    fn test_oversized_page_size_location_vs_update() {
        let parsed = FilterState::from_query_string("pageSize=1000");
        assert_eq!(parsed.page_size, DEFAULT_PAGE_SIZE);

        let updated = FilterState::default().with_update(FilterUpdate::new().page_size(1000));
        assert_eq!(updated.page_size, MAX_PAGE_SIZE);
        assert_eq!(FilterState::from_query_string(&updated.to_query_string()), updated);
    }

    #[test]
    fn test_parse_keeps_unknown_facet_values() {
        let state = FilterState::from_query_string("platforms=not-a-real-platform&tab=faq");
        assert!(state.platforms.contains("not-a-real-platform"));
    }

    #[test]
    fn test_request_params_comma_join() {
        let state = FilterState::default().with_update(
            FilterUpdate::new().categories(["auth", "security"]).search("jwt"),
        );
        let params = state.to_request_params();
        assert_eq!(
            params,
            vec![
                ("search".to_string(), "jwt".to_string()),
                ("categories".to_string(), "auth,security".to_string()),
                ("page".to_string(), "1".to_string()),
                ("pageSize".to_string(), "20".to_string()),
            ]
        );
    }

    #[test]
    fn test_merge_preserves_foreign_keys() {
        let state = FilterState::default().with_update(FilterUpdate::new().search("cors"));
        let merged = merge_query_string("?tab=faq&search=old&page=9", &state);
        assert_eq!(merged, "tab=faq&search=cors");
    }

    #[test]
    fn test_merge_with_defaults_strips_filter_keys() {
        let merged = merge_query_string("categories=auth&ref=home&pageSize=50", &FilterState::default());
        assert_eq!(merged, "ref=home");
    }
}
