//! API response envelopes and pagination.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Pagination info as returned by the catalog API.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    /// Current page (1-indexed).
    pub page: u32,
    /// Items per page.
    pub page_size: u32,
    /// Total number of items.
    pub total_items: u32,
    /// Total number of pages.
    pub total_pages: u32,
}

impl Pagination {
    /// Create pagination info.
    pub fn new(page: u32, page_size: u32, total_items: u32) -> Self {
        Self {
            page,
            page_size,
            total_items,
            total_pages: total_pages(total_items, page_size),
        }
    }

    /// Whether there's a next page.
    pub fn has_next(&self) -> bool {
        self.page < self.total_pages
    }

    /// Whether there's a previous page.
    pub fn has_prev(&self) -> bool {
        self.page > 1
    }

    /// Get page numbers for display (e.g., [3, 4, 5, 6, 7]).
    ///
    /// A `page` past the last page yields the last window.
    pub fn page_numbers(&self, max_visible: u32) -> Vec<u32> {
        if self.total_pages <= max_visible {
            return (1..=self.total_pages).collect();
        }
        if max_visible == 0 {
            return Vec::new();
        }

        let half = max_visible / 2;
        let start = self.page.saturating_sub(half).max(1);
        let end = start.saturating_add(max_visible - 1).min(self.total_pages);
        let start = end.saturating_add(1).saturating_sub(max_visible).max(1);

        (start..=end).collect()
    }

    /// Get start item number (1-indexed).
    pub fn start_item(&self) -> u32 {
        if self.total_items == 0 {
            0
        } else {
            self.page
                .saturating_sub(1)
                .saturating_mul(self.page_size)
                .saturating_add(1)
                .min(self.total_items)
        }
    }

    /// Get end item number.
    pub fn end_item(&self) -> u32 {
        self.page.saturating_mul(self.page_size).min(self.total_items)
    }
}

/// Number of pages needed for `total_items`; zero when `page_size` is zero.
pub fn total_pages(total_items: u32, page_size: u32) -> u32 {
    if page_size == 0 {
        return 0;
    }
    total_items.div_ceil(page_size)
}

/// Error body of a failed API response.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ApiErrorBody {
    pub code: String,
    pub message: String,
}

/// Metadata attached to every API response.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ResponseMeta {
    #[serde(default)]
    pub trace_id: Option<String>,
    #[serde(default)]
    pub request_id: Option<String>,
    #[serde(default)]
    pub timestamp: Option<DateTime<Utc>>,
    /// Present on list endpoints.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pagination: Option<Pagination>,
}

/// The `{ success, data, error, meta }` envelope used by every endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(default = "Option::default")]
    pub data: Option<T>,
    #[serde(default)]
    pub error: Option<ApiErrorBody>,
    #[serde(default)]
    pub meta: ResponseMeta,
}

impl<T> ApiResponse<T> {
    /// Wrap data in a successful envelope.
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
            meta: ResponseMeta::default(),
        }
    }

    /// Attach pagination metadata.
    pub fn with_pagination(mut self, pagination: Pagination) -> Self {
        self.meta.pagination = Some(pagination);
        self
    }

    /// Data of a successful response.
    pub fn data(&self) -> Option<&T> {
        if self.success {
            self.data.as_ref()
        } else {
            None
        }
    }

    /// Consume the envelope, keeping data only if the call succeeded.
    pub fn into_data(self) -> Option<T> {
        if self.success {
            self.data
        } else {
            None
        }
    }

    /// Pagination metadata, if any.
    pub fn pagination(&self) -> Option<&Pagination> {
        self.meta.pagination.as_ref()
    }
}

impl<T> ApiResponse<Vec<T>> {
    /// Items of a successful list response; empty otherwise.
    pub fn items(&self) -> &[T] {
        self.data().map(Vec::as_slice).unwrap_or(&[])
    }
}
