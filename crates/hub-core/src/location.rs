//! Navigable location.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// A navigable location: a path plus a query string, with history.
pub trait Location: Send + Sync {
    /// Current path, e.g. `/policies`.
    fn path(&self) -> String;

    /// Current query string without the leading `?`.
    fn query(&self) -> String;

    /// Push a new entry onto the history without reloading.
    fn push(&self, path: &str, query: &str);

    /// Replace the query string of the current path.
    fn push_query(&self, query: &str) {
        let path = self.path();
        self.push(&path, query);
    }

    /// Navigate to another path with an empty query string.
    fn navigate(&self, path: &str) {
        self.push(path, "");
    }
}

/// One history entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    pub path: String,
    pub query: String,
}

impl Entry {
    /// Parse `path?query`.
    pub fn parse(url: &str) -> Self {
        match url.split_once('?') {
            Some((path, query)) => Self {
                path: path.to_string(),
                query: query.to_string(),
            },
            None => Self {
                path: url.to_string(),
                query: String::new(),
            },
        }
    }

    /// Render as `path?query`, omitting an empty query.
    pub fn href(&self) -> String {
        if self.query.is_empty() {
            self.path.clone()
        } else {
            format!("{}?{}", self.path, self.query)
        }
    }
}

/// In-memory location with a back stack. Clones share history.
#[derive(Debug, Clone)]
pub struct MemoryLocation {
    history: Arc<Mutex<Vec<Entry>>>,
}

impl MemoryLocation {
    /// Start at `url` (`path` or `path?query`).
    pub fn new(url: &str) -> Self {
        Self {
            history: Arc::new(Mutex::new(vec![Entry::parse(url)])),
        }
    }

    fn history(&self) -> MutexGuard<'_, Vec<Entry>> {
        self.history.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Current entry.
    pub fn current(&self) -> Entry {
        self.history()
            .last()
            .cloned()
            .unwrap_or_else(|| Entry::parse("/"))
    }

    /// Current `path?query`.
    pub fn href(&self) -> String {
        self.current().href()
    }

    /// Number of history entries.
    pub fn len(&self) -> usize {
        self.history().len()
    }

    /// Whether history is empty. Never true for a constructed location.
    pub fn is_empty(&self) -> bool {
        self.history().is_empty()
    }

    /// Go back one entry. Returns false at the first entry.
    pub fn back(&self) -> bool {
        let mut history = self.history();
        if history.len() > 1 {
            history.pop();
            true
        } else {
            false
        }
    }
}

impl Default for MemoryLocation {
    fn default() -> Self {
        Self::new("/")
    }
}

impl Location for MemoryLocation {
    fn path(&self) -> String {
        self.current().path
    }

    fn query(&self) -> String {
        self.current().query
    }

    fn push(&self, path: &str, query: &str) {
        let query = query.strip_prefix('?').unwrap_or(query);
        tracing::trace!(path, query, "location push");
        self.history().push(Entry {
            path: path.to_string(),
            query: query.to_string(),
        });
    }
}
