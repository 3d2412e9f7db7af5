//! Debounced search input.

use std::time::Duration;

use tokio::sync::watch;

use hub_catalog::search::FilterUpdate;
use hub_reactive::Debounced;

/// Local text of the search field, pushed to the filters once typing pauses.
#[derive(Debug)]
pub struct SearchBox {
    text: Debounced<String>,
    pending: watch::Receiver<bool>,
}

impl SearchBox {
    /// Must be called within a tokio runtime.
    pub fn new(initial: &str, delay: Duration) -> Self {
        let text = Debounced::new(initial.to_string(), delay);
        let pending = text.subscribe_pending();
        Self { text, pending }
    }

    /// Text as typed.
    pub fn text(&self) -> String {
        self.text.input()
    }

    /// The user typed.
    pub fn input(&self, text: impl Into<String>) {
        self.text.set(text.into());
    }

    /// The search filter changed elsewhere; show it.
    pub fn sync(&self, external: &str) {
        if self.text.input() != external {
            self.text.set(external.to_string());
        }
    }

    /// Empty the field. The returned update applies immediately.
    pub fn clear(&self) -> FilterUpdate {
        self.text.set(String::new());
        FilterUpdate::new().search("").page(1)
    }

    /// Wait until typing settles; `Some` only when the settled text differs
    /// from the search the filters already hold.
    pub async fn next_update(&mut self, external: &str) -> Option<FilterUpdate> {
        loop {
            self.pending.changed().await.ok()?;
            if !*self.pending.borrow_and_update() {
                break;
            }
        }
        let settled = self.text.value();
        (settled != external).then(|| FilterUpdate::new().search(settled).page(1))
    }

    /// Whether typed text has not settled yet.
    pub fn is_pending(&self) -> bool {
        self.text.is_pending()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::time::sleep;

    #[tokio::test(start_paused = true)]
    async fn test_settled_text_becomes_update() {
        let mut search = SearchBox::new("", Duration::from_millis(300));
        search.input("r");
        search.input("ra");
        search.input("rate");
        assert!(search.is_pending());

        let update = search.next_update("").await.unwrap();
        assert_eq!(update.search.as_deref(), Some("rate"));
        assert_eq!(update.page, Some(1));
    }

    #[tokio::test(start_paused = true)]
    async fn test_settled_text_equal_to_filter_is_ignored() {
        let mut search = SearchBox::new("jwt", Duration::from_millis(300));
        search.input("jw");
        sleep(Duration::from_millis(100)).await;
        search.input("jwt");

        assert!(search.next_update("jwt").await.is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_typing_back_to_filter_settles() {
        let mut search = SearchBox::new("jwt", Duration::from_millis(300));
        search.input("jwtx");
        search.input("jwt");

        assert!(search.next_update("jwt").await.is_none());
        assert!(!search.is_pending());
    }

    #[tokio::test(start_paused = true)]
    async fn test_clear_is_immediate() {
        let search = SearchBox::new("cors", Duration::from_millis(300));
        let update = search.clear();
        assert_eq!(update.search.as_deref(), Some(""));
        assert_eq!(search.text(), "");
    }
}
