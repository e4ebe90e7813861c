//! Session history stack
//!
//! Mirrors the browser's joint session history for one tab: pushing an entry
//! drops everything forward of the current index, traversal yields a
//! [`PopState`] carrying whatever state object was stored with the entry.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use url::Url;

/// State object stored with every entry pushed by soft navigation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryState {
    /// Absolute URL used to replay the navigation on back/forward
    pub url: String,
}

impl HistoryState {
    pub fn new(url: &Url) -> Self {
        Self {
            url: url.to_string(),
        }
    }

    pub fn to_value(&self) -> serde_json::Value {
        serde_json::json!({ "url": self.url })
    }

    /// Read a state object written by anyone. Only a non-empty `url` string counts.
    pub fn from_value(value: &serde_json::Value) -> Option<Self> {
        let state: Self = serde_json::from_value(value.clone()).ok()?;
        if state.url.is_empty() {
            return None;
        }
        Some(state)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub url: Url,
    pub state: Option<serde_json::Value>,
    pub visited_at: DateTime<Utc>,
}

/// Event delivered after a traversal, like `popstate`
#[derive(Debug, Clone, PartialEq)]
pub struct PopState {
    /// Location after the traversal
    pub url: Url,
    pub state: Option<serde_json::Value>,
}

impl PopState {
    pub fn history_state(&self) -> Option<HistoryState> {
        self.state.as_ref().and_then(HistoryState::from_value)
    }
}

#[derive(Debug, Clone)]
pub struct SessionHistory {
    entries: Vec<HistoryEntry>,
    index: usize,
}

impl SessionHistory {
    pub fn new(initial: Url) -> Self {
        Self {
            entries: vec![HistoryEntry {
                url: initial,
                state: None,
                visited_at: Utc::now(),
            }],
            index: 0,
        }
    }

    pub fn push(&mut self, url: Url, state: Option<serde_json::Value>) {
        self.entries.truncate(self.index + 1);
        self.entries.push(HistoryEntry {
            url,
            state,
            visited_at: Utc::now(),
        });
        self.index = self.entries.len() - 1;

        tracing::trace!(index = self.index, len = self.entries.len(), "History push");
    }

    pub fn back(&mut self) -> Option<PopState> {
        if self.index == 0 {
            return None;
        }
        self.index -= 1;
        Some(self.pop_state())
    }

    pub fn forward(&mut self) -> Option<PopState> {
        if self.index + 1 >= self.entries.len() {
            return None;
        }
        self.index += 1;
        Some(self.pop_state())
    }

    pub fn current(&self) -> &HistoryEntry {
        &self.entries[self.index]
    }

    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn pop_state(&self) -> PopState {
        let entry = self.current();
        PopState {
            url: entry.url.clone(),
            state: entry.state.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn url(path: &str) -> Url {
        Url::parse("https://site.test/").unwrap().join(path).unwrap()
    }

    #[test]
    fn test_push_truncates_forward_entries() {
        let mut history = SessionHistory::new(url("/index.html"));
        history.push(url("/a.html"), None);
        history.push(url("/b.html"), None);

        history.back().unwrap();
        history.push(url("/c.html"), None);

        assert_eq!(history.len(), 3);
        assert_eq!(history.current().url, url("/c.html"));
        assert!(history.forward().is_none());
    }

    #[test]
    fn test_traversal_carries_state() {
        let mut history = SessionHistory::new(url("/index.html"));
        let state = HistoryState::new(&url("/a.html"));
        history.push(url("/a.html"), Some(state.to_value()));

        let pop = history.back().unwrap();
        assert_eq!(pop.url, url("/index.html"));
        assert!(pop.history_state().is_none());
        assert!(history.back().is_none());

        let pop = history.forward().unwrap();
        assert_eq!(pop.history_state(), Some(state));
    }

    #[test]
    fn test_foreign_state_is_ignored() {
        assert!(HistoryState::from_value(&serde_json::json!({ "scroll": 12 })).is_none());
        assert!(HistoryState::from_value(&serde_json::json!({ "url": "" })).is_none());
        assert!(HistoryState::from_value(&serde_json::json!(null)).is_none());
    }
}
