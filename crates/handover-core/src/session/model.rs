//! Selection session domain model.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::item::Item;

/// The mutable state scoped to one open dialog instance.
///
/// A session is created when a dialog opens, seeded synchronously from the
/// caller-supplied list and locked ids, mutated by user interaction and by
/// remote search results while the dialog stays open, and discarded on close.
/// Nothing here persists across dialog opens.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectionSession {
    /// Session identifier (UUID format), diagnostics only
    pub id: String,
    /// Timestamp when the dialog was opened (ISO 8601 format)
    pub opened_at: String,
    /// Canonical full list, kept in default display order
    pub data_source: Vec<Item>,
    /// Entries locked into the selection by the caller; may contain
    /// synthesized placeholders for ids the data source does not know
    pub disabled_items: Vec<Item>,
    /// Entries the user has actively chosen, disjoint from `disabled_items`
    pub selected_items: Vec<Item>,
    /// Current free-text filter; empty means "show the full data source"
    pub search_text: String,
    /// Current search overlay, empty whenever `search_text` is empty
    pub search_results: Vec<Item>,
    /// Ticket for stale-response protection; bumped on every issued search
    pub search_generation: u64,
    /// True while a remote search or the initial fetch is outstanding
    pub loading: bool,
    /// Open key-value bag for caller-specific flags, never interpreted here
    #[serde(default)]
    pub payload: Map<String, Value>,
}

impl SelectionSession {
    /// Creates an empty session for a freshly opened dialog.
    pub fn new() -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            opened_at: chrono::Utc::now().to_rfc3339(),
            data_source: Vec::new(),
            disabled_items: Vec::new(),
            selected_items: Vec::new(),
            search_text: String::new(),
            search_results: Vec::new(),
            search_generation: 0,
            loading: false,
            payload: Map::new(),
        }
    }

    /// True when `id` is locked into the selection by the caller.
    pub fn is_disabled(&self, id: &str) -> bool {
        self.disabled_items.iter().any(|item| item.id == id)
    }

    /// True when the user has actively selected `id`.
    pub fn is_selected(&self, id: &str) -> bool {
        self.selected_items.iter().any(|item| item.id == id)
    }

    /// True when `id` should render as checked: selected, locked, or the
    /// current actor (who is always implicitly selected).
    pub fn is_checked(&self, id: &str) -> bool {
        self.is_disabled(id)
            || self.is_selected(id)
            || self
                .data_source
                .iter()
                .any(|item| item.id == id && item.is_me)
    }

    /// Ids of the actively selected entries, in selection order.
    pub fn selected_ids(&self) -> Vec<String> {
        self.selected_items
            .iter()
            .map(|item| item.id.clone())
            .collect()
    }
}

impl Default for SelectionSession {
    fn default() -> Self {
        Self::new()
    }
}

/// A batch of field updates committed to the session atomically.
///
/// All fields are optional; absent fields are left untouched. The payload is
/// shallow-merged rather than replaced, so callers can patch a single flag
/// without re-stating the rest of the bag.
#[derive(Debug, Clone, Default)]
pub struct SessionPatch {
    pub data_source: Option<Vec<Item>>,
    pub disabled_items: Option<Vec<Item>>,
    pub selected_items: Option<Vec<Item>>,
    pub search_text: Option<String>,
    pub search_results: Option<Vec<Item>>,
    pub loading: Option<bool>,
    pub payload: Option<Map<String, Value>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_session_is_empty() {
        let session = SelectionSession::new();
        assert!(session.data_source.is_empty());
        assert!(session.disabled_items.is_empty());
        assert!(session.selected_items.is_empty());
        assert!(session.search_text.is_empty());
        assert!(!session.loading);
        assert_eq!(session.search_generation, 0);
    }

    #[test]
    fn test_is_checked_covers_me_entries() {
        let mut session = SelectionSession::new();
        let mut me = Item::placeholder("me");
        me.is_me = true;
        session.data_source.push(me);
        assert!(session.is_checked("me"));
        assert!(!session.is_selected("me"));
        assert!(!session.is_checked("someone-else"));
    }
}
