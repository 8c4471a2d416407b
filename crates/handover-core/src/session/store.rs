//! Batched, close-tolerant store around a `SelectionSession`.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Weak};

use serde_json::{Map, Value};
use tokio::sync::RwLock;

use crate::item::Item;
use crate::search::sort_items;
use crate::session::model::{SelectionSession, SessionPatch};
use crate::session::reconcile;

/// Handle to the state of one open dialog.
///
/// All writes triggered by a single user action go through one method and
/// commit under one write lock, so an observer reading a snapshot never sees
/// a partial update. Handles are cheap to clone; every clone points at the
/// same session.
///
/// After [`close`](SessionStore::close), every mutation becomes a silent
/// no-op: late async completions (a remote search resolving after the dialog
/// was dismissed) must not crash or mutate a torn-down session.
#[derive(Clone)]
pub struct SessionStore {
    inner: Arc<RwLock<SelectionSession>>,
    closed: Arc<AtomicBool>,
}

impl SessionStore {
    /// Creates a store around a fresh, empty session.
    pub fn new() -> Self {
        Self {
            inner: Arc::new(RwLock::new(SelectionSession::new())),
            closed: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Seeds the session from caller-supplied data, as one batch.
    ///
    /// The list is sorted into default display order and the locked ids are
    /// reconciled against it (unknown ids become placeholders). Selection,
    /// search text, overlay and loading flag are reset wholesale - reopening
    /// with different inputs never merges with a previous open. The payload
    /// bag is left alone; callers set their flags around `open`.
    pub async fn seed(&self, mut list: Vec<Item>, disabled_ids: &[String]) {
        if self.is_closed() {
            tracing::debug!("seed ignored: session already closed");
            return;
        }
        sort_items(&mut list);
        let disabled = reconcile(&list, disabled_ids);

        let mut session = self.inner.write().await;
        session.data_source = list;
        session.disabled_items = disabled;
        session.selected_items.clear();
        session.search_text.clear();
        session.search_results.clear();
        session.loading = false;
    }

    /// Commits a patch; all present fields land in one batch.
    pub async fn apply(&self, patch: SessionPatch) {
        if self.is_closed() {
            tracing::debug!("patch ignored: session already closed");
            return;
        }
        let mut session = self.inner.write().await;
        if let Some(data_source) = patch.data_source {
            session.data_source = data_source;
        }
        if let Some(disabled_items) = patch.disabled_items {
            session.disabled_items = disabled_items;
        }
        if let Some(selected_items) = patch.selected_items {
            session.selected_items = selected_items;
        }
        if let Some(search_text) = patch.search_text {
            session.search_text = search_text;
        }
        if let Some(search_results) = patch.search_results {
            session.search_results = search_results;
        }
        if let Some(loading) = patch.loading {
            session.loading = loading;
        }
        if let Some(payload) = patch.payload {
            for (key, value) in payload {
                session.payload.insert(key, value);
            }
        }
    }

    /// Shallow-merges caller flags into the payload bag.
    pub async fn merge_payload(&self, payload: Map<String, Value>) {
        self.apply(SessionPatch {
            payload: Some(payload),
            ..Default::default()
        })
        .await;
    }

    /// Flips membership of `id` in the selected set.
    ///
    /// Locked ids and current-actor entries are not togglable; attempts are
    /// no-ops. Returns true when the selection actually changed.
    pub async fn toggle(&self, id: &str) -> bool {
        if self.is_closed() {
            tracing::debug!("toggle ignored: session already closed");
            return false;
        }
        let mut session = self.inner.write().await;

        if session.is_disabled(id) {
            return false;
        }
        if let Some(pos) = session.selected_items.iter().position(|item| item.id == id) {
            if session.selected_items[pos].is_me {
                return false;
            }
            session.selected_items.remove(pos);
            return true;
        }

        let candidate = session
            .data_source
            .iter()
            .find(|item| item.id == id)
            .or_else(|| session.search_results.iter().find(|item| item.id == id))
            .cloned();
        match candidate {
            Some(item) if item.is_me => false,
            Some(item) => {
                session.selected_items.push(item);
                true
            }
            None => {
                tracing::warn!(id, "toggle for an id unknown to this session");
                false
            }
        }
    }

    /// Records a new search keyword and hands back its ticket.
    ///
    /// The keyword, the bumped generation and - when a remote lookup will run
    /// - the loading flag all commit in one batch. An empty keyword clears
    /// the overlay instead and returns `None`; there is nothing to apply
    /// later. Returns `None` on a closed session as well.
    pub async fn begin_search(&self, keyword: &str, remote: bool) -> Option<u64> {
        if self.is_closed() {
            tracing::debug!("search ignored: session already closed");
            return None;
        }
        let mut session = self.inner.write().await;
        session.search_text = keyword.to_string();
        if keyword.is_empty() {
            session.search_results.clear();
            session.loading = false;
            return None;
        }
        session.search_generation += 1;
        session.loading = remote;
        Some(session.search_generation)
    }

    /// Applies search results if they are still fresh.
    ///
    /// A result is fresh when its ticket is still the current generation and
    /// its originating keyword still equals the session's search text. Stale
    /// results are dropped without touching the overlay or the loading flag -
    /// the newer in-flight request owns both. Returns true when applied.
    pub async fn apply_search_results(&self, ticket: u64, keyword: &str, items: Vec<Item>) -> bool {
        if self.is_closed() {
            tracing::debug!("search results ignored: session already closed");
            return false;
        }
        let mut session = self.inner.write().await;
        if session.search_generation != ticket || session.search_text != keyword {
            tracing::debug!(ticket, keyword, "dropping stale search results");
            return false;
        }
        session.search_results = items;
        session.loading = false;
        true
    }

    /// Returns a consistent copy of the current session state.
    pub async fn snapshot(&self) -> SelectionSession {
        self.inner.read().await.clone()
    }

    /// Hands out a weak consumer handle.
    ///
    /// Observers that can outlive their dialog (detached panels, late
    /// renders) hold one of these instead of the store itself; once the
    /// dialog is gone they read `None` rather than keeping the session
    /// alive or faulting.
    pub fn handle(&self) -> SessionHandle {
        SessionHandle {
            inner: Arc::downgrade(&self.inner),
        }
    }

    /// Marks the session as torn down; all further mutations no-op.
    pub fn close(&self) {
        self.closed.store(true, Ordering::SeqCst);
    }

    /// True once the owning dialog has closed.
    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::SeqCst)
    }
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new()
    }
}

/// Weak consumer-side view of a session.
///
/// Consuming a session outside the scope of its dialog is a contract
/// violation on the consumer's side, not a hard fault: the handle answers
/// `None` and emits a diagnostic, and the consumer renders degraded.
pub struct SessionHandle {
    inner: Weak<RwLock<SelectionSession>>,
}

impl SessionHandle {
    /// Snapshot of the session, or `None` when the dialog is gone.
    pub async fn session(&self) -> Option<SelectionSession> {
        match self.inner.upgrade() {
            Some(inner) => Some(inner.read().await.clone()),
            None => {
                tracing::warn!("session consumed outside the scope of its dialog");
                None
            }
        }
    }
}
