//! Dialog use case implementation.
//!
//! `DialogUseCase` wires one open `TransferDialog` to its providers: it
//! forwards user interactions to the session store, decides per keyword
//! whether the remote contact directory is consulted, and applies results
//! only while they are still fresh.

use std::sync::Arc;

use serde_json::{Map, Value};

use handover_core::dialog::{
    DialogDelegate, DialogOptions, DialogPhase, RowModel, RowPool, TransferDialog,
};
use handover_core::search::{ContactSearch, local_matches, merge_search_results};
use handover_core::session::SelectionSession;

/// Use case driving a single open dialog.
///
/// All methods tolerate being called after the dialog closed; late calls
/// no-op at the store boundary instead of failing.
pub struct DialogUseCase {
    dialog: TransferDialog,
    delegate: Arc<dyn DialogDelegate>,
    contact_search: Arc<dyn ContactSearch>,
}

impl DialogUseCase {
    /// Opens a dialog and returns the use case handle driving it.
    ///
    /// # Arguments
    ///
    /// * `options` - Caller-supplied pool, locked ids and display hints
    /// * `delegate` - Consumer protocol implementation (rows, predicates, confirm)
    /// * `contact_search` - Remote directory used when the delegate asks for it
    pub async fn open(
        options: DialogOptions,
        delegate: Arc<dyn DialogDelegate>,
        contact_search: Arc<dyn ContactSearch>,
    ) -> Arc<Self> {
        let dialog = TransferDialog::open(options, delegate.clone()).await;
        Arc::new(Self {
            dialog,
            delegate,
            contact_search,
        })
    }

    /// The underlying dialog.
    pub fn dialog(&self) -> &TransferDialog {
        &self.dialog
    }

    /// Consistent copy of the current session state.
    pub async fn snapshot(&self) -> SelectionSession {
        self.dialog.store().snapshot().await
    }

    /// Current lifecycle phase.
    pub async fn phase(&self) -> DialogPhase {
        self.dialog.phase().await
    }

    /// Renders one pool through the delegate.
    pub async fn rows(&self, pool: RowPool) -> Vec<RowModel> {
        self.dialog.rows(pool).await
    }

    /// Flips membership of `id` in the selected set.
    pub async fn toggle(&self, id: &str) -> bool {
        self.dialog.store().toggle(id).await
    }

    /// Updates the search keyword and recomputes the overlay.
    ///
    /// Local matches are always computed against the data source; the remote
    /// directory is consulted when the delegate's predicate says so, with the
    /// loading flag toggled around the call. A remote failure degrades to the
    /// local matches alone. Results are committed through the session ticket,
    /// so a response arriving after the keyword moved on is dropped.
    pub async fn set_search_text(&self, keyword: &str) {
        let store = self.dialog.store();

        // Evaluate the predicate against the state the keyword will be part of
        let mut preview = store.snapshot().await;
        preview.search_text = keyword.to_string();
        let remote = !keyword.is_empty() && self.delegate.should_search_remote(&preview);

        let Some(ticket) = store.begin_search(keyword, remote).await else {
            // Empty keyword (overlay cleared) or closed session
            return;
        };

        let local = local_matches(&preview.data_source, keyword);
        let results = if remote {
            tracing::info!(keyword, "remote contact search issued");
            let fetched = match self.contact_search.search(keyword).await {
                Ok(items) => items,
                Err(err) => {
                    tracing::warn!(error = %err, keyword, "remote contact search failed");
                    Vec::new()
                }
            };
            merge_search_results(fetched, local)
        } else {
            local
        };

        if !store.apply_search_results(ticket, keyword, results).await {
            tracing::debug!(keyword, "search results were stale on arrival");
        }
    }

    /// Shallow-merges caller flags into the session payload.
    ///
    /// A payload change can flip the remote-search predicate (switching the
    /// type-filter tab does), so an active keyword is re-run afterwards.
    pub async fn set_payload(&self, payload: Map<String, Value>) {
        self.dialog.store().merge_payload(payload).await;

        let search_text = self.dialog.store().snapshot().await.search_text;
        if !search_text.is_empty() {
            self.set_search_text(&search_text).await;
        }
    }

    /// Accepts the current selection; see [`TransferDialog::confirm`].
    pub async fn confirm(&self) {
        self.dialog.confirm().await;
    }

    /// Dismisses the dialog; see [`TransferDialog::cancel`].
    pub async fn cancel(&self) {
        self.dialog.cancel().await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use handover_core::dialog::{CloseHandle, ConfirmOutcome};
    use handover_core::error::{HandoverError, Result};
    use handover_core::item::Item;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tokio::sync::oneshot;

    fn named(id: &str, name: &str) -> Item {
        Item {
            name: Some(name.to_string()),
            ..Item::placeholder(id)
        }
    }

    /// Delegate that always searches remotely and closes on confirm.
    struct RemoteDelegate;

    #[async_trait]
    impl DialogDelegate for RemoteDelegate {
        fn should_search_remote(&self, _session: &SelectionSession) -> bool {
            true
        }

        async fn on_confirm(&self, _outcome: ConfirmOutcome, close: CloseHandle) {
            close.close().await;
        }
    }

    /// Remote search that blocks on "al" until released, answers "bo" at once.
    struct GatedSearch {
        gate: Mutex<Option<oneshot::Receiver<()>>>,
        calls: AtomicUsize,
    }

    #[async_trait]
    impl ContactSearch for GatedSearch {
        async fn search(&self, keyword: &str) -> Result<Vec<Item>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if keyword == "al" {
                let gate = self.gate.lock().unwrap().take();
                if let Some(gate) = gate {
                    let _ = gate.await;
                }
                Ok(vec![named("u1", "Alice")])
            } else {
                Ok(vec![named("u2", "Bob")])
            }
        }
    }

    struct FailingSearch;

    #[async_trait]
    impl ContactSearch for FailingSearch {
        async fn search(&self, _keyword: &str) -> Result<Vec<Item>> {
            Err(HandoverError::provider("directory unreachable"))
        }
    }

    #[tokio::test]
    async fn test_overdue_response_does_not_overwrite_newer_keyword() {
        let (release, gate) = oneshot::channel();
        let search = Arc::new(GatedSearch {
            gate: Mutex::new(Some(gate)),
            calls: AtomicUsize::new(0),
        });
        let usecase = DialogUseCase::open(
            DialogOptions::default(),
            Arc::new(RemoteDelegate),
            search.clone(),
        )
        .await;

        // "al" parks inside the provider; "bo" completes while it waits
        let stale = {
            let usecase = usecase.clone();
            tokio::spawn(async move { usecase.set_search_text("al").await })
        };
        tokio::task::yield_now().await;
        usecase.set_search_text("bo").await;

        release.send(()).unwrap();
        stale.await.unwrap();

        let session = usecase.snapshot().await;
        assert_eq!(session.search_text, "bo");
        assert_eq!(session.search_results.len(), 1);
        assert_eq!(session.search_results[0].id, "u2");
        assert!(!session.loading);
        assert_eq!(search.calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_remote_failure_degrades_to_local_matches() {
        let options = DialogOptions {
            list: vec![named("u1", "Bob Local")],
            ..Default::default()
        };
        let usecase =
            DialogUseCase::open(options, Arc::new(RemoteDelegate), Arc::new(FailingSearch)).await;

        usecase.set_search_text("bob").await;

        let session = usecase.snapshot().await;
        assert!(!session.loading);
        assert_eq!(session.search_results.len(), 1);
        assert_eq!(session.search_results[0].id, "u1");
    }

    #[tokio::test]
    async fn test_clearing_keyword_clears_overlay_without_remote_call() {
        let search = Arc::new(GatedSearch {
            gate: Mutex::new(None),
            calls: AtomicUsize::new(0),
        });
        let usecase = DialogUseCase::open(
            DialogOptions {
                list: vec![named("u2", "Bob")],
                ..Default::default()
            },
            Arc::new(RemoteDelegate),
            search.clone(),
        )
        .await;

        usecase.set_search_text("bo").await;
        assert_eq!(usecase.snapshot().await.search_results.len(), 1);

        usecase.set_search_text("").await;
        let session = usecase.snapshot().await;
        assert!(session.search_results.is_empty());
        assert!(session.search_text.is_empty());
        // Only the "bo" search hit the provider
        assert_eq!(search.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_search_after_close_is_ignored() {
        let search = Arc::new(GatedSearch {
            gate: Mutex::new(None),
            calls: AtomicUsize::new(0),
        });
        let usecase = DialogUseCase::open(
            DialogOptions::default(),
            Arc::new(RemoteDelegate),
            search.clone(),
        )
        .await;

        usecase.cancel().await;
        usecase.set_search_text("bo").await;

        assert_eq!(search.calls.load(Ordering::SeqCst), 0);
        assert!(usecase.snapshot().await.search_results.is_empty());
    }
}
