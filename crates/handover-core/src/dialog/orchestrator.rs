//! Dialog lifecycle orchestration.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;

use crate::dialog::delegate::DialogDelegate;
use crate::dialog::options::{ConfirmOutcome, DialogOptions, RowContext, RowModel, RowPool};
use crate::item::Item;
use crate::session::SessionStore;

const DEFAULT_SELECTED_PANEL_TITLE: &str = "Selected";

/// Lifecycle phase of a dialog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DialogPhase {
    Closed,
    Open,
    Confirmed,
    Cancelled,
}

struct DialogShared {
    store: SessionStore,
    delegate: Arc<dyn DialogDelegate>,
    phase: RwLock<DialogPhase>,
    after_close_fired: AtomicBool,
}

impl DialogShared {
    /// Tears the dialog down: the store stops accepting writes, the phase
    /// lands on `Closed`, and `after_close` fires if it has not yet.
    async fn finish(&self) {
        self.store.close();
        {
            let mut phase = self.phase.write().await;
            *phase = DialogPhase::Closed;
        }
        if !self.after_close_fired.swap(true, Ordering::SeqCst) {
            self.delegate.after_close();
        }
    }
}

/// One open selection dialog.
///
/// Exactly one `SelectionSession` exists per dialog instance; concurrently
/// open dialogs never share state. The dialog exposes the interactions the
/// host shell forwards from the user (toggle, confirm, cancel) and hands row
/// view-models back for rendering.
pub struct TransferDialog {
    shared: Arc<DialogShared>,
    options: DialogOptions,
}

impl TransferDialog {
    /// Opens a dialog: creates and seeds a fresh session, phase `Open`.
    pub async fn open(options: DialogOptions, delegate: Arc<dyn DialogDelegate>) -> Self {
        let store = SessionStore::new();
        store.seed(options.list.clone(), &options.disabled_ids).await;
        tracing::info!(
            items = options.list.len(),
            locked = options.disabled_ids.len(),
            "transfer dialog opened"
        );
        Self {
            shared: Arc::new(DialogShared {
                store,
                delegate,
                phase: RwLock::new(DialogPhase::Open),
                after_close_fired: AtomicBool::new(false),
            }),
            options,
        }
    }

    /// The session store backing this dialog.
    pub fn store(&self) -> &SessionStore {
        &self.shared.store
    }

    /// The options this dialog was opened with.
    pub fn options(&self) -> &DialogOptions {
        &self.options
    }

    /// Current lifecycle phase.
    pub async fn phase(&self) -> DialogPhase {
        *self.shared.phase.read().await
    }

    /// Renders the rows of one pool through the delegate.
    ///
    /// The available pool shows the search overlay while a keyword is set
    /// and the full data source otherwise; the selected pool lists locked
    /// entries first, then the user's picks. Locked entries render checked -
    /// the display-only merge the confirm payload deliberately skips.
    pub async fn rows(&self, pool: RowPool) -> Vec<RowModel> {
        let session = self.shared.store.snapshot().await;
        let items: Vec<Item> = match pool {
            RowPool::Available => {
                if session.search_text.is_empty() {
                    session.data_source.clone()
                } else {
                    session.search_results.clone()
                }
            }
            RowPool::Selected => session
                .disabled_items
                .iter()
                .chain(session.selected_items.iter())
                .cloned()
                .collect(),
        };
        items
            .iter()
            .map(|item| {
                self.shared.delegate.render_row(RowContext {
                    item,
                    selected: pool == RowPool::Selected || session.is_checked(&item.id),
                    locked: session.is_disabled(&item.id) || item.is_me,
                    pool,
                })
            })
            .collect()
    }

    /// Title for the selected panel: delegate override, then option, then
    /// the built-in default.
    pub async fn selected_panel_title(&self) -> String {
        let session = self.shared.store.snapshot().await;
        self.shared
            .delegate
            .selected_panel_title(&session)
            .or_else(|| self.options.selected_panel_title.clone())
            .unwrap_or_else(|| DEFAULT_SELECTED_PANEL_TITLE.to_string())
    }

    /// Accepts the current selection.
    ///
    /// Hands the user-chosen entries to the delegate together with a close
    /// handle; the dialog stays up until the delegate invokes it. Calling
    /// confirm outside the `Open` phase is a no-op.
    pub async fn confirm(&self) {
        {
            let mut phase = self.shared.phase.write().await;
            if *phase != DialogPhase::Open {
                tracing::warn!(phase = ?*phase, "confirm ignored outside Open phase");
                return;
            }
            *phase = DialogPhase::Confirmed;
        }
        let session = self.shared.store.snapshot().await;
        let outcome = ConfirmOutcome {
            selected: session.selected_items,
        };
        tracing::info!(selected = outcome.selected.len(), "dialog confirmed");
        let close = CloseHandle {
            shared: Arc::clone(&self.shared),
        };
        self.shared.delegate.on_confirm(outcome, close).await;
    }

    /// Dismisses the dialog without confirming.
    ///
    /// Tears the session down and fires `after_close` (once). Calling cancel
    /// outside the `Open` phase is a no-op.
    pub async fn cancel(&self) {
        {
            let mut phase = self.shared.phase.write().await;
            if *phase != DialogPhase::Open {
                tracing::warn!(phase = ?*phase, "cancel ignored outside Open phase");
                return;
            }
            *phase = DialogPhase::Cancelled;
        }
        tracing::info!("dialog cancelled");
        self.shared.finish().await;
    }
}

/// Handle a confirm delegate uses to actually dismiss the dialog.
///
/// Clonable and idempotent: the underlying teardown runs once no matter how
/// many handles exist or how often they are invoked.
#[derive(Clone)]
pub struct CloseHandle {
    shared: Arc<DialogShared>,
}

impl CloseHandle {
    /// Closes the dialog and fires `after_close` if it has not fired yet.
    pub async fn close(&self) {
        self.shared.finish().await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dialog::DialogDelegate;
    use crate::item::ItemKind;
    use async_trait::async_trait;
    use std::sync::Mutex;
    use std::sync::atomic::AtomicUsize;

    fn named(id: &str, name: &str) -> Item {
        Item {
            name: Some(name.to_string()),
            ..Item::placeholder(id)
        }
    }

    /// Delegate that records outcomes and closes immediately on confirm.
    struct RecordingDelegate {
        confirmed: Mutex<Option<Vec<String>>>,
        after_close_calls: AtomicUsize,
        close_on_confirm: bool,
    }

    impl RecordingDelegate {
        fn new(close_on_confirm: bool) -> Arc<Self> {
            Arc::new(Self {
                confirmed: Mutex::new(None),
                after_close_calls: AtomicUsize::new(0),
                close_on_confirm,
            })
        }
    }

    #[async_trait]
    impl DialogDelegate for RecordingDelegate {
        async fn on_confirm(&self, outcome: ConfirmOutcome, close: CloseHandle) {
            let ids = outcome.selected.iter().map(|i| i.id.clone()).collect();
            *self.confirmed.lock().unwrap() = Some(ids);
            if self.close_on_confirm {
                close.close().await;
            }
        }

        fn after_close(&self) {
            self.after_close_calls.fetch_add(1, Ordering::SeqCst);
        }
    }

    fn options(list: Vec<Item>, disabled: &[&str]) -> DialogOptions {
        DialogOptions {
            list,
            disabled_ids: disabled.iter().map(|s| s.to_string()).collect(),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_confirm_passes_selection_without_disabled_merge() {
        let delegate = RecordingDelegate::new(true);
        let dialog = TransferDialog::open(
            options(vec![named("u1", "Bob"), named("u2", "Carol")], &["u2"]),
            delegate.clone(),
        )
        .await;

        dialog.store().toggle("u1").await;
        dialog.confirm().await;

        // Only the active selection reaches the confirm payload
        assert_eq!(
            delegate.confirmed.lock().unwrap().as_deref(),
            Some(["u1".to_string()].as_slice())
        );
        assert_eq!(dialog.phase().await, DialogPhase::Closed);
        assert_eq!(delegate.after_close_calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_dialog_stays_open_until_delegate_closes() {
        let delegate = RecordingDelegate::new(false);
        let dialog = TransferDialog::open(options(vec![named("u1", "Bob")], &[]), delegate.clone()).await;

        dialog.confirm().await;
        assert_eq!(dialog.phase().await, DialogPhase::Confirmed);
        assert!(!dialog.store().is_closed());
        assert_eq!(delegate.after_close_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_cancel_fires_after_close_once() {
        let delegate = RecordingDelegate::new(true);
        let dialog = TransferDialog::open(options(vec![named("u1", "Bob")], &[]), delegate.clone()).await;

        dialog.cancel().await;
        dialog.cancel().await; // second attempt is a no-op

        assert_eq!(dialog.phase().await, DialogPhase::Closed);
        assert!(dialog.store().is_closed());
        assert_eq!(delegate.after_close_calls.load(Ordering::SeqCst), 1);
        assert!(delegate.confirmed.lock().unwrap().is_none());
    }

    #[tokio::test]
    async fn test_cancel_after_confirm_is_noop() {
        let delegate = RecordingDelegate::new(true);
        let dialog = TransferDialog::open(options(vec![named("u1", "Bob")], &[]), delegate.clone()).await;

        dialog.confirm().await;
        dialog.cancel().await;

        assert_eq!(delegate.after_close_calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_rows_merge_disabled_for_display_only() {
        let delegate = RecordingDelegate::new(true);
        let dialog = TransferDialog::open(
            options(vec![named("u1", "Bob"), named("u2", "Carol")], &["u2"]),
            delegate,
        )
        .await;

        let available = dialog.rows(RowPool::Available).await;
        let locked_row = available.iter().find(|r| r.id == "u2").unwrap();
        assert!(locked_row.checked);
        assert!(locked_row.locked);
        let free_row = available.iter().find(|r| r.id == "u1").unwrap();
        assert!(!free_row.checked);
        assert!(!free_row.locked);

        dialog.store().toggle("u1").await;
        let selected = dialog.rows(RowPool::Selected).await;
        let ids: Vec<&str> = selected.iter().map(|r| r.id.as_str()).collect();
        // Locked entries list first, then the user's picks
        assert_eq!(ids, vec!["u2", "u1"]);
        assert!(selected.iter().all(|r| r.checked));
    }

    #[tokio::test]
    async fn test_rows_show_overlay_while_searching() {
        let delegate = RecordingDelegate::new(true);
        let dialog =
            TransferDialog::open(options(vec![named("u1", "Bob")], &[]), delegate).await;

        let ticket = dialog.store().begin_search("car", true).await.unwrap();
        dialog
            .store()
            .apply_search_results(ticket, "car", vec![named("u9", "Carol Remote")])
            .await;

        let rows = dialog.rows(RowPool::Available).await;
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].id, "u9");
        assert_eq!(rows[0].kind, ItemKind::Direct);
    }

    #[tokio::test]
    async fn test_selected_panel_title_falls_back() {
        let delegate = RecordingDelegate::new(true);
        let mut opts = options(Vec::new(), &[]);
        opts.selected_panel_title = Some("Guests".to_string());
        let dialog = TransferDialog::open(opts, delegate).await;
        assert_eq!(dialog.selected_panel_title().await, "Guests");

        let delegate = RecordingDelegate::new(true);
        let dialog = TransferDialog::open(DialogOptions::default(), delegate).await;
        assert_eq!(dialog.selected_panel_title().await, "Selected");
    }
}
