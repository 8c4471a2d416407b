//! Guest-Invite dialog use case.
//!
//! Guest picking wraps the callback protocol into a single awaited result:
//! the returned pick resolves exactly once, with the cleaned guest id list
//! on confirm or with an empty list when the dialog is dismissed.

use std::collections::HashSet;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::oneshot;

use handover_core::dialog::{
    CloseHandle, ConfirmOutcome, DialogDelegate, DialogOptions, SelectionResolver,
};
use handover_core::item::Item;
use handover_core::search::ContactSearch;
use handover_core::session::SelectionSession;

use crate::dialog_usecase::DialogUseCase;

/// Normalizes a confirmed selection into invitable guest ids.
///
/// Bot accounts and the current actor never travel in the invite payload,
/// and ids are deduplicated while keeping selection order.
fn clean_guest_ids(selected: &[Item]) -> Vec<String> {
    let mut seen: HashSet<&str> = HashSet::new();
    let mut ids = Vec::new();
    for item in selected {
        if item.is_bot || item.is_me {
            continue;
        }
        if seen.insert(item.id.as_str()) {
            ids.push(item.id.clone());
        }
    }
    ids
}

/// Delegate backing the Guest-Invite dialog.
struct GuestInviteDelegate {
    resolver: Arc<SelectionResolver>,
}

#[async_trait]
impl DialogDelegate for GuestInviteDelegate {
    /// Contacts are never fully cached locally, so every keyword also hits
    /// the remote directory.
    fn should_search_remote(&self, _session: &SelectionSession) -> bool {
        true
    }

    async fn on_confirm(&self, outcome: ConfirmOutcome, close: CloseHandle) {
        self.resolver.resolve(clean_guest_ids(&outcome.selected));
        close.close().await;
    }

    /// The dismissal default; a no-op when confirm already resolved.
    fn after_close(&self) {
        self.resolver.resolve(Vec::new());
    }
}

/// An open Guest-Invite dialog plus its pending result.
pub struct GuestInvitePick {
    dialog: Arc<DialogUseCase>,
    receiver: oneshot::Receiver<Vec<String>>,
}

impl GuestInvitePick {
    /// The dialog handle, for driving search/toggle/confirm.
    pub fn dialog(&self) -> &Arc<DialogUseCase> {
        &self.dialog
    }

    /// Waits for the single resolution of this pick.
    ///
    /// Resolves with the confirmed guest ids, or with an empty list when the
    /// dialog was dismissed (or dropped) without confirming.
    pub async fn wait(self) -> Vec<String> {
        self.receiver.await.unwrap_or_default()
    }
}

/// Use case for the Guest-Invite dialog.
pub struct GuestInviteUseCase {
    contact_search: Arc<dyn ContactSearch>,
}

impl GuestInviteUseCase {
    /// Creates the use case over the remote contact search provider.
    pub fn new(contact_search: Arc<dyn ContactSearch>) -> Self {
        Self { contact_search }
    }

    /// Opens the Guest-Invite dialog.
    ///
    /// `known_guests` is the locally known candidate pool; `invited_ids` are
    /// guests already on the event, locked into the selection - ids unknown
    /// to the pool show up as bare placeholders.
    pub async fn begin(
        &self,
        known_guests: Vec<Item>,
        invited_ids: Vec<String>,
    ) -> GuestInvitePick {
        let (resolver, receiver) = SelectionResolver::channel();
        let options = DialogOptions {
            list: known_guests,
            disabled_ids: invited_ids,
            selected_panel_title: Some("Invited guests".to_string()),
            ..Default::default()
        };
        let delegate = Arc::new(GuestInviteDelegate { resolver });
        let dialog = DialogUseCase::open(options, delegate, self.contact_search.clone()).await;
        GuestInvitePick { dialog, receiver }
    }
}
