//! Forward dialog use case.
//!
//! Forwarding offers the full local pool - cached groups plus recently
//! contacted people - behind optional type-filter tabs. The groups tab
//! filters purely locally; the contacts tab additionally consults the remote
//! directory, since contacts are never fully cached.

use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use handover_core::dialog::{
    CloseHandle, ConfirmOutcome, DialogDelegate, DialogOptions, RowModel, RowPool,
};
use handover_core::directory::{ContactRecord, DirectoryCache};
use handover_core::item::{Item, ItemKind, normalize_contacts};
use handover_core::search::ContactSearch;
use handover_core::session::SelectionSession;

use crate::dialog_usecase::DialogUseCase;

/// Payload key holding the active type-filter tab.
pub const ACTIVE_TAB_KEY: &str = "activeTab";

/// Callback receiving the forward targets once the user confirms.
pub type ForwardConfirmCallback = Arc<dyn Fn(Vec<Item>) + Send + Sync>;

/// Type-filter tab of the Forward dialog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TypeFilter {
    Groups,
    Contacts,
}

impl TypeFilter {
    /// Payload representation of this tab.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Groups => "groups",
            Self::Contacts => "contacts",
        }
    }

    /// Reads the active tab out of a session payload.
    pub fn from_payload(payload: &Map<String, Value>) -> Option<Self> {
        match payload.get(ACTIVE_TAB_KEY).and_then(Value::as_str) {
            Some("groups") => Some(Self::Groups),
            Some("contacts") => Some(Self::Contacts),
            _ => None,
        }
    }
}

/// Delegate backing the Forward dialog.
struct ForwardDelegate {
    on_forward: ForwardConfirmCallback,
}

#[async_trait]
impl DialogDelegate for ForwardDelegate {
    /// Remote search only applies while the contacts tab is active; the
    /// groups tab filters a list that is already fully local.
    fn should_search_remote(&self, session: &SelectionSession) -> bool {
        TypeFilter::from_payload(&session.payload) == Some(TypeFilter::Contacts)
    }

    fn selected_panel_title(&self, session: &SelectionSession) -> Option<String> {
        match TypeFilter::from_payload(&session.payload) {
            Some(TypeFilter::Contacts) => Some("Selected contacts".to_string()),
            Some(TypeFilter::Groups) => Some("Selected groups".to_string()),
            None => None,
        }
    }

    async fn on_confirm(&self, outcome: ConfirmOutcome, close: CloseHandle) {
        (self.on_forward)(outcome.selected);
        close.close().await;
    }
}

/// Use case for the Forward dialog.
pub struct ForwardUseCase {
    directory: Arc<DirectoryCache>,
    contact_search: Arc<dyn ContactSearch>,
}

impl ForwardUseCase {
    /// Creates the use case over the process-wide directory cache and the
    /// remote contact search provider.
    pub fn new(directory: Arc<DirectoryCache>, contact_search: Arc<dyn ContactSearch>) -> Self {
        Self {
            directory,
            contact_search,
        }
    }

    /// Opens the Forward dialog.
    ///
    /// The pool is the cached group listing plus the caller's recent
    /// contacts; `locked_ids` (e.g. the conversation being forwarded from)
    /// render pre-selected and untogglable. The groups tab is active
    /// initially. `on_forward` receives the confirmed targets - the active
    /// selection only, locked ids stay the caller's own business.
    pub async fn open(
        &self,
        recent_contacts: &[ContactRecord],
        locked_ids: Vec<String>,
        on_forward: ForwardConfirmCallback,
    ) -> Arc<DialogUseCase> {
        let mut list: Vec<Item> = self.directory.snapshot().await.as_ref().clone();
        list.extend(normalize_contacts(recent_contacts));

        let options = DialogOptions {
            list,
            disabled_ids: locked_ids,
            enable_type_filter: true,
            ..Default::default()
        };
        let delegate = Arc::new(ForwardDelegate { on_forward });
        let usecase = DialogUseCase::open(options, delegate, self.contact_search.clone()).await;
        set_active_tab(&usecase, TypeFilter::Groups).await;
        usecase
    }
}

/// Switches the active type-filter tab.
///
/// Re-runs an active keyword, since the tab decides whether the remote
/// directory participates.
pub async fn set_active_tab(dialog: &DialogUseCase, tab: TypeFilter) {
    let mut payload = Map::new();
    payload.insert(ACTIVE_TAB_KEY.to_string(), Value::from(tab.as_str()));
    dialog.set_payload(payload).await;
}

/// Renders the available pool with the active tab's kind filter applied.
///
/// Without type-filter tabs the pool renders unfiltered.
pub async fn visible_rows(dialog: &DialogUseCase) -> Vec<RowModel> {
    let rows = dialog.rows(RowPool::Available).await;
    if !dialog.dialog().options().enable_type_filter {
        return rows;
    }
    match TypeFilter::from_payload(&dialog.snapshot().await.payload) {
        Some(TypeFilter::Groups) => rows
            .into_iter()
            .filter(|row| row.kind == ItemKind::Group)
            .collect(),
        Some(TypeFilter::Contacts) => rows
            .into_iter()
            .filter(|row| row.kind == ItemKind::Direct)
            .collect(),
        None => rows,
    }
}
