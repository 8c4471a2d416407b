//! Consumer protocol between the dialog shell and a concrete usage.

use async_trait::async_trait;

use crate::dialog::options::{ConfirmOutcome, RowContext, RowModel};
use crate::dialog::orchestrator::CloseHandle;
use crate::session::SelectionSession;

/// Contract a concrete dialog (Forward, Guest Invite) implements.
///
/// The orchestrator owns state and lifecycle; the delegate supplies the
/// pieces that differ per usage. All methods except `on_confirm` have
/// defaults, so a minimal consumer only decides what happens on confirm.
#[async_trait]
pub trait DialogDelegate: Send + Sync {
    /// Produces the view-model for one row. Pure; called on every render.
    fn render_row(&self, ctx: RowContext<'_>) -> RowModel {
        default_row(ctx)
    }

    /// Decides whether the current keyword should also hit the remote
    /// contact directory. Only consulted for non-empty keywords. The default
    /// stays purely local.
    fn should_search_remote(&self, _session: &SelectionSession) -> bool {
        false
    }

    /// Title for the selected panel, keyed off the session payload.
    /// `None` falls back to the option-level title.
    fn selected_panel_title(&self, _session: &SelectionSession) -> Option<String> {
        None
    }

    /// Called when the user accepts the selection.
    ///
    /// The dialog stays open until `close` is invoked, which supports
    /// validate-before-close flows: a delegate may run checks, surface an
    /// error to the host and leave the dialog up.
    async fn on_confirm(&self, outcome: ConfirmOutcome, close: CloseHandle);

    /// Fired exactly once per session when the dialog leaves the screen,
    /// whichever path closed it.
    fn after_close(&self) {}
}

/// Default row rendering: display name as title, email as subtitle.
pub fn default_row(ctx: RowContext<'_>) -> RowModel {
    RowModel {
        id: ctx.item.id.clone(),
        kind: ctx.item.kind,
        title: ctx.item.display_name().to_string(),
        subtitle: ctx.item.email.clone(),
        avatar_path: ctx.item.avatar_path.clone(),
        checked: ctx.selected,
        locked: ctx.locked,
    }
}
