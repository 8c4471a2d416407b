//! Dialog options and row view-models.

use serde::{Deserialize, Serialize};

use crate::item::{Item, ItemKind};

/// Caller-supplied inputs for opening a dialog.
#[derive(Debug, Clone, Default)]
pub struct DialogOptions {
    /// The raw item pool to choose from
    pub list: Vec<Item>,
    /// Ids that must always appear selected and locked
    pub disabled_ids: Vec<String>,
    /// Whether the dialog shows type-filter tabs
    pub enable_type_filter: bool,
    /// Stacking hint handed back to the host renderer untouched
    pub z_index: Option<i32>,
    /// Static title for the selected panel; a delegate can override it
    /// per-session via its payload
    pub selected_panel_title: Option<String>,
}

/// Which pool a row is being rendered for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RowPool {
    /// The searchable grid of available entries
    Available,
    /// The panel listing locked and selected entries
    Selected,
}

/// Everything a row renderer gets to look at.
#[derive(Debug, Clone, Copy)]
pub struct RowContext<'a> {
    /// The entry being rendered
    pub item: &'a Item,
    /// Checked state for display; locked entries count as selected here even
    /// though the confirm payload never auto-merges them
    pub selected: bool,
    /// True when the entry cannot be toggled off (locked or current actor)
    pub locked: bool,
    /// Rendering context
    pub pool: RowPool,
}

/// Host-renderable description of one row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RowModel {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: ItemKind,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subtitle: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar_path: Option<String>,
    pub checked: bool,
    pub locked: bool,
}

/// What the confirm handler receives.
///
/// `selected` holds the user-chosen entries only; locked entries are the
/// caller's own ids and are merged back (or not) per the caller's needs.
#[derive(Debug, Clone)]
pub struct ConfirmOutcome {
    pub selected: Vec<Item>,
}
