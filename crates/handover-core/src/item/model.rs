//! Item domain model.

use serde::{Deserialize, Serialize};

/// Kind of a selectable entry.
///
/// The kind is assigned from the source collection during normalization and
/// is immutable afterwards; it is never inferred from an item's content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemKind {
    /// A group chat or mailing-list style collection of members.
    Group,
    /// A single direct contact.
    Direct,
}

impl ItemKind {
    /// Returns true for group entries.
    pub fn is_group(self) -> bool {
        matches!(self, Self::Group)
    }
}

/// A selectable entry in a transfer or invite dialog.
///
/// Items are unique by `id` within one dialog session; the merge step of the
/// search engine enforces this. Display metadata is optional so placeholder
/// entries (synthesized for ids the caller locked in but the directory does
/// not know) can carry an id alone.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    /// Unique identifier within a dialog session
    pub id: String,
    /// Entry kind, serialized as `type` for the host bridge
    #[serde(rename = "type")]
    pub kind: ItemKind,
    /// Display name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Contact email, direct entries only
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// Avatar resource path
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar_path: Option<String>,
    /// Member ids, group entries only
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub members: Option<Vec<String>>,
    /// True when the id refers to the current actor; such entries are always
    /// implicitly selected and cannot be removed
    #[serde(default)]
    pub is_me: bool,
    /// Bot accounts are stripped from invite confirm payloads
    #[serde(default)]
    pub is_bot: bool,
}

impl Item {
    /// Creates a bare direct entry carrying nothing but its id.
    ///
    /// Used by the reconciler when a caller-locked id is not present in the
    /// known item list.
    pub fn placeholder(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            kind: ItemKind::Direct,
            name: None,
            email: None,
            avatar_path: None,
            members: None,
            is_me: false,
            is_bot: false,
        }
    }

    /// Returns the name to display for this entry, falling back to the id.
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or(&self.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_placeholder_is_bare_direct() {
        let item = Item::placeholder("u99");
        assert_eq!(item.id, "u99");
        assert_eq!(item.kind, ItemKind::Direct);
        assert!(item.name.is_none());
        assert!(item.email.is_none());
        assert!(item.members.is_none());
        assert!(!item.is_me);
        assert!(!item.is_bot);
    }

    #[test]
    fn test_display_name_falls_back_to_id() {
        let mut item = Item::placeholder("u1");
        assert_eq!(item.display_name(), "u1");
        item.name = Some("Bob".to_string());
        assert_eq!(item.display_name(), "Bob");
    }

    #[test]
    fn test_kind_serializes_as_type() {
        let item = Item::placeholder("u1");
        let json = serde_json::to_value(&item).unwrap();
        assert_eq!(json["type"], "direct");
        assert_eq!(json["id"], "u1");
    }
}
