//! Reconciliation of caller-locked ids against the known item list.

use crate::item::Item;

/// Resolves `disabled_ids` against `known` items.
///
/// Ids present in `known` resolve to that full item; unknown ids synthesize
/// a bare direct placeholder. The output preserves the order of
/// `disabled_ids`, not of `known`. Blank ids are dropped so a sloppy caller
/// can never push an empty entry into the session.
pub fn reconcile(known: &[Item], disabled_ids: &[String]) -> Vec<Item> {
    if disabled_ids.is_empty() {
        return Vec::new();
    }

    disabled_ids
        .iter()
        .filter(|id| !id.is_empty())
        .map(|id| {
            known
                .iter()
                .find(|item| &item.id == id)
                .cloned()
                .unwrap_or_else(|| Item::placeholder(id.clone()))
        })
        .collect()
}
