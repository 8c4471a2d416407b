//! Keyword matching, ordering and result merging.

use std::collections::HashSet;

use crate::item::{Item, ItemKind};

/// Returns true when `item` matches `keyword`.
///
/// Case-insensitive substring match against the display name, the email, the
/// raw id, and - for address-shaped ids like `alice@corp` - the id's local
/// part, so both display and raw id forms are accepted.
pub fn keyword_matches(item: &Item, keyword: &str) -> bool {
    if keyword.is_empty() {
        return true;
    }
    let needle = keyword.to_lowercase();

    if let Some(name) = &item.name {
        if name.to_lowercase().contains(&needle) {
            return true;
        }
    }
    if let Some(email) = &item.email {
        if email.to_lowercase().contains(&needle) {
            return true;
        }
    }

    let id = item.id.to_lowercase();
    if id.contains(&needle) {
        return true;
    }
    // Address-shaped id: also match on the local part alone
    if let Some((local, _domain)) = id.split_once('@') {
        if local.contains(&needle) {
            return true;
        }
    }

    false
}

/// Sorts items into the default display order.
///
/// Alphabetical by lowercased display name, ties broken by id so repeated
/// sorts of identical input always produce the same order.
pub fn sort_items(items: &mut [Item]) {
    items.sort_by(|a, b| {
        let key_a = a.display_name().to_lowercase();
        let key_b = b.display_name().to_lowercase();
        key_a.cmp(&key_b).then_with(|| a.id.cmp(&b.id))
    });
}

/// Filters `items` down to the entries matching `keyword`.
///
/// An empty keyword yields an empty overlay; showing the full data source
/// grid in that case is the orchestrator's concern, not the search engine's.
pub fn local_matches(items: &[Item], keyword: &str) -> Vec<Item> {
    if keyword.is_empty() {
        return Vec::new();
    }
    items
        .iter()
        .filter(|item| keyword_matches(item, keyword))
        .cloned()
        .collect()
}

/// Merges remote search results with local matches.
///
/// Remote entries come first and are coerced to `Direct` (remote search only
/// ever returns contacts), followed by local matches. The combined list is
/// deduplicated by id, first occurrence wins, so a remote entry shadows a
/// local one with the same id.
pub fn merge_search_results(remote: Vec<Item>, local: Vec<Item>) -> Vec<Item> {
    let mut seen: HashSet<String> = HashSet::new();
    let mut merged = Vec::with_capacity(remote.len() + local.len());

    for mut item in remote {
        item.kind = ItemKind::Direct;
        if seen.insert(item.id.clone()) {
            merged.push(item);
        }
    }
    for item in local {
        if seen.insert(item.id.clone()) {
            merged.push(item);
        }
    }

    merged
}
