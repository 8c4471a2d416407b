//! Process-wide snapshot cache for the group directory.

use std::sync::Arc;

use tokio::sync::RwLock;

use crate::directory::provider::GroupDirectory;
use crate::item::{Item, normalize_groups};
use crate::search::sort_items;

/// Read-only snapshot of the normalized group listing.
///
/// Refreshed by an external initializer (typically once at process start)
/// and consumed, never mutated, by dialog sessions. A failed fetch installs
/// an empty snapshot; there is no retry here.
pub struct DirectoryCache {
    groups: RwLock<Arc<Vec<Item>>>,
}

impl DirectoryCache {
    /// Creates an empty cache.
    pub fn new() -> Self {
        Self {
            groups: RwLock::new(Arc::new(Vec::new())),
        }
    }

    /// Fetches the group listing and replaces the snapshot.
    ///
    /// Provider failures are absorbed: the error is logged and the snapshot
    /// becomes empty, so a broken directory degrades to a contacts-only
    /// dialog instead of an error surface.
    pub async fn refresh(&self, provider: &dyn GroupDirectory) {
        let mut items = match provider.fetch_groups().await {
            Ok(records) => normalize_groups(&records),
            Err(err) => {
                tracing::warn!(error = %err, "group directory fetch failed, caching empty list");
                Vec::new()
            }
        };
        sort_items(&mut items);
        tracing::info!(groups = items.len(), "group directory snapshot refreshed");

        let mut groups = self.groups.write().await;
        *groups = Arc::new(items);
    }

    /// Cheap handle to the current snapshot.
    pub async fn snapshot(&self) -> Arc<Vec<Item>> {
        self.groups.read().await.clone()
    }
}

impl Default for DirectoryCache {
    fn default() -> Self {
        Self::new()
    }
}
