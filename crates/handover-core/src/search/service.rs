//! Remote contact search trait definition.

use async_trait::async_trait;

use crate::error::Result;
use crate::item::Item;

/// Asynchronous lookup against an external contact directory.
///
/// Invoked only when the dialog delegate's `should_search_remote` predicate
/// returns true for the current session (e.g. browsing contacts that are not
/// locally cached). Failures are absorbed by the caller as an empty result
/// set; the engine never retries.
#[async_trait]
pub trait ContactSearch: Send + Sync {
    /// Searches the external directory for contacts matching `keyword`.
    async fn search(&self, keyword: &str) -> Result<Vec<Item>>;
}
