//! Group directory provider trait.

use async_trait::async_trait;

use crate::directory::GroupRecord;
use crate::error::Result;

/// Provider for the group listing shown in transfer dialogs.
///
/// Fetched once at process start by an external initializer and cached in
/// [`DirectoryCache`](crate::directory::DirectoryCache); the engine itself
/// never retries a failed fetch.
#[async_trait]
pub trait GroupDirectory: Send + Sync {
    /// Fetches the full group listing for the current actor.
    async fn fetch_groups(&self) -> Result<Vec<GroupRecord>>;
}
