//! Directory domain module.
//!
//! The directory is where selectable entries come from: a group listing
//! fetched once at startup and cached process-wide, and an optional remote
//! contact search for entries not cached locally.

mod cache;
mod model;
mod provider;

pub use cache::DirectoryCache;
pub use model::{ContactRecord, GroupRecord};
pub use provider::GroupDirectory;
