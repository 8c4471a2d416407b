//! Search & match engine.
//!
//! Local keyword filtering over the session's data source, deterministic
//! ordering, and the merge of remote search results with local matches.

mod engine;
mod service;

pub use engine::{keyword_matches, local_matches, merge_search_results, sort_items};
pub use service::ContactSearch;
