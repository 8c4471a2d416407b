//! Selection session domain module.
//!
//! This module contains the per-dialog mutable state and its store:
//!
//! - `model`: the `SelectionSession` state container and `SessionPatch`
//! - `store`: batched, close-tolerant writes around the session
//! - `reconcile`: resolving caller-locked ids against known items

mod model;
mod reconcile;
mod store;

// Re-export public API
pub use model::{SelectionSession, SessionPatch};
pub use reconcile::reconcile;
pub use store::{SessionHandle, SessionStore};
