//! Single-fire resolution of a dialog's outcome.

use std::sync::{Arc, Mutex};

use tokio::sync::oneshot;

/// One-shot bridge from the dual completion paths to a single awaited value.
///
/// A dialog can complete through two paths - confirm-then-close and plain
/// cancel - and sloppy wiring can fire both. The resolver exhausts its
/// sender on the first `resolve`, so whichever path runs second becomes a
/// no-op instead of an error.
pub struct SelectionResolver {
    tx: Mutex<Option<oneshot::Sender<Vec<String>>>>,
}

impl SelectionResolver {
    /// Creates a resolver together with the receiving end.
    ///
    /// Await the receiver to obtain the resolved id list; if the resolver is
    /// dropped unresolved the receiver yields an error, which callers treat
    /// as an empty selection.
    pub fn channel() -> (Arc<Self>, oneshot::Receiver<Vec<String>>) {
        let (tx, rx) = oneshot::channel();
        (
            Arc::new(Self {
                tx: Mutex::new(Some(tx)),
            }),
            rx,
        )
    }

    /// Resolves with `ids`; returns false if already resolved.
    pub fn resolve(&self, ids: Vec<String>) -> bool {
        let sender = self.tx.lock().unwrap().take();
        match sender {
            Some(tx) => {
                // Receiver may already be gone; that is fine, resolution is
                // still considered spent.
                let _ = tx.send(ids);
                true
            }
            None => {
                tracing::debug!("selection already resolved, ignoring");
                false
            }
        }
    }

    /// True once a resolution has been consumed.
    pub fn is_resolved(&self) -> bool {
        self.tx.lock().unwrap().is_none()
    }
}
