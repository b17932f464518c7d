//! Per-key facades over a [`SelectionStore`](crate::SelectionStore).
//!
//! Views hold no selection state of their own. They read through the store
//! and keep a subscription that flags when their projection changed, which
//! is the signal a UI uses to re-render.

mod actions;
mod item;
mod namespace;

pub use actions::SelectActions;
pub use item::ItemView;
pub use namespace::SelectionView;

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

/// Change tracking shared between a view and its subscription callback.
#[derive(Debug, Default, Clone)]
pub(crate) struct Changes {
    dirty: Arc<AtomicBool>,
    revision: Arc<AtomicU64>,
}

impl Changes {
    pub(crate) fn mark(&self) {
        self.revision.fetch_add(1, Ordering::SeqCst);
        self.dirty.store(true, Ordering::SeqCst);
    }

    pub(crate) fn is_dirty(&self) -> bool {
        self.dirty.load(Ordering::SeqCst)
    }

    pub(crate) fn clear_dirty(&self) {
        self.dirty.store(false, Ordering::SeqCst);
    }

    pub(crate) fn revision(&self) -> u64 {
        self.revision.load(Ordering::SeqCst)
    }
}
