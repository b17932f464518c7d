use super::{Changes, SelectActions};
use crate::selection::Selection;
use crate::store::SelectionStore;
use crate::subscription::Subscription;

/// Read/write facade over one selection key.
///
/// Marks itself dirty whenever the key's selection changes. Writes to
/// other keys are never observed.
///
/// # Example
///
/// ```
/// use keyselect::{SelectionStore, SelectionView};
///
/// let store = SelectionStore::new();
/// let view = SelectionView::new(store.clone(), "foo");
///
/// view.select(&["one"], false);
/// view.select(&["two"], true);
/// assert_eq!(view.items(), vec!["one", "two"]);
/// assert!(view.is_dirty());
/// ```
#[derive(Debug)]
pub struct SelectionView {
    actions: SelectActions,
    changes: Changes,
    _subscription: Subscription,
}

impl SelectionView {
    pub fn new(store: SelectionStore, key: impl Into<String>) -> Self {
        let key = key.into();
        let changes = Changes::default();
        let subscription = store.subscribe_key(&key, Selection::clone, {
            let changes = changes.clone();
            move |_: &Selection| changes.mark()
        });

        Self {
            actions: SelectActions::new(store, key),
            changes,
            _subscription: subscription,
        }
    }

    pub fn key(&self) -> &str {
        self.actions.key()
    }

    /// Current selection snapshot.
    pub fn selection(&self) -> Selection {
        self.actions.store().get_selection(self.key())
    }

    /// Selected items, in insertion order.
    pub fn items(&self) -> Vec<String> {
        self.selection().items()
    }

    pub fn selected(&self, item: &str) -> bool {
        self.actions.store().is_selected(self.key(), item)
    }

    pub fn select<S: AsRef<str>>(&self, item_keys: &[S], multiple: bool) {
        self.actions.select(item_keys, multiple);
    }

    pub fn clear(&self) {
        self.actions.clear();
    }

    /// Write-only handle for the same key.
    pub fn actions(&self) -> SelectActions {
        self.actions.clone()
    }

    /// Check if the selection changed since the last [`clear_dirty`](Self::clear_dirty).
    pub fn is_dirty(&self) -> bool {
        self.changes.is_dirty()
    }

    pub fn clear_dirty(&self) {
        self.changes.clear_dirty();
    }

    /// Number of changes observed since the view was created.
    pub fn revision(&self) -> u64 {
        self.changes.revision()
    }
}
