use super::{Changes, SelectActions};
use crate::selection::Selection;
use crate::store::SelectionStore;
use crate::subscription::Subscription;

/// Facade over a single item of one selection key.
///
/// Only flips of this item's selected state mark the view dirty; changes
/// to sibling items do not.
#[derive(Debug)]
pub struct ItemView {
    actions: SelectActions,
    item: String,
    changes: Changes,
    _subscription: Subscription,
}

impl ItemView {
    pub fn new(store: SelectionStore, key: impl Into<String>, item: impl Into<String>) -> Self {
        let key = key.into();
        let item = item.into();
        let changes = Changes::default();
        let subscription = store.subscribe_key(
            &key,
            {
                let item = item.clone();
                move |selection: &Selection| selection.is_selected(&item)
            },
            {
                let changes = changes.clone();
                move |_: &bool| changes.mark()
            },
        );

        Self {
            actions: SelectActions::new(store, key),
            item,
            changes,
            _subscription: subscription,
        }
    }

    pub fn key(&self) -> &str {
        self.actions.key()
    }

    pub fn item(&self) -> &str {
        &self.item
    }

    pub fn selected(&self) -> bool {
        self.actions.store().is_selected(self.key(), &self.item)
    }

    /// Click this item.
    pub fn select(&self, multiple: bool) {
        self.actions.select(&[self.item.as_str()], multiple);
    }

    /// Empty the whole selection this item belongs to.
    pub fn clear(&self) {
        self.actions.clear();
    }

    pub fn is_dirty(&self) -> bool {
        self.changes.is_dirty()
    }

    pub fn clear_dirty(&self) {
        self.changes.clear_dirty();
    }

    /// Number of selected-state flips observed since the view was created.
    pub fn revision(&self) -> u64 {
        self.changes.revision()
    }
}
