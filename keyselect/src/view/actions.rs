use crate::store::SelectionStore;

/// Write-only facade bound to one selection key.
///
/// For consumers that change the selection but never render it, so they
/// carry no subscription at all.
#[derive(Debug, Clone)]
pub struct SelectActions {
    store: SelectionStore,
    key: String,
}

impl SelectActions {
    pub fn new(store: SelectionStore, key: impl Into<String>) -> Self {
        Self {
            store,
            key: key.into(),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn store(&self) -> &SelectionStore {
        &self.store
    }

    /// Apply a click on `item_keys`.
    pub fn select<S: AsRef<str>>(&self, item_keys: &[S], multiple: bool) {
        self.store.select(&self.key, item_keys, multiple);
    }

    /// Empty the selection.
    pub fn clear(&self) {
        self.store.clear(&self.key);
    }
}
