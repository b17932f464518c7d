//! The shared selection table and its write path.
//!
//! Writes install a new [`Selection`] under the table lock, queue it for
//! persistence, then notify subscribers and the wakeup sender with no lock
//! held.

use std::sync::{Arc, Mutex, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::persist::Persister;
use crate::selection::Selection;
use crate::subscription::{self, SharedSubscribers, Subscribers, Subscription};
use crate::table::SelectionTable;
use crate::wakeup::WakeupSender;

/// Shared selection state for every selection key.
///
/// `SelectionStore` is a cheap-to-clone handle: clones share the same
/// table, subscribers and persister. Construct one at wiring time and hand
/// clones to the views that need it.
///
/// Every write replaces one key's [`Selection`] with a new snapshot.
/// Snapshots handed out earlier are never touched.
///
/// # Example
///
/// ```
/// use keyselect::SelectionStore;
///
/// let store = SelectionStore::new();
/// store.select("files", &["one"], false);
/// store.select("files", &["two"], true);
/// assert_eq!(store.items("files"), vec!["one", "two"]);
/// ```
#[derive(Clone, Default)]
pub struct SelectionStore {
    inner: Arc<Inner>,
}

#[derive(Default)]
struct Inner {
    table: RwLock<SelectionTable>,
    subscribers: SharedSubscribers,
    persister: Option<Persister>,
    wakeup: Mutex<Option<WakeupSender>>,
}

impl SelectionStore {
    /// Create an empty, purely in-memory store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an in-memory store seeded with `table`.
    pub fn with_table(table: SelectionTable) -> Self {
        Self::build(table, None)
    }

    /// Create a store seeded with `table` whose writes are persisted.
    pub fn persisted(table: SelectionTable, persister: Persister) -> Self {
        Self::build(table, Some(persister))
    }

    fn build(table: SelectionTable, persister: Option<Persister>) -> Self {
        Self {
            inner: Arc::new(Inner {
                table: RwLock::new(table),
                subscribers: Arc::new(Mutex::new(Subscribers::default())),
                persister,
                wakeup: Mutex::new(None),
            }),
        }
    }

    /// Returns `true` if writes to this store are persisted.
    pub fn is_persisted(&self) -> bool {
        self.inner.persister.is_some()
    }

    /// Get the current selection for `key`.
    ///
    /// Absent keys yield the empty selection; the table is not modified.
    pub fn get_selection(&self, key: &str) -> Selection {
        self.read().get(key)
    }

    /// Selected items for `key`, in insertion order.
    pub fn items(&self, key: &str) -> Vec<String> {
        self.get_selection(key).items()
    }

    /// Check whether `item` is selected under `key`.
    pub fn is_selected(&self, key: &str, item: &str) -> bool {
        self.read().get(key).is_selected(item)
    }

    /// Replace the selection for `key` with `selection`.
    pub fn set_selection(&self, key: &str, selection: Selection) {
        self.write(key, |_| selection);
    }

    /// Apply a click on `item_keys` under `key`.
    ///
    /// See [`Selection::toggled`] for the rules.
    pub fn select<S: AsRef<str>>(&self, key: &str, item_keys: &[S], multiple: bool) {
        self.write(key, |current| current.toggled(item_keys, multiple));
    }

    /// Empty the selection for `key`. The key stays in the table.
    pub fn clear(&self, key: &str) {
        self.select::<&str>(key, &[], false);
    }

    /// Get a copy of the whole table.
    pub fn snapshot(&self) -> SelectionTable {
        self.read().clone()
    }

    /// Install every selection in `partial`, leaving other keys untouched.
    pub fn merge(&self, partial: SelectionTable) {
        for (key, selection) in partial.iter() {
            self.set_selection(key, selection.clone());
        }
    }

    /// Subscribe to a value derived from the whole table.
    ///
    /// `on_change` runs after every write that changes the derived value.
    pub fn subscribe<T, S, F>(&self, selector: S, on_change: F) -> Subscription
    where
        T: PartialEq + Clone + Send + 'static,
        S: Fn(&SelectionTable) -> T + Send + Sync + 'static,
        F: Fn(&T) + Send + Sync + 'static,
    {
        subscription::register(
            &self.inner.subscribers,
            &self.inner.table,
            None,
            selector,
            on_change,
        )
    }

    /// Subscribe to a value derived from one key's selection.
    ///
    /// Writes to other keys never evaluate `selector`.
    pub fn subscribe_key<T, S, F>(&self, key: &str, selector: S, on_change: F) -> Subscription
    where
        T: PartialEq + Clone + Send + 'static,
        S: Fn(&Selection) -> T + Send + Sync + 'static,
        F: Fn(&T) + Send + Sync + 'static,
    {
        subscription::register(
            &self.inner.subscribers,
            &self.inner.table,
            Some(key.to_string()),
            subscription::keyed(key.to_string(), selector),
            on_change,
        )
    }

    /// Install a wakeup sender. Every effective write reports its key.
    ///
    /// Replaces any previously installed sender.
    pub fn install_wakeup(&self, sender: WakeupSender) {
        *self
            .inner
            .wakeup
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner()) = Some(sender);
    }

    /// Wait until queued durable writes have been attempted.
    ///
    /// Returns immediately for in-memory stores.
    pub async fn flush(&self) -> Result<(), crate::Error> {
        match &self.inner.persister {
            Some(persister) => persister.flush().await,
            None => Ok(()),
        }
    }

    fn write(&self, key: &str, f: impl FnOnce(&Selection) -> Selection) {
        {
            let mut table = self.write_lock();
            let current = table.get(key);
            let next = f(&current);
            if next.ptr_eq(&current) && table.contains_key(key) {
                return;
            }
            log::trace!(
                "selection {:?}: {} -> {} selected",
                key,
                current.selected_count(),
                next.selected_count()
            );
            table.insert(key, next);

            // Queue while still locked so durable writes keep call order.
            if let Some(persister) = &self.inner.persister {
                persister.save(&table);
            }
        }

        // Subscribers read the live table, so a write made by an earlier
        // callback is what later subscribers see.
        subscription::notify(&self.inner.subscribers, key, &self.inner.table);

        let wakeup = self
            .inner
            .wakeup
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone();
        if let Some(sender) = wakeup {
            sender.send(key);
        }
    }

    fn read(&self) -> RwLockReadGuard<'_, SelectionTable> {
        subscription::read(&self.inner.table)
    }

    fn write_lock(&self) -> RwLockWriteGuard<'_, SelectionTable> {
        self.inner
            .table
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl std::fmt::Debug for SelectionStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SelectionStore")
            .field("table", &*self.read())
            .field("persisted", &self.is_persisted())
            .finish()
    }
}
