//! Change subscriptions on a [`SelectionStore`](crate::SelectionStore).
//!
//! A subscriber derives a value from the table (or from one key's
//! selection) and is called back only when that derived value changes.

use std::sync::{Arc, Mutex, RwLock, RwLockReadGuard, Weak};

use crate::selection::Selection;
use crate::table::SelectionTable;

type Check = Box<dyn Fn(&RwLock<SelectionTable>) + Send + Sync>;

struct Entry {
    id: u64,
    /// Key this subscriber is scoped to. `None` means every write.
    scope: Option<String>,
    check: Check,
}

/// Registered subscribers of one store.
#[derive(Default)]
pub(crate) struct Subscribers {
    next_id: u64,
    entries: Vec<Arc<Entry>>,
}

pub(crate) type SharedSubscribers = Arc<Mutex<Subscribers>>;

impl Subscribers {
    fn insert(&mut self, scope: Option<String>, check: Check) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        self.entries.push(Arc::new(Entry { id, scope, check }));
        id
    }

    fn remove(&mut self, id: u64) {
        self.entries.retain(|entry| entry.id != id);
    }

    /// Entries interested in a write to `key`, in registration order.
    fn interested(&self, key: &str) -> Vec<Arc<Entry>> {
        self.entries
            .iter()
            .filter(|entry| entry.scope.as_deref().is_none_or(|scope| scope == key))
            .cloned()
            .collect()
    }
}

/// Register a subscriber and return its handle.
///
/// The selector is evaluated once up front to seed the last-seen value. The
/// table stays read-locked until the entry is registered, so no write can
/// slip in between.
pub(crate) fn register<T, S, F>(
    subscribers: &SharedSubscribers,
    table: &RwLock<SelectionTable>,
    scope: Option<String>,
    selector: S,
    on_change: F,
) -> Subscription
where
    T: PartialEq + Clone + Send + 'static,
    S: Fn(&SelectionTable) -> T + Send + Sync + 'static,
    F: Fn(&T) + Send + Sync + 'static,
{
    let guard = read(table);
    let last = Mutex::new(selector(&guard));
    let check: Check = Box::new(move |table| {
        // Derive from the live table with `last` held, so a notification
        // that runs late can never replace a newer value with an older one.
        let value = {
            let mut last = last.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
            let value = selector(&read(table));
            if *last == value {
                return;
            }
            *last = value.clone();
            value
        };
        on_change(&value);
    });

    let id = lock(subscribers).insert(scope, check);
    drop(guard);
    Subscription {
        subscribers: Arc::downgrade(subscribers),
        id,
    }
}

/// Run the subscribers interested in a write to `key`.
///
/// The registry lock is released before any callback runs, so callbacks may
/// subscribe, unsubscribe, or write to the store. Selectors must not write.
pub(crate) fn notify(
    subscribers: &SharedSubscribers,
    key: &str,
    table: &RwLock<SelectionTable>,
) {
    let interested = lock(subscribers).interested(key);
    for entry in interested {
        (entry.check)(table);
    }
}

/// Scoped selector over a single key's selection.
pub(crate) fn keyed<T, S>(
    key: String,
    selector: S,
) -> impl Fn(&SelectionTable) -> T + Send + Sync + 'static
where
    T: 'static,
    S: Fn(&Selection) -> T + Send + Sync + 'static,
{
    move |table| selector(&table.get(&key))
}

pub(crate) fn read(table: &RwLock<SelectionTable>) -> RwLockReadGuard<'_, SelectionTable> {
    table.read().unwrap_or_else(|poisoned| poisoned.into_inner())
}

fn lock(subscribers: &SharedSubscribers) -> std::sync::MutexGuard<'_, Subscribers> {
    subscribers
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// Handle for a registered subscriber. Dropping it unsubscribes.
#[must_use = "dropping a Subscription unsubscribes immediately"]
pub struct Subscription {
    subscribers: Weak<Mutex<Subscribers>>,
    id: u64,
}

impl Subscription {
    /// Unsubscribe explicitly.
    pub fn cancel(self) {}
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription").field("id", &self.id).finish()
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(subscribers) = self.subscribers.upgrade() {
            lock(&subscribers).remove(self.id);
        }
    }
}
