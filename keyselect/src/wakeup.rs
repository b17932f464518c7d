//! Change signals for UI loops.
//!
//! Stores report every key they install a new selection for. The receiver
//! collects them into a set, so a burst of clicks on one list becomes a
//! single entry and the loop re-renders only the lists that changed.

use std::sync::{Arc, Mutex};

use indexmap::IndexSet;
use tokio::sync::Notify;

use crate::hub::Persistence;

/// A selection key that changed, and the store it changed in.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Changed {
    pub store: Persistence,
    pub key: String,
}

#[derive(Debug, Default)]
struct Pending {
    keys: Mutex<IndexSet<Changed>>,
    notify: Notify,
}

/// Reports changed keys. Clones feed the same receiver.
#[derive(Debug, Clone)]
pub struct WakeupSender {
    pending: Arc<Pending>,
    store: Persistence,
}

impl WakeupSender {
    /// A sender feeding the same receiver that tags keys with `store`.
    pub fn for_store(&self, store: Persistence) -> Self {
        Self {
            pending: Arc::clone(&self.pending),
            store,
        }
    }

    /// Record that `key` changed. Never blocks.
    pub fn send(&self, key: &str) {
        let changed = Changed {
            store: self.store,
            key: key.to_string(),
        };
        let fresh = self
            .pending
            .keys
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .insert(changed);
        if fresh {
            self.pending.notify.notify_one();
        }
    }
}

/// Collects changed keys for one UI loop.
#[derive(Debug)]
pub struct WakeupReceiver {
    pending: Arc<Pending>,
}

impl WakeupReceiver {
    /// Take every key changed since the last call, oldest first.
    pub fn take_changed(&self) -> Vec<Changed> {
        let mut keys = self
            .pending
            .keys
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        keys.drain(..).collect()
    }

    /// Wait until at least one key changed, then take them all.
    pub async fn changed(&self) -> Vec<Changed> {
        loop {
            let changed = self.take_changed();
            if !changed.is_empty() {
                return changed;
            }
            self.pending.notify.notified().await;
        }
    }
}

/// Create a connected sender and receiver.
///
/// The sender tags keys as [`Persistence::Ephemeral`] until retagged with
/// [`WakeupSender::for_store`].
pub fn channel() -> (WakeupSender, WakeupReceiver) {
    let pending = Arc::new(Pending::default());
    let sender = WakeupSender {
        pending: Arc::clone(&pending),
        store: Persistence::Ephemeral,
    };
    (sender, WakeupReceiver { pending })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn changed(store: Persistence, key: &str) -> Changed {
        Changed {
            store,
            key: key.to_string(),
        }
    }

    #[test]
    fn test_repeated_keys_collapse() {
        let (tx, rx) = channel();
        tx.send("files");
        tx.send("rows");
        tx.send("files");

        assert_eq!(
            rx.take_changed(),
            vec![
                changed(Persistence::Ephemeral, "files"),
                changed(Persistence::Ephemeral, "rows"),
            ]
        );
        assert!(rx.take_changed().is_empty());
    }

    #[test]
    fn test_same_key_in_both_stores_is_kept_apart() {
        let (tx, rx) = channel();
        tx.for_store(Persistence::Durable).send("files");
        tx.send("files");

        assert_eq!(rx.take_changed().len(), 2);
    }

    #[tokio::test]
    async fn test_changed_waits_for_a_send() {
        let (tx, rx) = channel();
        let waiter = tokio::spawn(async move { rx.changed().await });
        tokio::task::yield_now().await;
        tx.send("files");

        let keys = waiter.await.unwrap();
        assert_eq!(keys, vec![changed(Persistence::Ephemeral, "files")]);
    }
}
