//! Tests for the selection store and its toggle semantics.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use keyselect::{Selection, SelectionStore, SelectionTable};

#[test]
fn test_fresh_key_is_empty() {
    let store = SelectionStore::new();
    assert!(store.items("foo").is_empty());
    assert!(!store.is_selected("foo", "anything"));
    assert!(store.get_selection("foo").ptr_eq(&Selection::empty()));
}

#[test]
fn test_read_does_not_create_key() {
    let store = SelectionStore::new();
    let _ = store.get_selection("foo");
    let _ = store.items("foo");
    assert!(!store.snapshot().contains_key("foo"));
}

#[test]
fn test_clicking_twice_selects_none() {
    let store = SelectionStore::new();
    store.select("foo", &["x"], false);
    assert_eq!(store.items("foo"), vec!["x"]);
    store.select("foo", &["x"], false);
    assert!(store.items("foo").is_empty());
}

#[test]
fn test_select_does_not_touch_other_keys() {
    let store = SelectionStore::new();
    store.select("b", &["y"], false);
    store.select("a", &["x"], false);
    store.select("a", &["z"], true);
    store.clear("a");
    assert_eq!(store.items("b"), vec!["y"]);
}

#[test]
fn test_multiple_adds_in_insertion_order() {
    let store = SelectionStore::new();
    store.select("foo", &["one"], false);
    assert_eq!(store.items("foo"), vec!["one"]);
    store.select("foo", &["two"], true);
    assert_eq!(store.items("foo"), vec!["one", "two"]);
}

#[test]
fn test_batch_all_selected_deselects_group() {
    let store = SelectionStore::new();
    store.set_selection("foo", ["one", "two"].into_iter().collect());
    store.select("foo", &["one", "two"], true);
    assert!(store.items("foo").is_empty());
}

#[test]
fn test_non_multiple_replaces() {
    let store = SelectionStore::new();
    store.set_selection("foo", ["one"].into_iter().collect());
    store.select("foo", &["two"], false);
    assert_eq!(store.items("foo"), vec!["two"]);
}

#[test]
fn test_clear_keeps_key_with_empty_selection() {
    let store = SelectionStore::new();
    store.select("foo", &["one", "two"], false);
    store.clear("foo");
    assert!(store.items("foo").is_empty());
    assert!(store.snapshot().contains_key("foo"));
    assert_eq!(store.get_selection("foo").entry_count(), 0);
}

#[test]
fn test_clear_matches_empty_click() {
    let a = SelectionStore::new();
    let b = SelectionStore::new();
    for store in [&a, &b] {
        store.select("foo", &["one"], false);
        store.select("foo", &["two"], true);
    }
    a.clear("foo");
    b.select::<&str>("foo", &[], false);
    assert_eq!(a.get_selection("foo"), b.get_selection("foo"));
}

#[test]
fn test_ctrl_click_scenario() {
    let store = SelectionStore::new();
    store.select("foo", &["one"], false);
    store.select("foo", &["two"], true);
    assert_eq!(store.items("foo"), vec!["one", "two"]);
}

#[test]
fn test_old_snapshot_is_unchanged_by_writes() {
    let store = SelectionStore::new();
    store.select("foo", &["one"], false);
    let before = store.get_selection("foo");

    store.select("foo", &["two"], true);
    store.clear("foo");

    assert_eq!(before.items(), vec!["one"]);
    assert!(!before.ptr_eq(&store.get_selection("foo")));
}

#[test]
fn test_merge_replaces_only_given_keys() {
    let store = SelectionStore::new();
    store.select("a", &["x"], false);
    store.select("b", &["y"], false);

    let partial: SelectionTable = [("a".to_string(), ["z"].into_iter().collect::<Selection>())]
        .into_iter()
        .collect();
    store.merge(partial);

    assert_eq!(store.items("a"), vec!["z"]);
    assert_eq!(store.items("b"), vec!["y"]);
}

#[test]
fn test_clones_share_state() {
    let store = SelectionStore::new();
    let other = store.clone();
    other.select("foo", &["one"], false);
    assert_eq!(store.items("foo"), vec!["one"]);
}

#[test]
fn test_subscribe_key_ignores_other_keys() {
    let store = SelectionStore::new();
    let evaluated = Arc::new(AtomicUsize::new(0));
    let notified = Arc::new(AtomicUsize::new(0));

    let _subscription = store.subscribe_key(
        "foo",
        {
            let evaluated = evaluated.clone();
            move |selection: &Selection| {
                evaluated.fetch_add(1, Ordering::SeqCst);
                selection.clone()
            }
        },
        {
            let notified = notified.clone();
            move |_: &Selection| {
                notified.fetch_add(1, Ordering::SeqCst);
            }
        },
    );
    let seeded = evaluated.load(Ordering::SeqCst);

    store.select("bar", &["x"], false);
    store.select("bar", &["y"], true);
    assert_eq!(evaluated.load(Ordering::SeqCst), seeded);
    assert_eq!(notified.load(Ordering::SeqCst), 0);

    store.select("foo", &["x"], false);
    assert_eq!(notified.load(Ordering::SeqCst), 1);
}

#[test]
fn test_subscribe_only_fires_on_derived_change() {
    let store = SelectionStore::new();
    let counts = Arc::new(std::sync::Mutex::new(Vec::new()));

    let _subscription = store.subscribe(
        |table: &SelectionTable| table.iter().map(|(_, s)| s.selected_count()).sum::<usize>(),
        {
            let counts = counts.clone();
            move |count: &usize| counts.lock().unwrap().push(*count)
        },
    );

    store.select("a", &["x"], false);
    store.select("b", &["y", "z"], false);
    store.select("b", &["y"], true);
    store.select("a", &["w"], true);
    // Swaps "z" for "q", total stays at 3.
    store.select("b", &["q"], false);
    store.clear("a");

    assert_eq!(*counts.lock().unwrap(), vec![1, 3, 2, 3, 1]);
}

#[test]
fn test_clearing_empty_key_does_not_notify() {
    let store = SelectionStore::new();
    let notified = Arc::new(AtomicUsize::new(0));
    let _subscription = store.subscribe_key("foo", Selection::clone, {
        let notified = notified.clone();
        move |_: &Selection| {
            notified.fetch_add(1, Ordering::SeqCst);
        }
    });

    store.clear("foo");
    store.clear("foo");
    assert_eq!(notified.load(Ordering::SeqCst), 0);
}

#[test]
fn test_dropping_subscription_unsubscribes() {
    let store = SelectionStore::new();
    let notified = Arc::new(AtomicUsize::new(0));
    let subscription = store.subscribe_key("foo", Selection::clone, {
        let notified = notified.clone();
        move |_: &Selection| {
            notified.fetch_add(1, Ordering::SeqCst);
        }
    });

    store.select("foo", &["one"], false);
    drop(subscription);
    store.select("foo", &["two"], false);

    assert_eq!(notified.load(Ordering::SeqCst), 1);
}

#[test]
fn test_callback_may_write_to_store() {
    let store = SelectionStore::new();
    let mirror = store.clone();
    let _subscription = store.subscribe_key(
        "source",
        Selection::clone,
        move |selection: &Selection| {
            mirror.set_selection("mirror", selection.clone());
        },
    );

    store.select("source", &["one"], false);
    store.select("source", &["two"], true);

    assert_eq!(store.items("mirror"), vec!["one", "two"]);
}
