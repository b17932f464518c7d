//! Immutable selection snapshots.
//!
//! A [`Selection`] maps item identifiers to their selected state for one
//! selection key. Snapshots are never mutated after construction: every
//! change produces a new snapshot, so holders of an old one always see a
//! consistent view and identity comparison is a valid change check.

use std::fmt;
use std::sync::Arc;
use std::sync::LazyLock;

use indexmap::IndexMap;
use serde::Deserialize;
use serde::Serialize;

static EMPTY: LazyLock<Selection> = LazyLock::new(|| Selection(Arc::new(IndexMap::new())));

/// Insertion-ordered mapping from item identifier to "is selected".
///
/// An entry with `false` is equivalent to no entry at all; every read
/// filters for truthy values.
#[derive(Clone, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Selection(Arc<IndexMap<String, bool>>);

impl Selection {
    /// The canonical empty selection.
    ///
    /// All calls share one allocation, so `ptr_eq` holds between them.
    pub fn empty() -> Self {
        EMPTY.clone()
    }

    /// Returns `true` if both snapshots are the same allocation.
    pub fn ptr_eq(&self, other: &Selection) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }

    /// Check if an item is selected.
    pub fn is_selected(&self, item: &str) -> bool {
        self.0.get(item).copied().unwrap_or(false)
    }

    /// Raw entry for an item, including explicit `false` entries.
    pub fn get(&self, item: &str) -> Option<bool> {
        self.0.get(item).copied()
    }

    /// Selected item identifiers in insertion order.
    pub fn items(&self) -> Vec<String> {
        self.iter_selected().map(str::to_string).collect()
    }

    /// Iterate over selected item identifiers in insertion order.
    pub fn iter_selected(&self) -> impl Iterator<Item = &str> {
        self.0
            .iter()
            .filter(|(_, selected)| **selected)
            .map(|(item, _)| item.as_str())
    }

    /// Number of selected items.
    pub fn selected_count(&self) -> usize {
        self.0.values().filter(|selected| **selected).count()
    }

    /// Returns `true` if no item is selected.
    pub fn is_empty(&self) -> bool {
        !self.0.values().any(|selected| *selected)
    }

    /// Number of raw entries, including deselected ones.
    pub fn entry_count(&self) -> usize {
        self.0.len()
    }

    /// Apply a click on `item_keys` and return the resulting snapshot.
    ///
    /// If every clicked item is already selected they are all deselected,
    /// otherwise they are all selected. With `multiple` the rest of the
    /// selection is kept; without it the result holds only the clicked
    /// items. An empty click without `multiple` therefore clears.
    pub fn toggled<S: AsRef<str>>(&self, item_keys: &[S], multiple: bool) -> Selection {
        let all_selected = item_keys
            .iter()
            .all(|item| self.is_selected(item.as_ref()));

        let mut next = if multiple {
            (*self.0).clone()
        } else {
            IndexMap::with_capacity(item_keys.len())
        };

        for item in item_keys {
            next.insert(item.as_ref().to_string(), !all_selected);
        }

        Selection(Arc::new(next))
    }
}

impl Default for Selection {
    fn default() -> Self {
        Self::empty()
    }
}

impl PartialEq for Selection {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other) || self.0 == other.0
    }
}

impl Eq for Selection {}

impl fmt::Debug for Selection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.0.iter()).finish()
    }
}

impl FromIterator<(String, bool)> for Selection {
    fn from_iter<I: IntoIterator<Item = (String, bool)>>(iter: I) -> Self {
        Selection(Arc::new(iter.into_iter().collect()))
    }
}

impl FromIterator<String> for Selection {
    fn from_iter<I: IntoIterator<Item = String>>(iter: I) -> Self {
        iter.into_iter().map(|item| (item, true)).collect()
    }
}

impl<'a> FromIterator<&'a str> for Selection {
    fn from_iter<I: IntoIterator<Item = &'a str>>(iter: I) -> Self {
        iter.into_iter().map(str::to_string).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sel(entries: &[(&str, bool)]) -> Selection {
        entries
            .iter()
            .map(|(item, selected)| (item.to_string(), *selected))
            .collect()
    }

    #[test]
    fn test_empty_is_canonical() {
        assert!(Selection::empty().ptr_eq(&Selection::empty()));
        assert!(Selection::default().ptr_eq(&Selection::empty()));
        assert!(Selection::empty().items().is_empty());
    }

    #[test]
    fn test_false_entries_are_not_selected() {
        let selection = sel(&[("one", true), ("two", false), ("three", true)]);
        assert_eq!(selection.items(), vec!["one", "three"]);
        assert!(!selection.is_selected("two"));
        assert_eq!(selection.get("two"), Some(false));
        assert_eq!(selection.selected_count(), 2);
        assert_eq!(selection.entry_count(), 3);
    }

    #[test]
    fn test_single_click_toggles() {
        let once = Selection::empty().toggled(&["x"], false);
        assert_eq!(once.items(), vec!["x"]);

        let twice = once.toggled(&["x"], false);
        assert!(twice.is_empty());
    }

    #[test]
    fn test_single_click_replaces() {
        let selection = sel(&[("one", true)]).toggled(&["two"], false);
        assert_eq!(selection.items(), vec!["two"]);
        assert_eq!(selection.get("one"), None);
    }

    #[test]
    fn test_multiple_adds_in_insertion_order() {
        let selection = sel(&[("one", true)]).toggled(&["two"], true);
        assert_eq!(selection.items(), vec!["one", "two"]);
    }

    #[test]
    fn test_multiple_batch_all_selected_deselects() {
        let selection = sel(&[("one", true), ("two", true), ("three", true)]);
        let next = selection.toggled(&["one", "two"], true);
        assert_eq!(next.items(), vec!["three"]);
    }

    #[test]
    fn test_multiple_batch_partially_selected_selects_all() {
        let selection = sel(&[("one", true)]);
        let next = selection.toggled(&["one", "two"], true);
        assert_eq!(next.items(), vec!["one", "two"]);
    }

    #[test]
    fn test_reselect_keeps_original_position() {
        let selection = sel(&[("one", false), ("two", true)]);
        let next = selection.toggled(&["one"], true);
        assert_eq!(next.items(), vec!["one", "two"]);
    }

    #[test]
    fn test_empty_click_clears() {
        let selection = sel(&[("one", true), ("two", true)]);
        let next = selection.toggled::<&str>(&[], false);
        assert_eq!(next.entry_count(), 0);
    }

    #[test]
    fn test_toggle_leaves_source_untouched() {
        let selection = sel(&[("one", true)]);
        let _ = selection.toggled(&["two"], true);
        assert_eq!(selection.items(), vec!["one"]);
    }

    #[test]
    fn test_equality() {
        let a = sel(&[("one", true)]);
        let b = sel(&[("one", true)]);
        assert!(!a.ptr_eq(&b));
        assert_eq!(a, b);
        assert_ne!(a, sel(&[("one", false)]));
    }
}
