//! The table of selections, keyed by selection key.

use std::collections::HashMap;

use serde::Deserialize;
use serde::Serialize;

use crate::selection::Selection;

/// Mapping from selection key to its current [`Selection`].
///
/// Looking up an absent key yields the canonical empty selection and never
/// inserts it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SelectionTable {
    selections: HashMap<String, Selection>,
}

impl SelectionTable {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the selection for a key, or the empty selection.
    pub fn get(&self, key: &str) -> Selection {
        self.selections
            .get(key)
            .cloned()
            .unwrap_or_else(Selection::empty)
    }

    /// Replace the selection for a key.
    pub fn insert(&mut self, key: impl Into<String>, selection: Selection) {
        self.selections.insert(key.into(), selection);
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.selections.contains_key(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.selections.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Selection)> {
        self.selections
            .iter()
            .map(|(key, selection)| (key.as_str(), selection))
    }

    pub fn len(&self) -> usize {
        self.selections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.selections.is_empty()
    }
}

impl FromIterator<(String, Selection)> for SelectionTable {
    fn from_iter<I: IntoIterator<Item = (String, Selection)>>(iter: I) -> Self {
        Self {
            selections: iter.into_iter().collect(),
        }
    }
}
