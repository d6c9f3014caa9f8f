//! Click-ordered selection of page (or document) indices.

use indexmap::IndexSet;

use super::PageNumber;
use crate::error::{Error, Result};

/// An ordered set of indices that remembers the order they were clicked.
///
/// Clicking an index that is already selected removes it again, so the
/// selection never contains duplicates. Iteration follows click order,
/// which is what merge and reorder output order is built from.
#[derive(Debug, Clone, Default)]
pub struct Selection {
    indices: IndexSet<usize>,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replay a sequence of clicks, toggling each index.
    pub fn from_clicks(clicks: impl IntoIterator<Item = usize>) -> Self {
        let mut selection = Self::new();
        for index in clicks {
            selection.toggle(index);
        }
        selection
    }

    /// Every index in `0..len`, in ascending order.
    pub fn all(len: usize) -> Self {
        Self {
            indices: (0..len).collect(),
        }
    }

    /// Toggle an index. Returns `true` if it is selected afterwards.
    pub fn toggle(&mut self, index: usize) -> bool {
        // shift_remove keeps the remaining click order intact
        if self.indices.shift_remove(&index) {
            false
        } else {
            self.indices.insert(index);
            true
        }
    }

    /// Add an index at the end of the click order.
    ///
    /// Returns `false` (and leaves the order untouched) if it was already selected.
    pub fn insert(&mut self, index: usize) -> bool {
        self.indices.insert(index)
    }

    /// Replace the selection with every index in `0..len`.
    pub fn select_all(&mut self, len: usize) {
        *self = Self::all(len);
    }

    pub fn clear(&mut self) {
        self.indices.clear();
    }

    pub fn contains(&self, index: usize) -> bool {
        self.indices.contains(&index)
    }

    pub fn len(&self) -> usize {
        self.indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// Indices in click order.
    pub fn iter(&self) -> impl ExactSizeIterator<Item = usize> + '_ {
        self.indices.iter().copied()
    }

    /// Indices in ascending order, regardless of click order.
    pub fn ascending(&self) -> Vec<usize> {
        let mut sorted: Vec<usize> = self.iter().collect();
        sorted.sort_unstable();
        sorted
    }

    /// 1-based page numbers in click order, for display.
    pub fn page_numbers(&self) -> Vec<PageNumber> {
        self.iter().map(PageNumber::from_index).collect()
    }

    /// Whether the selection names every index of a collection of `len` items.
    pub fn covers_all(&self, len: usize) -> bool {
        self.len() == len && self.iter().all(|i| i < len)
    }

    /// Check that every index is within `0..len`.
    pub fn validate(&self, len: usize) -> Result<()> {
        match self.iter().find(|&i| i >= len) {
            Some(index) => Err(Error::IndexOutOfRange { index, len }),
            None => Ok(()),
        }
    }

    /// Check that the selection is non-empty and within `0..len`.
    pub(crate) fn require(&self, len: usize) -> Result<()> {
        if self.is_empty() {
            return Err(Error::EmptySelection);
        }
        self.validate(len)
    }
}

// Click order is part of a selection's identity
impl PartialEq for Selection {
    fn eq(&self, other: &Self) -> bool {
        self.indices.iter().eq(other.indices.iter())
    }
}

impl Eq for Selection {}

impl<'a> IntoIterator for &'a Selection {
    type Item = usize;
    type IntoIter = std::iter::Copied<indexmap::set::Iter<'a, usize>>;

    fn into_iter(self) -> Self::IntoIter {
        self.indices.iter().copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_click_order_preserved() {
        let selection = Selection::from_clicks([3, 1, 4]);
        assert_eq!(selection.iter().collect::<Vec<_>>(), vec![3, 1, 4]);
        assert_eq!(selection.ascending(), vec![1, 3, 4]);
    }

    #[test]
    fn test_second_click_deselects() {
        let mut selection = Selection::from_clicks([2, 5, 7]);
        assert!(!selection.toggle(5));
        assert_eq!(selection.iter().collect::<Vec<_>>(), vec![2, 7]);

        // Re-selecting appends at the end
        assert!(selection.toggle(5));
        assert_eq!(selection.iter().collect::<Vec<_>>(), vec![2, 7, 5]);
    }

    #[test]
    fn test_insert_rejects_duplicates() {
        let mut selection = Selection::new();
        assert!(selection.insert(1));
        assert!(selection.insert(0));
        assert!(!selection.insert(1));
        assert_eq!(selection.iter().collect::<Vec<_>>(), vec![1, 0]);
    }

    #[test]
    fn test_select_all_and_clear() {
        let mut selection = Selection::from_clicks([4]);
        selection.select_all(3);
        assert_eq!(selection.iter().collect::<Vec<_>>(), vec![0, 1, 2]);
        assert!(selection.covers_all(3));

        selection.clear();
        assert!(selection.is_empty());
        assert!(!selection.covers_all(3));
    }

    #[test]
    fn test_validate() {
        let selection = Selection::from_clicks([0, 5]);
        assert!(selection.validate(6).is_ok());
        assert!(matches!(
            selection.validate(5),
            Err(Error::IndexOutOfRange { index: 5, len: 5 })
        ));
    }

    #[test]
    fn test_require_rejects_empty() {
        assert!(matches!(Selection::new().require(3), Err(Error::EmptySelection)));
    }

    #[test]
    fn test_page_numbers_are_one_based() {
        let selection = Selection::from_clicks([2, 0]);
        let labels: Vec<usize> = selection.page_numbers().into_iter().map(PageNumber::get).collect();
        assert_eq!(labels, vec![3, 1]);
    }

    #[test]
    fn test_equality_depends_on_click_order() {
        assert_eq!(Selection::from_clicks([1, 2]), Selection::from_clicks([1, 2]));
        assert_ne!(Selection::from_clicks([1, 2]), Selection::from_clicks([2, 1]));
    }
}
