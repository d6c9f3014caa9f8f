//! Reorder destination.

use std::fmt;

use super::{PageNumber, Selection};

/// Where moved pages are reinserted during a reorder.
///
/// `After` holds the page's index *before* the selected pages are removed,
/// which is how the user picked it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Anchor {
    /// Insert at the very beginning of the document.
    Start,
    /// Insert immediately after this (unselected) page.
    After(usize),
}

impl Anchor {
    /// Decode the positional form: `0` is the start, `k` is "after the page
    /// at index `k - 1`".
    pub const fn from_position(position: usize) -> Self {
        match position {
            0 => Self::Start,
            k => Self::After(k - 1),
        }
    }

    /// The anchors that make sense for a collection of `len` pages given the
    /// current selection: the start, then every unselected page in order.
    pub fn candidates(len: usize, selection: &Selection) -> Vec<Self> {
        std::iter::once(Self::Start)
            .chain((0..len).filter(|&i| !selection.contains(i)).map(Self::After))
            .collect()
    }
}

impl fmt::Display for Anchor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Start => write!(f, "start of document"),
            Self::After(index) => write!(f, "after page {}", PageNumber::from_index(*index)),
        }
    }
}
