//! Chaining edits: each edit applies to the result of the previous one.
//!
//! An [`EditSession`] holds only two collections (the original document and
//! the current result) plus the pending selection. Applying an edit either
//! replaces the current collection or fails and leaves everything as it was.

use std::fmt;

use tracing::info;

use crate::config::OutputConfig;
use crate::error::{Error, Result};
use crate::ops;
use crate::pages::{Anchor, PageCollection, Rotation, Selection};
use crate::pdf::{PdfDocument, PdfWriter};

/// A single-document edit, parameterized by everything except the selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Edit {
    Rotate(Rotation),
    Reorder(Anchor),
    Delete,
    Extract,
}

/// The kind of an [`Edit`], without parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EditKind {
    Rotate,
    Reorder,
    Delete,
    Extract,
}

impl EditKind {
    /// Suffix appended to the input file stem when saving the result.
    pub const fn file_suffix(self) -> &'static str {
        match self {
            Self::Rotate => "_rotated",
            Self::Reorder => "_reordered",
            Self::Delete => "_deleted",
            Self::Extract => "_extracted",
        }
    }
}

impl fmt::Display for EditKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Rotate => "rotate",
            Self::Reorder => "reorder",
            Self::Delete => "delete",
            Self::Extract => "extract",
        };
        f.write_str(name)
    }
}

impl Edit {
    pub const fn kind(self) -> EditKind {
        match self {
            Self::Rotate(_) => EditKind::Rotate,
            Self::Reorder(_) => EditKind::Reorder,
            Self::Delete => EditKind::Delete,
            Self::Extract => EditKind::Extract,
        }
    }

    /// Run this edit against `pages`.
    pub fn apply(self, pages: &PageCollection, selection: &Selection) -> Result<PageCollection> {
        match self {
            Self::Rotate(delta) => ops::rotate(pages, selection, delta),
            Self::Reorder(anchor) => ops::reorder(pages, selection, anchor),
            Self::Delete => ops::delete(pages, selection),
            Self::Extract => ops::extract(pages, selection),
        }
    }
}

/// An edit together with the selection it applies to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditStep {
    pub edit: Edit,
    pub selection: Selection,
}

impl EditStep {
    pub const fn new(edit: Edit, selection: Selection) -> Self {
        Self { edit, selection }
    }
}

/// Apply `steps` in order, each to the previous step's output.
///
/// Stops at the first failing step and reports its position (0-based).
pub fn apply_edits(start: &PageCollection, steps: &[EditStep]) -> std::result::Result<PageCollection, (usize, Error)> {
    steps
        .iter()
        .enumerate()
        .try_fold(start.clone(), |pages, (position, step)| {
            step.edit
                .apply(&pages, &step.selection)
                .map_err(|e| (position, e))
        })
}

/// Edits applied in sequence to one document, resettable to the original.
pub struct EditSession {
    original: PageCollection,
    current: PageCollection,
    selection: Selection,
    edits_applied: usize,
}

impl EditSession {
    pub fn new(original: PageCollection) -> Self {
        Self {
            current: original.clone(),
            original,
            selection: Selection::new(),
            edits_applied: 0,
        }
    }

    pub fn from_document(document: PdfDocument) -> Self {
        Self::new(PageCollection::from_document(document))
    }

    /// The result of the most recent edit (the original before any edit).
    pub const fn current(&self) -> &PageCollection {
        &self.current
    }

    pub const fn original(&self) -> &PageCollection {
        &self.original
    }

    pub const fn selection(&self) -> &Selection {
        &self.selection
    }

    pub const fn edits_applied(&self) -> usize {
        self.edits_applied
    }

    pub const fn is_modified(&self) -> bool {
        self.edits_applied > 0
    }

    /// Toggle a page of the current collection. Returns whether it is now selected.
    pub fn toggle(&mut self, index: usize) -> Result<bool> {
        if index >= self.current.len() {
            return Err(Error::IndexOutOfRange {
                index,
                len: self.current.len(),
            });
        }
        Ok(self.selection.toggle(index))
    }

    pub fn select_all(&mut self) {
        self.selection.select_all(self.current.len());
    }

    pub fn clear_selection(&mut self) {
        self.selection.clear();
    }

    /// Anchors the user may pick for a reorder of the current selection.
    pub fn anchor_candidates(&self) -> Vec<Anchor> {
        Anchor::candidates(self.current.len(), &self.selection)
    }

    /// Edits that make sense for the current collection.
    ///
    /// A single-page document can only be extracted from, never deleted from.
    pub fn available_actions(&self) -> Vec<EditKind> {
        let mut actions = vec![EditKind::Rotate, EditKind::Reorder];
        if self.current.len() > 1 {
            actions.push(EditKind::Delete);
        }
        actions.push(EditKind::Extract);
        actions
    }

    /// Apply an edit to the current collection using the pending selection.
    ///
    /// On success the selection is cleared, since its indices referred to
    /// the previous collection. On failure nothing changes.
    pub fn apply(&mut self, edit: Edit) -> Result<&PageCollection> {
        let next = edit.apply(&self.current, &self.selection)?;
        let selected = self.selection.len();
        Ok(self.commit(edit, selected, next))
    }

    /// Apply an edit with an explicit selection instead of the pending one.
    ///
    /// The pending selection is cleared on success and kept on failure.
    pub fn apply_with(&mut self, edit: Edit, selection: &Selection) -> Result<&PageCollection> {
        let next = edit.apply(&self.current, selection)?;
        Ok(self.commit(edit, selection.len(), next))
    }

    fn commit(&mut self, edit: Edit, selected: usize, next: PageCollection) -> &PageCollection {
        info!(
            "Applied {} to {} pages -> {} pages",
            edit.kind(),
            selected,
            next.len()
        );

        self.current = next;
        self.selection.clear();
        self.edits_applied += 1;
        &self.current
    }

    /// Discard every edit and the pending selection.
    pub fn reset(&mut self) {
        info!("Reset to original ({} edits discarded)", self.edits_applied);
        self.current = self.original.clone();
        self.selection.clear();
        self.edits_applied = 0;
    }

    /// Serialize the current collection.
    pub fn encode(&self, options: &OutputConfig) -> Result<Vec<u8>> {
        PdfWriter::new(options.clone()).encode(&self.current)
    }
}
