use std::sync::Arc;

use super::{PageNumber, Rotation};
use crate::error::{Error, Result};
use crate::pdf::PdfDocument;

/// One page of a collection: which source page it is, plus the rotation
/// accumulated by edits in this session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PageRef {
    source: usize,
    page: usize,
    rotation: Rotation,
}

impl PageRef {
    pub(crate) const fn new(source: usize, page: usize) -> Self {
        Self {
            source,
            page,
            rotation: Rotation::None,
        }
    }

    /// Index of the source document within the collection's sources.
    pub const fn source(&self) -> usize {
        self.source
    }

    /// 0-based index of the page within its source document.
    pub const fn source_page(&self) -> usize {
        self.page
    }

    /// Rotation applied on top of whatever the source file specifies.
    pub const fn rotation(&self) -> Rotation {
        self.rotation
    }

    #[must_use]
    pub(crate) const fn rotated(self, delta: Rotation) -> Self {
        Self {
            rotation: self.rotation.then(delta),
            ..self
        }
    }
}

/// An immutable, ordered list of pages drawn from one or more documents.
///
/// Positions are dense and 0-based; a page's position is its identity for
/// the lifetime of the collection. Cloning is O(1): both the sources and the
/// page list sit behind `Arc`, and every transform returns a new collection.
#[derive(Clone)]
pub struct PageCollection {
    sources: Arc<[PdfDocument]>,
    pages: Arc<[PageRef]>,
}

impl PageCollection {
    /// Every page of a single document, in document order.
    pub fn from_document(document: PdfDocument) -> Self {
        Self::from_documents(vec![document])
    }

    /// Every page of each document, documents in the given order.
    pub fn from_documents(documents: Vec<PdfDocument>) -> Self {
        let pages: Arc<[PageRef]> = documents
            .iter()
            .enumerate()
            .flat_map(|(source, doc)| (0..doc.page_count()).map(move |page| PageRef::new(source, page)))
            .collect();

        Self {
            sources: documents.into(),
            pages,
        }
    }

    pub fn len(&self) -> usize {
        self.pages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&PageRef> {
        self.pages.get(index)
    }

    pub fn pages(&self) -> &[PageRef] {
        &self.pages
    }

    pub fn iter(&self) -> std::slice::Iter<'_, PageRef> {
        self.pages.iter()
    }

    /// Documents the pages are drawn from.
    pub fn sources(&self) -> &[PdfDocument] {
        &self.sources
    }

    /// The document a page comes from.
    pub fn source_of(&self, page: &PageRef) -> Result<&PdfDocument> {
        self.sources.get(page.source).ok_or(Error::IndexOutOfRange {
            index: page.source,
            len: self.sources.len(),
        })
    }

    /// The orientation a page will have in the encoded output.
    pub fn effective_rotation(&self, index: usize) -> Result<Rotation> {
        let page = self.get(index).ok_or(Error::IndexOutOfRange {
            index,
            len: self.len(),
        })?;
        let base = self.source_of(page)?.source_rotation(page.page)?;
        Ok(base.then(page.rotation))
    }

    /// A per-page overview for display.
    pub fn summary(&self) -> Result<Vec<PageSummary>> {
        self.iter()
            .enumerate()
            .map(|(index, page)| {
                Ok(PageSummary {
                    number: PageNumber::from_index(index).get(),
                    source: page.source,
                    source_page: PageNumber::from_index(page.page).get(),
                    rotation: self.effective_rotation(index)?.degrees(),
                })
            })
            .collect()
    }

    /// Same sources, new page list.
    pub(crate) fn with_pages(&self, pages: Vec<PageRef>) -> Self {
        Self {
            sources: Arc::clone(&self.sources),
            pages: pages.into(),
        }
    }

    /// Build a collection from positions of this one, in the given order.
    ///
    /// Each page keeps its accumulated rotation.
    pub(crate) fn pick(&self, order: impl IntoIterator<Item = usize>) -> Result<Self> {
        let pages = order
            .into_iter()
            .map(|index| {
                self.pages.get(index).copied().ok_or(Error::IndexOutOfRange {
                    index,
                    len: self.len(),
                })
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(self.with_pages(pages))
    }
}

impl<'a> IntoIterator for &'a PageCollection {
    type Item = &'a PageRef;
    type IntoIter = std::slice::Iter<'a, PageRef>;

    fn into_iter(self) -> Self::IntoIter {
        self.pages.iter()
    }
}

impl std::fmt::Debug for PageCollection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PageCollection")
            .field("sources", &self.sources.len())
            .field("pages", &self.pages)
            .finish()
    }
}

/// Display row for one page of a collection.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct PageSummary {
    /// 1-based position in the collection
    pub number: usize,
    /// Index of the source document
    pub source: usize,
    /// 1-based page number within the source document
    pub source_page: usize,
    /// Effective rotation in degrees
    pub rotation: i64,
}
