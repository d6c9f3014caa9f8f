use std::path::Path;
use std::sync::Arc;

use lopdf::{Document as LoDocument, Object, ObjectId};

use crate::error::{Error, Result};
use crate::pages::Rotation;

/// Page tree nesting beyond this is treated as a reference cycle.
const MAX_TREE_DEPTH: usize = 64;

/// A decoded PDF, shared cheaply between page collections.
pub struct PdfDocument {
    /// Parsed object graph
    inner: Arc<LoDocument>,
    /// Page object ids in page order
    page_ids: Arc<[ObjectId]>,
}

impl PdfDocument {
    /// Decode a PDF from bytes
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let inner = LoDocument::load_mem(bytes)
            .map_err(|e| Error::MalformedInput(format!("Failed to parse PDF: {e}")))?;

        // get_pages is keyed by 1-based page number, so values come out in page order
        let page_ids: Arc<[ObjectId]> = inner.get_pages().into_values().collect();
        if page_ids.is_empty() {
            return Err(Error::MalformedInput("document has no pages".to_string()));
        }

        tracing::debug!("Decoded PDF with {} pages", page_ids.len());

        Ok(Self {
            inner: Arc::new(inner),
            page_ids,
        })
    }

    /// Decode a PDF from a file path
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let bytes = std::fs::read(path.as_ref())?;
        Self::from_bytes(&bytes)
    }

    /// Get number of pages
    pub fn page_count(&self) -> usize {
        self.page_ids.len()
    }

    /// The parsed document.
    pub(crate) fn lopdf(&self) -> &LoDocument {
        &self.inner
    }

    /// Object id of a page's dictionary.
    pub(crate) fn page_id(&self, index: usize) -> Result<ObjectId> {
        self.page_ids
            .get(index)
            .copied()
            .ok_or(Error::IndexOutOfRange {
                index,
                len: self.page_ids.len(),
            })
    }

    /// The orientation stored in the source file for a page (own or inherited `/Rotate`).
    pub fn source_rotation(&self, index: usize) -> Result<Rotation> {
        let page_id = self.page_id(index)?;
        let rotation = inherited_attribute(&self.inner, page_id, b"Rotate")?
            .and_then(|obj| obj.as_i64().ok())
            .map_or(Rotation::None, Rotation::from_pdf_value);
        Ok(rotation)
    }
}

/// Look up a page attribute, following `/Parent` links for inheritable keys.
pub(crate) fn inherited_attribute<'a>(
    doc: &'a LoDocument,
    page_id: ObjectId,
    key: &[u8],
) -> Result<Option<&'a Object>> {
    let mut current_id = page_id;
    for _ in 0..MAX_TREE_DEPTH {
        let dict = doc
            .get_dictionary(current_id)
            .map_err(|e| Error::MalformedInput(format!("page tree node {current_id:?}: {e}")))?;

        if let Ok(value) = dict.get(key) {
            return Ok(Some(value));
        }

        match dict.get(b"Parent").and_then(Object::as_reference) {
            Ok(parent_id) => current_id = parent_id,
            Err(_) => return Ok(None),
        }
    }

    Err(Error::MalformedInput(format!(
        "page tree deeper than {MAX_TREE_DEPTH} levels above {page_id:?}"
    )))
}

impl Clone for PdfDocument {
    /// Clone the document efficiently.
    ///
    /// This is O(1) - it only clones the `Arc` pointers, not the object graph.
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
            page_ids: Arc::clone(&self.page_ids),
        }
    }
}

impl std::fmt::Debug for PdfDocument {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PdfDocument")
            .field("page_count", &self.page_ids.len())
            .field("version", &self.inner.version)
            .finish()
    }
}
