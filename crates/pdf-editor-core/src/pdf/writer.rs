//! Serializing a page collection back into a single PDF.
//!
//! # Assembly Strategy
//!
//! Every source document that contributes a page is cloned and renumbered
//! into a disjoint object-id range, then its non-structural objects (fonts,
//! images, content streams) are copied into one output document. Page
//! dictionaries are rebuilt under a fresh, flat page tree in collection
//! order:
//! 1. Inheritable attributes are copied onto each page, since the source
//!    page tree they were inherited from is not carried over
//! 2. `/Rotate` becomes the source orientation plus the accumulated delta
//! 3. Objects no longer referenced by any page are pruned (optional)

use std::collections::{HashMap, HashSet};

use lopdf::{Dictionary, Document, Object, ObjectId};
use tracing::debug;

use super::document::inherited_attribute;
use crate::config::OutputConfig;
use crate::error::{Error, Result};
use crate::pages::{PageCollection, Rotation};

/// Page attributes that may be inherited from ancestor `/Pages` nodes.
const INHERITABLE_KEYS: [&[u8]; 4] = [b"Resources", b"MediaBox", b"CropBox", b"Rotate"];

/// Encodes page collections into PDF bytes.
#[derive(Debug, Clone, Default)]
pub struct PdfWriter {
    options: OutputConfig,
}

/// A page dictionary lifted out of its source, ready for re-parenting.
struct SourcePage {
    id: ObjectId,
    dict: Dictionary,
}

impl PdfWriter {
    pub const fn new(options: OutputConfig) -> Self {
        Self { options }
    }

    /// Serialize `pages` into a standalone PDF.
    pub fn encode(&self, pages: &PageCollection) -> Result<Vec<u8>> {
        if pages.is_empty() {
            return Err(Error::EmptyInput);
        }

        let mut document = Document::with_version(self.options.pdf_version.as_str());
        let mut next_id: u32 = 1;
        let mut source_pages: HashMap<usize, Vec<SourcePage>> = HashMap::new();

        // Bring in each contributing source once, in order of first use
        for page in pages {
            if source_pages.contains_key(&page.source()) {
                continue;
            }

            let mut doc = pages.source_of(page)?.lopdf().clone();
            doc.renumber_objects_with(next_id);
            next_id = doc.max_id + 1;

            let lifted = lift_pages(&doc)?;
            debug!(
                "Imported source {} ({} pages, {} objects)",
                page.source(),
                lifted.len(),
                doc.objects.len()
            );

            for (object_id, object) in doc.objects {
                match object.type_name().unwrap_or(b"") {
                    b"Catalog" | b"Pages" | b"Page" | b"Outlines" | b"Outline" => {}
                    _ => {
                        document.objects.insert(object_id, object);
                    }
                }
            }

            source_pages.insert(page.source(), lifted);
        }

        document.max_id = next_id - 1;
        let pages_id = document.new_object_id();

        let mut kids = Vec::with_capacity(pages.len());
        let mut emitted: HashSet<ObjectId> = HashSet::with_capacity(pages.len());

        for page in pages {
            let source_len = pages.source_of(page)?.page_count();
            let lifted = source_pages
                .get(&page.source())
                .and_then(|list| list.get(page.source_page()))
                .ok_or(Error::IndexOutOfRange {
                    index: page.source_page(),
                    len: source_len,
                })?;

            let mut dict = lifted.dict.clone();
            dict.set("Parent", Object::Reference(pages_id));

            let base = dict
                .get(b"Rotate")
                .and_then(Object::as_i64)
                .map_or(Rotation::None, Rotation::from_pdf_value);
            dict.set("Rotate", Object::Integer(base.then(page.rotation()).degrees()));

            // The same source page may appear twice; each occurrence needs its own object
            let id = if emitted.insert(lifted.id) {
                lifted.id
            } else {
                document.new_object_id()
            };
            document.objects.insert(id, Object::Dictionary(dict));
            kids.push(Object::Reference(id));
        }

        let count = i64::try_from(kids.len())
            .map_err(|_| Error::PdfSave(format!("too many pages: {}", kids.len())))?;

        let pages_dict_obj = Dictionary::from_iter([
            ("Type", Object::Name(b"Pages".to_vec())),
            ("Kids", Object::Array(kids)),
            ("Count", Object::Integer(count)),
        ]);
        document.objects.insert(pages_id, Object::Dictionary(pages_dict_obj));

        let catalog_id = document.add_object(Dictionary::from_iter([
            ("Type", Object::Name(b"Catalog".to_vec())),
            ("Pages", Object::Reference(pages_id)),
        ]));
        document.trailer.set("Root", Object::Reference(catalog_id));

        if self.options.prune_unused {
            let pruned = document.prune_objects();
            debug!("Pruned {} unreferenced objects", pruned.len());
        }

        document.renumber_objects();
        if self.options.compress {
            document.compress();
        }

        let mut output = Vec::new();
        document
            .save_to(&mut output)
            .map_err(|e| Error::PdfSave(format!("Failed to save PDF: {e}")))?;

        debug!("Encoded {} pages into {} bytes", pages.len(), output.len());
        Ok(output)
    }
}

/// Encode with default output options.
pub fn encode(pages: &PageCollection) -> Result<Vec<u8>> {
    PdfWriter::default().encode(pages)
}

/// Copy every page dictionary of `doc` with its inherited attributes made explicit.
fn lift_pages(doc: &Document) -> Result<Vec<SourcePage>> {
    doc.get_pages()
        .into_values()
        .map(|id| {
            let mut dict = doc
                .get_dictionary(id)
                .map_err(|e| Error::Lopdf(format!("page {id:?}: {e}")))?
                .clone();

            for key in INHERITABLE_KEYS {
                if !dict.has(key)
                    && let Some(value) = inherited_attribute(doc, id, key)?
                {
                    dict.set(key.to_vec(), value.clone());
                }
            }

            Ok(SourcePage { id, dict })
        })
        .collect()
}
