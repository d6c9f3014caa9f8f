use tracing::debug;

use crate::error::{Error, Result};
use crate::pages::{PageCollection, Selection};
use crate::pdf::PdfDocument;

/// Concatenate every page of each selected document, in click order.
///
/// Documents that are not in `order` are left out entirely. Because
/// [`Selection`] deduplicates, each document contributes at most once.
pub fn merge(documents: &[PdfDocument], order: &Selection) -> Result<PageCollection> {
    if order.is_empty() {
        return Err(Error::EmptyInput);
    }
    order.validate(documents.len())?;

    let selected: Vec<PdfDocument> = order.iter().map(|i| documents[i].clone()).collect();
    let merged = PageCollection::from_documents(selected);

    debug!(
        "Merged {} of {} documents into {} pages",
        order.len(),
        documents.len(),
        merged.len()
    );
    Ok(merged)
}
