//! Delete and extract: splitting a collection by selection.

use tracing::debug;

use crate::error::{Error, Result};
use crate::pages::{PageCollection, Selection};

/// Keep every page that is *not* selected, in original order.
///
/// A document cannot be left without pages, so selecting everything fails
/// with [`Error::SelectionCoversAll`].
pub fn delete(pages: &PageCollection, selection: &Selection) -> Result<PageCollection> {
    selection.require(pages.len())?;
    if selection.covers_all(pages.len()) {
        return Err(Error::SelectionCoversAll { len: pages.len() });
    }

    debug!("Deleting {} of {} pages", selection.len(), pages.len());
    pages.pick((0..pages.len()).filter(|&i| !selection.contains(i)))
}

/// Keep only the selected pages, in ascending page order.
///
/// Unlike merge and reorder, click order does not matter here.
pub fn extract(pages: &PageCollection, selection: &Selection) -> Result<PageCollection> {
    selection.require(pages.len())?;

    debug!("Extracting {} of {} pages", selection.len(), pages.len());
    pages.pick(selection.ascending())
}
