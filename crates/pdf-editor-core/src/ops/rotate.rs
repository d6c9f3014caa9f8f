use tracing::debug;

use crate::error::Result;
use crate::pages::{PageCollection, Rotation, Selection};

/// Rotate the selected pages clockwise by `delta`; order and length are unchanged.
pub fn rotate(pages: &PageCollection, selection: &Selection, delta: Rotation) -> Result<PageCollection> {
    selection.require(pages.len())?;

    debug!("Rotating {} of {} pages by {}", selection.len(), pages.len(), delta);

    let rotated = pages
        .iter()
        .enumerate()
        .map(|(index, page)| {
            if selection.contains(index) {
                page.rotated(delta)
            } else {
                *page
            }
        })
        .collect();

    Ok(pages.with_pages(rotated))
}
