//! Moving a block of selected pages after an anchor page.
//!
//! # Index arithmetic
//!
//! The anchor is chosen from the pages as they were *before* the selected
//! pages are lifted out, but the insertion happens in the list *after* they
//! are gone. Removing pages shifts every later position, so the anchor is
//! resolved by identity (its original index) inside the remaining list
//! rather than by position:
//!
//! ```text
//! pages      A B C D E      selection [3, 0]   anchor after B (index 1)
//! remaining  B C E          (filter pass, no positional removal)
//! insert at  1              (B is at 0 in remaining, insert after it)
//! result     B D A C E      (selection inserted in click order)
//! ```

use tracing::debug;

use crate::error::{Error, Result};
use crate::pages::{Anchor, PageCollection, Selection};

/// Compute the new page order for a reorder.
///
/// Returns a permutation of `0..len`: entry `i` is the original index of the
/// page that ends up at position `i`.
pub fn reorder_plan(len: usize, selection: &Selection, anchor: Anchor) -> Result<Vec<usize>> {
    selection.require(len)?;

    if let Anchor::After(index) = anchor {
        if index >= len {
            return Err(Error::InvalidAnchor {
                anchor: anchor.to_string(),
                reason: format!("document has {len} pages"),
            });
        }
        if selection.contains(index) {
            return Err(Error::InvalidAnchor {
                anchor: anchor.to_string(),
                reason: "the anchor page is one of the pages being moved".to_string(),
            });
        }
    }

    // A single filter pass keeps every unselected index in place; nothing
    // is removed by position, so earlier removals cannot shift later ones.
    let mut order: Vec<usize> = (0..len).filter(|&i| !selection.contains(i)).collect();

    let insert_at = match anchor {
        Anchor::Start => 0,
        Anchor::After(index) => {
            // Present because the anchor is in range and not selected
            let anchor_pos = order
                .iter()
                .position(|&i| i == index)
                .ok_or_else(|| Error::InvalidAnchor {
                    anchor: anchor.to_string(),
                    reason: "anchor page not found after removal".to_string(),
                })?;
            anchor_pos + 1
        }
    };

    let tail = order.split_off(insert_at);
    order.extend(selection.iter());
    order.extend(tail);
    Ok(order)
}

/// Move the selected pages, in click order, to just after `anchor`.
pub fn reorder(pages: &PageCollection, selection: &Selection, anchor: Anchor) -> Result<PageCollection> {
    let order = reorder_plan(pages.len(), selection, anchor)?;
    debug!(
        "Reordering {} of {} pages to {}",
        selection.len(),
        pages.len(),
        anchor
    );
    pages.pick(order)
}
