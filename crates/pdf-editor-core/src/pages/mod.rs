//! Page model: collections, selections, anchors and orientation.

mod anchor;
mod collection;
mod page_number;
mod rotation;
mod selection;

pub use anchor::Anchor;
pub use collection::{PageCollection, PageRef, PageSummary};
pub use page_number::PageNumber;
pub use rotation::Rotation;
pub use selection::Selection;
