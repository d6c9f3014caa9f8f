//! Page transforms.
//!
//! Every operation takes a collection by reference and returns a new one;
//! inputs are never modified, so a failed call leaves nothing half-done.

mod merge;
mod reorder;
mod rotate;
mod subset;

pub use merge::merge;
pub use reorder::{reorder, reorder_plan};
pub use rotate::rotate;
pub use subset::{delete, extract};
