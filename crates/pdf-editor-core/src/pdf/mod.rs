mod document;
mod writer;

pub use document::PdfDocument;
pub use writer::{PdfWriter, encode};

use crate::error::Result;

/// Decode PDF bytes into a document.
pub fn decode(bytes: &[u8]) -> Result<PdfDocument> {
    PdfDocument::from_bytes(bytes)
}
