//! PDF Editor Core Library
//!
//! This library provides page-level editing of PDF documents:
//! - Merging several documents in a chosen order
//! - Rotating, reordering, deleting and extracting selected pages
//! - Chaining edits in a resettable session
//! - Encoding the result back into a standalone PDF

pub mod config;
pub mod error;
pub mod ops;
pub mod pages;
pub mod pdf;
pub mod pipeline;
pub mod util;

#[cfg(test)]
mod test_support;

pub use config::{AppConfig, OutputConfig, SUPPORTED_PDF_VERSIONS};
pub use error::{Error, Result};
pub use ops::{delete, extract, merge, reorder, reorder_plan, rotate};
pub use pages::{Anchor, PageCollection, PageNumber, PageRef, PageSummary, Rotation, Selection};
pub use pdf::{PdfDocument, PdfWriter, decode, encode};
pub use pipeline::{Edit, EditKind, EditSession, EditStep, apply_edits};

use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// High-level editor that ties configuration, decoding and encoding together
pub struct PdfEditor {
    writer: PdfWriter,
    config: AppConfig,
}

impl PdfEditor {
    /// Create an editor with the given configuration
    pub fn new(config: AppConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            writer: PdfWriter::new(config.output.clone()),
            config,
        })
    }

    /// Open a file for editing
    pub fn open(&self, path: impl AsRef<Path>) -> Result<EditSession> {
        let document = PdfDocument::from_file(path.as_ref())?;
        info!(
            "Opened {} ({} pages)",
            path.as_ref().display(),
            document.page_count()
        );
        Ok(EditSession::from_document(document))
    }

    /// Merge files in the order given by `order` (indices into `paths`)
    ///
    /// `progress_callback` is called with (files loaded, files to load)
    /// after each selected file is decoded.
    pub fn merge_files<P: AsRef<Path>>(
        &self,
        paths: &[P],
        order: &Selection,
        progress_callback: Option<Box<dyn Fn(usize, usize) + Send>>,
    ) -> Result<PageCollection> {
        if order.is_empty() {
            return Err(Error::EmptyInput);
        }
        order.validate(paths.len())?;

        // Only the selected files are decoded
        let mut documents = Vec::with_capacity(order.len());
        for index in order {
            let path = paths[index].as_ref();
            debug!("Loading {}", path.display());
            documents.push(PdfDocument::from_file(path)?);

            if let Some(ref callback) = progress_callback {
                callback(documents.len(), order.len());
            }
        }

        merge(&documents, &Selection::all(documents.len()))
    }

    /// Encode `pages` and write them to `path`
    pub fn save(&self, pages: &PageCollection, path: impl AsRef<Path>) -> Result<()> {
        let bytes = self.writer.encode(pages)?;
        std::fs::write(path.as_ref(), &bytes)?;
        info!(
            "Wrote {} pages to {} ({} bytes)",
            pages.len(),
            path.as_ref().display(),
            bytes.len()
        );
        Ok(())
    }

    /// Where the result of `kind` applied to `input` is saved by default
    pub fn output_path(input: &Path, kind: EditKind) -> PathBuf {
        util::output_path_for(input, kind.file_suffix())
    }

    /// Where merge output is saved by default, next to the first input
    pub fn merged_output_path(&self, first_input: &Path) -> PathBuf {
        first_input
            .parent()
            .unwrap_or_else(|| Path::new(""))
            .join(&self.config.output.merged_filename)
    }

    /// Get the configuration
    pub const fn config(&self) -> &AppConfig {
        &self.config
    }
}
