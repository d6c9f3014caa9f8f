use thiserror::Error;

/// Unified error type for pdf-editor-core
///
/// This enum encompasses all error cases that can occur in the library:
/// - Page operations (selection and anchor validation)
/// - PDF decoding and encoding
/// - Configuration operations (loading, validation)
/// - General I/O operations
#[derive(Error, Debug)]
pub enum Error {
    // ==========================================================================
    // Page Operation Errors
    // ==========================================================================
    /// The operation needs at least one selected page
    #[error("no pages selected")]
    EmptySelection,

    /// Merge was asked to combine zero documents
    #[error("no documents selected for merging")]
    EmptyInput,

    /// An index does not refer to an existing page or document
    #[error("index {index} out of range (0..{len})")]
    IndexOutOfRange { index: usize, len: usize },

    /// The reorder anchor cannot be resolved
    #[error("invalid anchor {anchor}: {reason}")]
    InvalidAnchor { anchor: String, reason: String },

    /// Deleting the selection would leave a document without pages
    #[error("cannot delete all {len} pages; a document needs at least one page")]
    SelectionCoversAll { len: usize },

    /// A rotation that is not a multiple of 90 degrees
    #[error("invalid rotation {0}; must be a multiple of 90 degrees")]
    InvalidRotation(i64),

    // ==========================================================================
    // PDF Errors
    // ==========================================================================
    /// Failed to parse a PDF
    #[error("malformed PDF: {0}")]
    MalformedInput(String),

    /// Failed to save a PDF
    #[error("failed to save PDF: {0}")]
    PdfSave(String),

    /// Error from the lopdf library while assembling output
    #[error("lopdf error: {0}")]
    Lopdf(String),

    // ==========================================================================
    // Configuration Errors
    // ==========================================================================
    /// Failed to load configuration file
    #[error("failed to load config: {0}")]
    ConfigLoad(String),

    /// Invalid configuration value
    #[error("invalid config value for '{field}': {reason}")]
    ConfigInvalid { field: String, reason: String },

    // ==========================================================================
    // I/O Errors
    // ==========================================================================
    /// General I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Whether this is a validation error the user can fix by changing
    /// the selection or input, rather than an internal or I/O fault.
    pub const fn is_user_facing(&self) -> bool {
        matches!(
            self,
            Self::EmptySelection
                | Self::EmptyInput
                | Self::IndexOutOfRange { .. }
                | Self::InvalidAnchor { .. }
                | Self::SelectionCoversAll { .. }
                | Self::InvalidRotation(_)
                | Self::MalformedInput(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, Error>;
