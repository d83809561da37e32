use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Failures surfaced to the user by loading, selection and export.
///
/// Per-page rasterization failures are not listed here: batch exports skip
/// and count them, and only report [`Error::NothingExtracted`] when no page
/// survived.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Failed to load PDF {}: {reason}", .path.display())]
    Open { path: PathBuf, reason: String },

    #[error("Conversion of {} failed. Please install LibreOffice (soffice).", .0.display())]
    ConversionFailed(PathBuf),

    #[error("Unsupported file type: {} (expected PDF, DOC or DOCX)", .0.display())]
    UnsupportedFile(PathBuf),

    #[error("No document loaded")]
    NoDocument,

    #[error("No pages selected")]
    NoSelection,

    #[error("Please enter a page range")]
    EmptyRange,

    #[error("No valid pages in the specified range")]
    NoValidPages,

    #[error("Invalid destination {}: {reason}", .path.display())]
    BadDestination { path: PathBuf, reason: String },

    #[error("Invalid render scale {0}: must be a positive number")]
    InvalidScale(f32),

    #[error("No valid pages to extract")]
    NothingExtracted,

    #[error("PDF save failed: {0}")]
    SaveFailed(String),

    #[error("Image save failed: {0}")]
    ImageSaveFailed(String),
}
