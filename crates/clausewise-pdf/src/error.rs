//! Error types for PDF extraction

use thiserror::Error;

/// Errors raised while reading a PDF
#[derive(Error, Debug)]
pub enum PdfError {
    /// The bytes are not a readable PDF
    #[error("Invalid PDF: {0}")]
    InvalidPdf(String),

    /// The document needs a password
    #[error("PDF is encrypted or password-protected")]
    Encrypted,

    /// Text could not be read from one page
    #[error("Failed to extract text from page {page}: {reason}")]
    Extraction {
        /// One-based page number
        page: u32,
        /// Underlying failure
        reason: String,
    },
}

impl PdfError {
    /// Classify a lopdf load failure
    pub(crate) fn from_load(err: lopdf::Error) -> Self {
        match err {
            lopdf::Error::Decryption(_) => PdfError::Encrypted,
            other => PdfError::InvalidPdf(other.to_string()),
        }
    }
}
