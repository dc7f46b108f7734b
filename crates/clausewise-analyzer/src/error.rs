//! Error types for the Analyzer

use thiserror::Error;

/// Errors that can occur while analyzing a document or answering a question
#[derive(Error, Debug)]
pub enum AnalyzerError {
    /// No API credential configured; no request is attempted
    #[error("No API credential configured")]
    ConfigurationMissing,

    /// Text could not be extracted from the upload
    #[error("Extraction failed: {0}")]
    Extraction(String),

    /// Network or API error from the hosted model
    #[error("Model request failed: {0}")]
    ModelRequest(String),

    /// The model response is not a valid analysis
    #[error("Response parse error: {0}")]
    ResponseParse(String),

    /// The file type is accepted by the upload filter but cannot be read
    #[error("Unsupported upload: {0}")]
    UnsupportedUpload(String),

    /// The upload exceeds the configured size ceiling
    #[error("Upload too large: {size} bytes (max: {max})")]
    UploadTooLarge {
        /// Upload size in bytes
        size: usize,
        /// Configured ceiling in bytes
        max: usize,
    },
}

impl From<serde_json::Error> for AnalyzerError {
    fn from(e: serde_json::Error) -> Self {
        AnalyzerError::ResponseParse(e.to_string())
    }
}
