//! Types passed between the analyzer and its callers

use serde::{Deserialize, Serialize};

/// Everything the results view needs after a document is processed
///
/// Held in memory only; nothing is persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisHandoff {
    /// Text extracted from the upload
    pub extracted_text: String,

    /// Name of the uploaded file
    pub file_name: String,

    /// Raw model response, or `None` when no analysis is available
    pub analysis_result: Option<String>,
}

/// How a submitted question ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChatOutcome {
    /// The answer was appended to the transcript
    Answered,

    /// The request failed; the session carries the error message
    Failed,

    /// The session moved to another clause before the answer arrived
    Discarded,
}
