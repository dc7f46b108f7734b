//! Trait definitions for external interactions
//!
//! These traits define the boundaries between domain logic and infrastructure.
//! Infrastructure implementations live in other crates.

use std::future::Future;

/// MIME type requesting JSON output
pub const MIME_JSON: &str = "application/json";

/// MIME type requesting plain text output
pub const MIME_TEXT: &str = "text/plain";

/// One call to a hosted generative model
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationRequest {
    /// Text parts of the single user turn, in order
    pub parts: Vec<String>,

    /// Sampling temperature
    pub temperature: f64,

    /// Output token budget
    pub max_output_tokens: u32,

    /// Requested response MIME type
    pub response_mime_type: String,

    /// Declared output schema as JSON text, if any
    pub response_schema: Option<String>,
}

impl GenerationRequest {
    /// The first part, which carries the instructions
    pub fn prompt(&self) -> &str {
        self.parts.first().map(String::as_str).unwrap_or("")
    }
}

/// Trait for LLM provider operations
///
/// Implemented by the infrastructure layer (clausewise-llm)
pub trait LlmProvider {
    /// Error type for LLM operations
    type Error;

    /// Whether a credential is available; unconfigured providers are never called
    fn is_configured(&self) -> bool {
        true
    }

    /// Generate a response, returning the raw response text
    fn generate(
        &self,
        request: &GenerationRequest,
    ) -> impl Future<Output = Result<String, Self::Error>> + Send;
}

/// Trait for turning an uploaded file into plain text
///
/// Implemented by the infrastructure layer (clausewise-pdf)
pub trait TextExtractor {
    /// Error type for extraction
    type Error;

    /// Extract the document text, page by page, concatenated
    fn extract_text(&self, bytes: &[u8]) -> Result<String, Self::Error>;
}
