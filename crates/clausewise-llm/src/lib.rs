//! Clausewise LLM Provider Layer
//!
//! Implementations of the `LlmProvider` trait from `clausewise-domain`.
//!
//! # Providers
//!
//! - `MockProvider`: Deterministic mock for testing
//! - `GeminiProvider`: Hosted Gemini `generateContent` API
//!
//! # Examples
//!
//! ```
//! use clausewise_domain::traits::{GenerationRequest, LlmProvider, MIME_TEXT};
//! use clausewise_llm::MockProvider;
//!
//! # async fn example() {
//! let provider = MockProvider::new("Hello from LLM!");
//! let request = GenerationRequest {
//!     parts: vec!["test prompt".to_string()],
//!     temperature: 0.3,
//!     max_output_tokens: 64,
//!     response_mime_type: MIME_TEXT.to_string(),
//!     response_schema: None,
//! };
//! let result = provider.generate(&request).await.unwrap();
//! assert_eq!(result, "Hello from LLM!");
//! # }
//! ```

#![warn(missing_docs)]

pub mod gemini;

use clausewise_domain::traits::{GenerationRequest, LlmProvider};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use thiserror::Error;

pub use gemini::GeminiProvider;

/// Errors that can occur during LLM operations
#[derive(Error, Debug)]
pub enum LlmError {
    /// No API credential configured
    #[error("No API credential configured")]
    MissingCredential,

    /// Credential rejected by the API
    #[error("Authentication failed: {0}")]
    Authentication(String),

    /// Network or API communication error
    #[error("Communication error: {0}")]
    Communication(String),

    /// Request could not be built
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Invalid response from LLM
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Rate limit exceeded
    #[error("Rate limit exceeded")]
    RateLimitExceeded,

    /// Model not available
    #[error("Model not available: {0}")]
    ModelNotAvailable(String),

    /// Generic error
    #[error("LLM error: {0}")]
    Other(String),
}

#[derive(Debug, Clone)]
enum MockReply {
    Text(String),
    Error,
}

/// Mock LLM provider for deterministic testing
///
/// Returns pre-configured responses without making any network calls.
/// Specific replies are matched by substring against the request parts, in
/// the order they were added.
///
/// # Examples
///
/// ```
/// use clausewise_llm::MockProvider;
///
/// let mut provider = MockProvider::default();
/// provider.add_response("payment", "Rent is due monthly.");
/// provider.add_error("liability");
/// assert_eq!(provider.call_count(), 0);
/// ```
#[derive(Debug, Clone)]
pub struct MockProvider {
    default_response: String,
    replies: Arc<Mutex<Vec<(String, MockReply)>>>,
    call_count: Arc<Mutex<usize>>,
    last_request: Arc<Mutex<Option<GenerationRequest>>>,
    configured: bool,
}

impl MockProvider {
    /// Create a new MockProvider with a fixed response for all prompts
    pub fn new(response: impl Into<String>) -> Self {
        Self {
            default_response: response.into(),
            replies: Arc::new(Mutex::new(Vec::new())),
            call_count: Arc::new(Mutex::new(0)),
            last_request: Arc::new(Mutex::new(None)),
            configured: true,
        }
    }

    /// Create a provider that reports no credential
    pub fn unconfigured() -> Self {
        Self {
            configured: false,
            ..Self::default()
        }
    }

    /// Reply with `response` whenever a request part contains `pattern`
    pub fn add_response(&mut self, pattern: impl Into<String>, response: impl Into<String>) {
        lock(&self.replies).push((pattern.into(), MockReply::Text(response.into())));
    }

    /// Fail whenever a request part contains `pattern`
    pub fn add_error(&mut self, pattern: impl Into<String>) {
        lock(&self.replies).push((pattern.into(), MockReply::Error));
    }

    /// Get the number of times generate was called
    pub fn call_count(&self) -> usize {
        *lock(&self.call_count)
    }

    /// Reset the call count
    pub fn reset_call_count(&self) {
        *lock(&self.call_count) = 0;
    }

    /// The most recent request
    pub fn last_request(&self) -> Option<GenerationRequest> {
        lock(&self.last_request).clone()
    }

    fn reply_for(&self, request: &GenerationRequest) -> Result<String, LlmError> {
        let replies = lock(&self.replies);
        let matched = replies
            .iter()
            .find(|(pattern, _)| request.parts.iter().any(|part| part.contains(pattern.as_str())));

        match matched {
            Some((_, MockReply::Text(text))) => Ok(text.clone()),
            Some((_, MockReply::Error)) => Err(LlmError::Other("Mock error".to_string())),
            None => Ok(self.default_response.clone()),
        }
    }
}

impl Default for MockProvider {
    fn default() -> Self {
        Self::new("Default mock response")
    }
}

impl LlmProvider for MockProvider {
    type Error = LlmError;

    fn is_configured(&self) -> bool {
        self.configured
    }

    async fn generate(&self, request: &GenerationRequest) -> Result<String, Self::Error> {
        *lock(&self.call_count) += 1;
        *lock(&self.last_request) = Some(request.clone());

        if !self.configured {
            return Err(LlmError::MissingCredential);
        }
        self.reply_for(request)
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}
