//! Gemini Provider Implementation
//!
//! Calls the hosted `generateContent` endpoint. Every call is a single
//! request: there is no retry, and no client timeout unless one is
//! configured explicitly.
//!
//! # Examples
//!
//! ```no_run
//! use clausewise_llm::GeminiProvider;
//!
//! let provider = GeminiProvider::new(
//!     "https://generativelanguage.googleapis.com/v1beta",
//!     "gemini-1.5-flash",
//!     std::env::var("GOOGLE_API_KEY").ok(),
//! );
//! ```

use crate::LlmError;
use clausewise_domain::traits::{GenerationRequest, LlmProvider};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

/// Default Gemini API endpoint
pub const DEFAULT_ENDPOINT: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Default model
pub const DEFAULT_MODEL: &str = "gemini-1.5-flash";

/// Header carrying the API key
const API_KEY_HEADER: &str = "x-goog-api-key";

/// Gemini API provider
#[derive(Debug, Clone)]
pub struct GeminiProvider {
    endpoint: String,
    model: String,
    api_key: Option<String>,
    client: reqwest::Client,
}

/// Request body for the generateContent API
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest<'a> {
    contents: Vec<Content<'a>>,
    generation_config: GenerationConfig<'a>,
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    role: &'a str,
    parts: Vec<Part<'a>>,
}

#[derive(Debug, Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig<'a> {
    temperature: f64,
    max_output_tokens: u32,
    response_mime_type: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    response_schema: Option<serde_json::Value>,
}

/// Response from the generateContent API
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    prompt_feedback: Option<PromptFeedback>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    content: Option<CandidateContent>,
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
struct ResponsePart {
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PromptFeedback {
    block_reason: Option<String>,
}

impl GeminiProvider {
    /// Create a new Gemini provider
    ///
    /// An absent or empty `api_key` leaves the provider unconfigured.
    pub fn new(
        endpoint: impl Into<String>,
        model: impl Into<String>,
        api_key: Option<String>,
    ) -> Self {
        Self {
            endpoint: endpoint.into(),
            model: model.into(),
            api_key: api_key.filter(|k| !k.trim().is_empty()),
            client: reqwest::Client::new(),
        }
    }

    /// Create a provider against the public endpoint and default model
    pub fn with_defaults(api_key: Option<String>) -> Self {
        Self::new(DEFAULT_ENDPOINT, DEFAULT_MODEL, api_key)
    }

    /// Enforce a client-side timeout on every request
    pub fn with_timeout(mut self, timeout: Duration) -> Result<Self, LlmError> {
        self.client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| LlmError::Other(format!("Failed to build HTTP client: {}", e)))?;
        Ok(self)
    }

    /// Model name
    pub fn model(&self) -> &str {
        &self.model
    }

    fn url(&self) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.endpoint.trim_end_matches('/'),
            self.model
        )
    }

    /// Generate text using the generateContent API
    ///
    /// # Errors
    ///
    /// Returns error if:
    /// - No API key is configured
    /// - The key is rejected or the model is unknown
    /// - Network communication fails
    /// - The response carries no candidate text
    pub async fn generate(&self, request: &GenerationRequest) -> Result<String, LlmError> {
        let api_key = self.api_key.as_deref().ok_or(LlmError::MissingCredential)?;
        let body = build_request_body(request)?;

        debug!(
            "Calling {} with {} part(s), mime type {}",
            self.model,
            request.parts.len(),
            request.response_mime_type
        );

        let response = self
            .client
            .post(self.url())
            .header(API_KEY_HEADER, api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| LlmError::Communication(format!("Request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(match status {
                reqwest::StatusCode::NOT_FOUND => LlmError::ModelNotAvailable(self.model.clone()),
                reqwest::StatusCode::TOO_MANY_REQUESTS => LlmError::RateLimitExceeded,
                reqwest::StatusCode::UNAUTHORIZED | reqwest::StatusCode::FORBIDDEN => {
                    LlmError::Authentication(format!("HTTP {}: {}", status, error_text))
                }
                _ => LlmError::Communication(format!("HTTP {}: {}", status, error_text)),
            });
        }

        let parsed = response
            .json::<GenerateContentResponse>()
            .await
            .map_err(|e| LlmError::InvalidResponse(format!("Failed to parse response: {}", e)))?;

        response_text(parsed)
    }
}

impl LlmProvider for GeminiProvider {
    type Error = LlmError;

    fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }

    async fn generate(&self, request: &GenerationRequest) -> Result<String, Self::Error> {
        GeminiProvider::generate(self, request).await
    }
}

fn build_request_body(request: &GenerationRequest) -> Result<GenerateContentRequest<'_>, LlmError> {
    let response_schema = request
        .response_schema
        .as_deref()
        .map(serde_json::from_str::<serde_json::Value>)
        .transpose()
        .map_err(|e| LlmError::InvalidRequest(format!("Response schema is not JSON: {}", e)))?;

    Ok(GenerateContentRequest {
        contents: vec![Content {
            role: "user",
            parts: request.parts.iter().map(|text| Part { text: text.as_str() }).collect(),
        }],
        generation_config: GenerationConfig {
            temperature: request.temperature,
            max_output_tokens: request.max_output_tokens,
            response_mime_type: &request.response_mime_type,
            response_schema,
        },
    })
}

fn response_text(response: GenerateContentResponse) -> Result<String, LlmError> {
    let Some(candidate) = response.candidates.into_iter().next() else {
        let reason = response
            .prompt_feedback
            .and_then(|f| f.block_reason)
            .unwrap_or_else(|| "no candidates returned".to_string());
        return Err(LlmError::InvalidResponse(format!("Empty response: {}", reason)));
    };

    let text: String = candidate
        .content
        .map(|c| c.parts.into_iter().filter_map(|p| p.text).collect())
        .unwrap_or_default();

    if text.is_empty() {
        let reason = candidate.finish_reason.unwrap_or_else(|| "unknown".to_string());
        return Err(LlmError::InvalidResponse(format!(
            "Candidate has no text (finish reason: {})",
            reason
        )));
    }
    Ok(text)
}
