//! Document analysis requests

use crate::config::AnalyzerConfig;
use crate::error::AnalyzerError;
use crate::parser::parse_analysis;
use crate::prompt::AnalysisPrompt;
use clausewise_domain::traits::LlmProvider;
use clausewise_domain::AnalysisResult;
use std::fmt::Display;
use tracing::{debug, error, info};

/// Sends documents to the hosted model for clause classification
pub struct Analyzer<L> {
    llm: L,
    config: AnalyzerConfig,
}

impl<L> Analyzer<L>
where
    L: LlmProvider,
    L::Error: Display,
{
    /// Create a new Analyzer
    pub fn new(llm: L, config: AnalyzerConfig) -> Self {
        Self { llm, config }
    }

    /// The active configuration
    pub fn config(&self) -> &AnalyzerConfig {
        &self.config
    }

    /// The underlying provider
    pub fn llm(&self) -> &L {
        &self.llm
    }

    /// Request an analysis, returning the raw response text
    ///
    /// # Errors
    ///
    /// - `ConfigurationMissing` if the provider has no credential; no
    ///   request is made
    /// - `ModelRequest` if the call fails
    pub async fn try_analyze(&self, text: &str) -> Result<String, AnalyzerError> {
        if !self.llm.is_configured() {
            return Err(AnalyzerError::ConfigurationMissing);
        }

        let request = AnalysisPrompt::new(text).request(&self.config);
        info!("Requesting analysis of {} bytes of text", text.len());

        let response = self
            .llm
            .generate(&request)
            .await
            .map_err(|e| AnalyzerError::ModelRequest(e.to_string()))?;

        debug!("Analysis response: {} bytes", response.len());
        Ok(response)
    }

    /// Request an analysis, or `None` when none is available
    pub async fn analyze(&self, text: &str) -> Option<String> {
        match self.try_analyze(text).await {
            Ok(response) => Some(response),
            Err(AnalyzerError::ConfigurationMissing) => {
                debug!("Skipping analysis: no API credential");
                None
            }
            Err(e) => {
                error!("Analysis failed: {}", e);
                None
            }
        }
    }

    /// Request and parse an analysis in one step
    pub async fn analyze_document(&self, text: &str) -> Option<AnalysisResult> {
        let raw = self.analyze(text).await?;
        parse_analysis(&raw)
    }
}
