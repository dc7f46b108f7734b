//! Upload to analysis hand-off

use crate::analyzer::Analyzer;
use crate::error::AnalyzerError;
use crate::types::AnalysisHandoff;
use crate::upload::{UploadKind, UploadedDocument};
use clausewise_domain::traits::{LlmProvider, TextExtractor};
use std::fmt::Display;
use tracing::{debug, error, info};

const PREVIEW_CHARS: usize = 1000;

/// Runs an upload through extraction and analysis
pub struct DocumentPipeline<E, L> {
    extractor: E,
    analyzer: Analyzer<L>,
}

impl<E, L> DocumentPipeline<E, L> {
    /// Create a new pipeline
    pub fn new(extractor: E, analyzer: Analyzer<L>) -> Self {
        Self {
            extractor,
            analyzer,
        }
    }

    /// The analyzer used for the model call
    pub fn analyzer(&self) -> &Analyzer<L> {
        &self.analyzer
    }
}

impl<E, L> DocumentPipeline<E, L>
where
    E: TextExtractor,
    E::Error: Display,
    L: LlmProvider,
    L::Error: Display,
{

    /// Check an upload against the filter and the size ceiling
    pub fn check(&self, upload: &UploadedDocument) -> Result<UploadKind, AnalyzerError> {
        let kind = upload
            .kind()
            .ok_or_else(|| AnalyzerError::UnsupportedUpload(upload.file_name.clone()))?;

        let max = self.analyzer.config().max_upload_bytes;
        if upload.size() > max {
            return Err(AnalyzerError::UploadTooLarge {
                size: upload.size(),
                max,
            });
        }
        Ok(kind)
    }

    /// Extract the text of an upload
    ///
    /// Only PDF uploads can be read; Word documents pass the upload filter
    /// but fail here.
    pub fn extract(&self, upload: &UploadedDocument) -> Result<String, AnalyzerError> {
        match self.check(upload)? {
            UploadKind::Pdf => {}
            UploadKind::Doc | UploadKind::Docx => {
                return Err(AnalyzerError::UnsupportedUpload(format!(
                    "{} (only PDF text extraction is available)",
                    upload.file_name
                )));
            }
        }

        let text = self
            .extractor
            .extract_text(&upload.bytes)
            .map_err(|e| AnalyzerError::Extraction(e.to_string()))?;

        debug!("Extracted text length: {} characters", text.chars().count());
        debug!(
            "Extracted text preview: {}",
            text.chars().take(PREVIEW_CHARS).collect::<String>()
        );
        Ok(text)
    }

    /// Extract and analyze an upload
    ///
    /// # Errors
    ///
    /// Fails only when the upload is rejected or its text cannot be
    /// extracted. A failed analysis still yields a hand-off, with
    /// `analysis_result` set to `None`.
    pub async fn process(&self, upload: UploadedDocument) -> Result<AnalysisHandoff, AnalyzerError> {
        info!("Processing {} ({})", upload.file_name, upload.size_label());

        let extracted_text = self.extract(&upload).map_err(|e| {
            error!("Failed to process {}: {}", upload.file_name, e);
            e
        })?;

        let analysis_result = self.analyzer.analyze(&extracted_text).await;

        Ok(AnalysisHandoff {
            extracted_text,
            file_name: upload.file_name,
            analysis_result,
        })
    }
}
