//! Command implementations.

pub mod analyze;
pub mod extract;
pub mod review;

pub use self::analyze::execute_analyze;
pub use self::extract::execute_extract;
pub use self::review::execute_review;

use crate::error::Result;
use clausewise_analyzer::{parse_analysis, DocumentPipeline, UploadedDocument};
use clausewise_domain::traits::{LlmProvider, TextExtractor};
use clausewise_domain::ResultsView;
use std::fmt::Display;
use std::path::Path;

/// Run a file through extraction and analysis and open the results view.
///
/// A missing or unparseable analysis still opens a view, in its "no data"
/// state. Only upload and extraction failures are errors.
pub async fn open_document<E, L>(path: &Path, pipeline: &DocumentPipeline<E, L>) -> Result<ResultsView>
where
    E: TextExtractor,
    E::Error: Display,
    L: LlmProvider,
    L::Error: Display,
{
    let upload = UploadedDocument::read(path)?;
    let handoff = pipeline.process(upload).await?;
    let analysis = handoff.analysis_result.as_deref().and_then(parse_analysis);
    Ok(ResultsView::new(Some(handoff.file_name), analysis))
}
