//! Review command implementation.

use super::open_document;
use crate::cli::ReviewArgs;
use crate::config::Config;
use crate::error::Result;
use crate::output::Formatter;
use crate::repl;
use clausewise_analyzer::{ClauseAssistant, DocumentPipeline};
use clausewise_domain::traits::{LlmProvider, TextExtractor};
use std::fmt::Display;

/// Execute the review command: analyze, then enter the interactive session.
pub async fn execute_review<E, L>(
    args: ReviewArgs,
    pipeline: &DocumentPipeline<E, L>,
    assistant: &ClauseAssistant<L>,
    config: &Config,
    formatter: &Formatter,
) -> Result<()>
where
    E: TextExtractor,
    E::Error: Display,
    L: LlmProvider,
    L::Error: Display,
{
    let view = open_document(&args.file, pipeline).await?;
    println!("{}", formatter.format_overview(&view));
    repl::run_review(view, assistant, config, formatter).await
}
