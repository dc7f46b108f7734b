//! Extract command implementation.

use crate::cli::ExtractArgs;
use crate::config::OutputFormat;
use crate::error::Result;
use crate::output::Formatter;
use clausewise_analyzer::{DocumentPipeline, UploadedDocument};
use clausewise_domain::traits::{LlmProvider, TextExtractor};
use std::fmt::Display;

/// Execute the extract command.
///
/// Text goes to stdout; the file summary goes to stderr so the text can be
/// piped.
pub fn execute_extract<E, L>(
    args: ExtractArgs,
    pipeline: &DocumentPipeline<E, L>,
    formatter: &Formatter,
) -> Result<()>
where
    E: TextExtractor,
    E::Error: Display,
    L: LlmProvider,
    L::Error: Display,
{
    let upload = UploadedDocument::read(&args.file)?;
    let text = pipeline.extract(&upload)?;

    match formatter.format() {
        OutputFormat::Json => {
            let value = serde_json::json!({
                "file_name": upload.file_name,
                "size": upload.size_label(),
                "characters": text.chars().count(),
                "text": text,
            });
            println!("{}", serde_json::to_string_pretty(&value)?);
        }
        OutputFormat::Table => {
            eprintln!(
                "{}",
                formatter.success(&format!(
                    "Extracted {} ({}, {} characters)",
                    upload.file_name,
                    upload.size_label(),
                    text.chars().count()
                ))
            );
            print!("{}", text);
        }
    }
    Ok(())
}
