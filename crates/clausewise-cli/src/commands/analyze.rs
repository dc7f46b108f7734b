//! Analyze command implementation.

use super::open_document;
use crate::cli::AnalyzeArgs;
use crate::error::{CliError, Result};
use crate::output::Formatter;
use clausewise_analyzer::DocumentPipeline;
use clausewise_domain::traits::{LlmProvider, TextExtractor};
use clausewise_domain::ResultsView;
use std::fmt::Display;

/// Execute the analyze command.
pub async fn execute_analyze<E, L>(
    args: AnalyzeArgs,
    pipeline: &DocumentPipeline<E, L>,
    formatter: &Formatter,
) -> Result<()>
where
    E: TextExtractor,
    E::Error: Display,
    L: LlmProvider,
    L::Error: Display,
{
    let mut view = open_document(&args.file, pipeline).await?;
    println!("{}", render_analysis(&args, &mut view, formatter)?);
    Ok(())
}

/// Apply the command-line filters to the view and render it.
pub fn render_analysis(
    args: &AnalyzeArgs,
    view: &mut ResultsView,
    formatter: &Formatter,
) -> Result<String> {
    view.set_category(args.category.into());
    if let Some(query) = &args.search {
        view.set_query(query.as_str());
    }
    if let Some(id) = args.expand {
        if view.toggle_expanded(id).is_none() {
            return Err(CliError::InvalidInput(format!("No clause with id {}", id)));
        }
    }
    formatter.format_results(view)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::CategoryArg;
    use crate::config::OutputFormat;
    use clausewise_domain::{AnalysisResult, ClauseGroups, ClauseItem};
    use std::path::PathBuf;

    fn args(category: CategoryArg, search: Option<&str>, expand: Option<u32>) -> AnalyzeArgs {
        AnalyzeArgs {
            file: PathBuf::from("lease.pdf"),
            category,
            search: search.map(str::to_string),
            expand,
        }
    }

    fn view() -> ResultsView {
        ResultsView::new(
            Some("lease.pdf".to_string()),
            Some(AnalysisResult {
                summary: String::new(),
                clauses: ClauseGroups {
                    safe: vec![ClauseItem::new("Payment due", "Pay on time.")],
                    doubtful: vec![],
                    needs_attention: vec![ClauseItem::new("Liability capped", "Limited recovery.")],
                },
                risks: vec![],
            }),
        )
    }

    #[test]
    fn test_filters_compose() {
        let formatter = Formatter::new(OutputFormat::Json, false);

        let mut v = view();
        let output = render_analysis(&args(CategoryArg::Danger, Some("LIABILITY"), None), &mut v, &formatter)
            .unwrap();
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(value["clauses"].as_array().unwrap().len(), 1);
        assert_eq!(value["clauses"][0]["id"], 2);

        let mut v = view();
        let output = render_analysis(&args(CategoryArg::Safe, Some("liability"), None), &mut v, &formatter)
            .unwrap();
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert!(value["clauses"].as_array().unwrap().is_empty());
    }

    #[test]
    fn test_expand_unknown_clause() {
        let formatter = Formatter::new(OutputFormat::Table, false);
        let mut v = view();
        let result = render_analysis(&args(CategoryArg::All, None, Some(9)), &mut v, &formatter);
        assert!(matches!(result, Err(CliError::InvalidInput(_))));
    }

    #[test]
    fn test_expand_known_clause() {
        let formatter = Formatter::new(OutputFormat::Table, false);
        let mut v = view();
        let output = render_analysis(&args(CategoryArg::All, None, Some(1)), &mut v, &formatter).unwrap();
        assert!(output.contains("Clause #1 [Safe]"));
    }
}
