//! Output formatting for the CLI.

use crate::config::OutputFormat;
use crate::error::Result;
use clausewise_domain::{
    CategoryFilter, ChatRole, ChatSession, ClauseCategory, FlatClause, ResultsView, RiskTier,
    SUGGESTED_QUESTIONS,
};
use colored::*;
use tabled::{
    builder::Builder,
    settings::{object::Rows, Alignment, Modify, Style},
};

const EXCERPT_CHARS: usize = 60;

/// Output formatter.
pub struct Formatter {
    format: OutputFormat,
    color_enabled: bool,
}

impl Formatter {
    /// Create a new formatter.
    pub fn new(format: OutputFormat, color_enabled: bool) -> Self {
        Self {
            format,
            color_enabled,
        }
    }

    /// The selected output format.
    pub fn format(&self) -> OutputFormat {
        self.format
    }

    /// Format the results view: overview plus the filtered clause list.
    pub fn format_results(&self, view: &ResultsView) -> Result<String> {
        match self.format {
            OutputFormat::Json => self.format_results_json(view),
            OutputFormat::Table => Ok(self.format_results_table(view)),
        }
    }

    fn format_results_json(&self, view: &ResultsView) -> Result<String> {
        let counts = view.counts();
        let value = serde_json::json!({
            "file_name": view.file_name(),
            "has_data": view.has_data(),
            "overall_risk": view.overall_risk().as_str(),
            "counts": {
                "safe": counts.safe,
                "warning": counts.warning,
                "danger": counts.danger,
                "total": counts.total(),
            },
            "summary": view.summary(),
            "risks": view.risks(),
            "filter": {
                "category": view.filter().category,
                "query": view.filter().query,
            },
            "clauses": view.visible_clauses(),
        });
        Ok(serde_json::to_string_pretty(&value)?)
    }

    fn format_results_table(&self, view: &ResultsView) -> String {
        let mut out = String::new();
        out.push_str(&self.format_overview(view));

        if !view.has_data() {
            return out;
        }

        out.push('\n');
        out.push_str(&self.format_filter_bar(view.filter().category));
        out.push('\n');
        out.push_str(&self.format_clause_list(&view.visible_clauses(), &view.filter().query));

        if let Some(clause) = view.expanded() {
            out.push_str("\n\n");
            out.push_str(&self.format_clause_detail(clause));
        }
        out
    }

    /// Format the document header, risk, counts, summary and risks.
    pub fn format_overview(&self, view: &ResultsView) -> String {
        let mut out = String::new();
        let name = view.file_name().unwrap_or("Untitled document");
        out.push_str(&self.colorize(&format!("Analysis Results: {}", name), "bold"));
        out.push('\n');

        if !view.has_data() {
            out.push_str(&self.warning(
                "No analysis available. Check the API key and try uploading the document again.",
            ));
            out.push('\n');
            return out;
        }

        let counts = view.counts();
        out.push_str(&format!(
            "Overall risk: {}\n",
            self.risk_label(view.overall_risk())
        ));
        out.push_str(&format!(
            "Clauses: {} total | {} {} | {} {} | {} {}\n",
            counts.total(),
            counts.safe,
            self.badge(ClauseCategory::Safe),
            counts.warning,
            self.badge(ClauseCategory::Warning),
            counts.danger,
            self.badge(ClauseCategory::Danger),
        ));

        if let Some(summary) = view.summary() {
            out.push_str("\nSummary\n");
            out.push_str(summary);
            out.push('\n');
        }

        out.push_str(&self.format_risks(view.risks()));
        out
    }

    /// Format the overall risks list; empty when there are none.
    pub fn format_risks(&self, risks: &[String]) -> String {
        if risks.is_empty() {
            return String::new();
        }
        let mut out = String::from("\nKey Risks\n");
        for risk in risks {
            out.push_str(&format!("  {} {}\n", self.colorize("!", "red"), risk));
        }
        out
    }

    /// Format the filter buttons, marking the active one.
    pub fn format_filter_bar(&self, active: CategoryFilter) -> String {
        let labels: Vec<String> = CategoryFilter::OPTIONS
            .iter()
            .map(|option| {
                if *option == active {
                    self.colorize(&format!("[{}]", option.label()), "cyan")
                } else {
                    format!(" {} ", option.label())
                }
            })
            .collect();
        format!("Filter: {}", labels.join(" "))
    }

    /// Format the filtered clause list as a table.
    pub fn format_clause_list(&self, clauses: &[&FlatClause], query: &str) -> String {
        if clauses.is_empty() {
            let message = if query.is_empty() {
                "No clauses in this category."
            } else {
                "No clauses match your search. Try a different search term or filter."
            };
            return self.colorize(message, "yellow");
        }

        let mut builder = Builder::default();
        builder.push_record(["ID", "Category", "Clause", "Explanation"]);

        for clause in clauses {
            builder.push_record([
                clause.id.to_string(),
                clause.category.label().to_string(),
                excerpt(&clause.original_text, EXCERPT_CHARS),
                excerpt(&clause.explanation, EXCERPT_CHARS),
            ]);
        }

        let mut table = builder.build();
        table
            .with(Style::rounded())
            .with(Modify::new(Rows::first()).with(Alignment::center()));

        table.to_string()
    }

    /// Format the full detail of one clause.
    pub fn format_clause_detail(&self, clause: &FlatClause) -> String {
        format!(
            "Clause #{} [{}]\n\nOriginal text:\n{}\n\nWhat it means:\n{}\n",
            clause.id,
            self.badge(clause.category),
            clause.original_text,
            clause.explanation
        )
    }

    /// Format the chat transcript, pending state and error.
    pub fn format_transcript(&self, session: &ChatSession) -> String {
        let Some(clause) = session.selected() else {
            return self.info("No clause selected. Use 'select <id>' to ask about a clause.");
        };

        let mut out = format!(
            "Asking about clause #{}: {}\n\n",
            clause.id,
            excerpt(&clause.original_text, EXCERPT_CHARS)
        );
        for message in session.transcript() {
            let speaker = match message.role {
                ChatRole::User => self.colorize("You", "cyan"),
                ChatRole::Assistant => self.colorize("Assistant", "magenta"),
            };
            out.push_str(&format!("{}: {}\n", speaker, message.text));
        }
        if session.is_pending() {
            out.push_str(&self.info("Waiting for an answer..."));
            out.push('\n');
        }
        if let Some(error) = session.error() {
            out.push_str(&self.error(error));
            out.push('\n');
        }
        out
    }

    /// Format the suggested opening questions.
    pub fn format_suggestions(&self) -> String {
        let mut out = String::from("Suggested questions:\n");
        for (i, question) in SUGGESTED_QUESTIONS.iter().enumerate() {
            out.push_str(&format!("  {}. {}\n", i + 1, question));
        }
        out
    }

    /// Render a plain-text analysis report.
    pub fn format_report(&self, view: &ResultsView) -> String {
        let mut out = String::new();
        let name = view.file_name().unwrap_or("Untitled document");
        out.push_str(&format!("CLAUSE ANALYSIS REPORT\nDocument: {}\n", name));

        if !view.has_data() {
            out.push_str("\nNo analysis available.\n");
            return out;
        }

        let counts = view.counts();
        out.push_str(&format!("Overall risk: {}\n", view.overall_risk()));
        out.push_str(&format!(
            "Clauses: {} ({} safe, {} warning, {} danger)\n",
            counts.total(),
            counts.safe,
            counts.warning,
            counts.danger
        ));

        if let Some(summary) = view.summary() {
            out.push_str(&format!("\nSUMMARY\n{}\n", summary));
        }

        if !view.risks().is_empty() {
            out.push_str("\nKEY RISKS\n");
            for risk in view.risks() {
                out.push_str(&format!("- {}\n", risk));
            }
        }

        for category in ClauseCategory::ALL {
            let clauses: Vec<&FlatClause> = view
                .clauses()
                .iter()
                .filter(|c| c.category == category)
                .collect();
            if clauses.is_empty() {
                continue;
            }
            out.push_str(&format!("\n{} CLAUSES\n", category.label().to_uppercase()));
            for clause in clauses {
                out.push_str(&format!(
                    "{}. \"{}\"\n   {}\n",
                    clause.id, clause.original_text, clause.explanation
                ));
            }
        }
        out
    }

    /// Format a category badge.
    pub fn badge(&self, category: ClauseCategory) -> String {
        let color = match category {
            ClauseCategory::Safe => "green",
            ClauseCategory::Warning => "yellow",
            ClauseCategory::Danger => "red",
        };
        self.colorize(category.label(), color)
    }

    /// Format an overall risk tier.
    pub fn risk_label(&self, tier: RiskTier) -> String {
        let color = match tier {
            RiskTier::Low => "green",
            RiskTier::Medium => "yellow",
            RiskTier::High => "red",
        };
        self.colorize(tier.as_str(), color)
    }

    /// Format a success message.
    pub fn success(&self, message: &str) -> String {
        self.colorize(&format!("✓ {}", message), "green")
    }

    /// Format an error message.
    pub fn error(&self, message: &str) -> String {
        self.colorize(&format!("✗ {}", message), "red")
    }

    /// Format an info message.
    pub fn info(&self, message: &str) -> String {
        self.colorize(&format!("ℹ {}", message), "blue")
    }

    /// Format a warning message.
    pub fn warning(&self, message: &str) -> String {
        self.colorize(&format!("⚠ {}", message), "yellow")
    }

    /// Colorize text if color is enabled.
    fn colorize(&self, text: &str, color: &str) -> String {
        if !self.color_enabled {
            return text.to_string();
        }

        match color {
            "red" => text.red().to_string(),
            "green" => text.green().to_string(),
            "blue" => text.blue().to_string(),
            "yellow" => text.yellow().to_string(),
            "cyan" => text.cyan().to_string(),
            "magenta" => text.magenta().to_string(),
            "bold" => text.bold().to_string(),
            _ => text.to_string(),
        }
    }
}

/// Shorten text to `max` characters, marking the cut with an ellipsis.
fn excerpt(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let mut short: String = text.chars().take(max.saturating_sub(1)).collect();
    short.push('…');
    short
}

#[cfg(test)]
mod tests {
    use super::*;
    use clausewise_domain::{AnalysisResult, ClauseGroups, ClauseItem};

    fn create_test_view() -> ResultsView {
        let analysis = AnalysisResult {
            summary: "Standard lease.".to_string(),
            clauses: ClauseGroups {
                safe: vec![ClauseItem::new("Payment due on the 1st.", "Pay monthly.")],
                doubtful: vec![],
                needs_attention: vec![ClauseItem::new("Liability capped at $10.", "Limited recovery.")],
            },
            risks: vec!["Low liability cap.".to_string()],
        };
        ResultsView::new(Some("lease.pdf".to_string()), Some(analysis))
    }

    #[test]
    fn test_table_format() {
        let formatter = Formatter::new(OutputFormat::Table, false);
        let output = formatter.format_results(&create_test_view()).unwrap();
        assert!(output.contains("Analysis Results: lease.pdf"));
        assert!(output.contains("Overall risk: High"));
        assert!(output.contains("Clauses: 2 total"));
        assert!(output.contains("Key Risks"));
        assert!(output.contains("Explanation"));
        assert!(output.contains("[All]"));
    }

    #[test]
    fn test_json_format() {
        let formatter = Formatter::new(OutputFormat::Json, false);
        let mut view = create_test_view();
        view.set_category(CategoryFilter::Danger);
        let output = formatter.format_results(&view).unwrap();

        let value: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(value["overall_risk"], "High");
        assert_eq!(value["counts"]["total"], 2);
        assert_eq!(value["filter"]["category"], "danger");
        assert_eq!(value["clauses"].as_array().unwrap().len(), 1);
        assert_eq!(value["clauses"][0]["id"], 2);
    }

    #[test]
    fn test_no_data_state() {
        let formatter = Formatter::new(OutputFormat::Table, false);
        let view = ResultsView::new(Some("broken.pdf".to_string()), None);
        let output = formatter.format_results(&view).unwrap();
        assert!(output.contains("No analysis available"));
        assert!(!output.contains("Overall risk"));

        let json = Formatter::new(OutputFormat::Json, false)
            .format_results(&view)
            .unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["overall_risk"], "Low");
        assert_eq!(value["counts"]["total"], 0);
        assert!(value["summary"].is_null());
    }

    #[test]
    fn test_search_without_matches() {
        let formatter = Formatter::new(OutputFormat::Table, false);
        let mut view = create_test_view();
        view.set_query("arbitration");
        let output = formatter.format_results(&view).unwrap();
        assert!(output.contains("No clauses match your search"));
    }

    #[test]
    fn test_expanded_clause_detail() {
        let formatter = Formatter::new(OutputFormat::Table, false);
        let mut view = create_test_view();
        view.toggle_expanded(2);
        let output = formatter.format_results(&view).unwrap();
        assert!(output.contains("Clause #2 [Danger]"));
        assert!(output.contains("Liability capped at $10."));
    }

    #[test]
    fn test_report_groups_by_category() {
        let formatter = Formatter::new(OutputFormat::Table, true);
        let report = formatter.format_report(&create_test_view());
        assert!(report.contains("Document: lease.pdf"));
        assert!(report.contains("SAFE CLAUSES\n1. \"Payment due on the 1st.\""));
        assert!(report.contains("DANGER CLAUSES\n2."));
        assert!(!report.contains("WARNING CLAUSES"));
        assert!(report.contains("- Low liability cap."));
    }

    #[test]
    fn test_transcript_without_selection() {
        let formatter = Formatter::new(OutputFormat::Table, false);
        let output = formatter.format_transcript(&ChatSession::new());
        assert!(output.contains("No clause selected"));
    }

    #[test]
    fn test_excerpt() {
        assert_eq!(excerpt("short", 10), "short");
        assert_eq!(excerpt("abcdefghijkl", 5), "abcd…");
    }

    #[test]
    fn test_colorize_disabled() {
        let formatter = Formatter::new(OutputFormat::Table, false);
        assert_eq!(formatter.success("test"), "✓ test");
        assert_eq!(formatter.badge(ClauseCategory::Danger), "Danger");
    }
}
