//! Parse the model's analysis response

use crate::error::AnalyzerError;
use clausewise_domain::AnalysisResult;
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::warn;

// Anchored on the whole response; a fence in the middle of the text is left alone.
static CODE_FENCE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?is)^```(json)?\n(.*)\n```\s*$").expect("fence pattern is valid"));

/// Remove a code fence wrapping the entire response, if there is one
pub fn strip_code_fences(raw: &str) -> &str {
    match CODE_FENCE.captures(raw).and_then(|caps| caps.get(2)) {
        Some(body) => body.as_str(),
        None => raw,
    }
}

/// Parse a response into an analysis
///
/// # Errors
///
/// Returns `ResponseParse` if the (unfenced) text is not JSON of the
/// expected shape. Missing or `null` fields are not errors.
pub fn try_parse_analysis(raw: &str) -> Result<AnalysisResult, AnalyzerError> {
    Ok(serde_json::from_str(strip_code_fences(raw))?)
}

/// Parse a response into an analysis, or `None` if it is not one
///
/// Failures are logged and never propagated; no partial recovery is tried.
pub fn parse_analysis(raw: &str) -> Option<AnalysisResult> {
    match try_parse_analysis(raw) {
        Ok(result) => Some(result),
        Err(e) => {
            warn!("Failed to parse analysis response: {}", e);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clausewise_domain::{ClauseItem, ResultsView, RiskTier};

    const BARE: &str =
        r#"{"summary":"x","clauses":{"safe":[],"doubtful":[],"needs_attention":[]},"risks":[]}"#;

    #[test]
    fn test_fenced_and_bare_parse_identically() {
        let fenced = format!("```json\n{}\n```", BARE);
        let from_fenced = parse_analysis(&fenced).unwrap();
        let from_bare = parse_analysis(BARE).unwrap();

        assert_eq!(from_fenced, from_bare);
        assert_eq!(from_fenced.summary, "x");
        assert!(from_fenced.risks.is_empty());
        assert_eq!(from_fenced.clause_count(), 0);
    }

    #[test]
    fn test_strip_fence_variants() {
        assert_eq!(strip_code_fences("```\n{}\n```"), "{}");
        assert_eq!(strip_code_fences("```JSON\n{}\n```"), "{}");
        assert_eq!(strip_code_fences("```json\n{}\n```  \n"), "{}");
        assert_eq!(strip_code_fences("```json\n{\n\"a\": 1\n}\n```"), "{\n\"a\": 1\n}");
    }

    #[test]
    fn test_strip_requires_whole_string_match() {
        let embedded = "Here you go:\n```json\n{}\n```";
        assert_eq!(strip_code_fences(embedded), embedded);
        assert!(parse_analysis(embedded).is_none());

        // No newline after the opening marker
        assert_eq!(strip_code_fences("```json {}\n```"), "```json {}\n```");
    }

    #[test]
    fn test_not_json_is_none() {
        assert!(parse_analysis("not json").is_none());
        assert!(parse_analysis("").is_none());
        assert!(parse_analysis("null").is_none());
        assert!(matches!(
            try_parse_analysis("not json"),
            Err(AnalyzerError::ResponseParse(_))
        ));
    }

    #[test]
    fn test_none_result_renders_empty_state() {
        let view = ResultsView::new(Some("lease.pdf".to_string()), parse_analysis("not json"));
        assert!(!view.has_data());
        assert!(view.summary().is_none());
        assert!(view.risks().is_empty());
        assert_eq!(view.counts().total(), 0);
        assert_eq!(view.overall_risk(), RiskTier::Low);
        assert!(view.visible_clauses().is_empty());
    }

    #[test]
    fn test_partial_response_defaults() {
        let result = parse_analysis(r#"{"clauses":{"doubtful":[{"original":"Fees may change."}]}}"#)
            .unwrap();
        assert_eq!(result.summary, "");
        assert!(result.clauses.safe.is_empty());
        assert_eq!(
            result.clauses.doubtful,
            vec![ClauseItem::new("Fees may change.", "")]
        );
    }

    #[test]
    fn test_wrong_typed_fields_keep_the_analysis() {
        let raw = r#"{"summary":"Lease","clauses":{"safe":[],"doubtful":[],"needs_attention":[{"original":"Tenant waives all claims","explanation":"One-sided."}]},"risks":"none"}"#;
        let view = ResultsView::new(Some("lease.pdf".to_string()), parse_analysis(raw));
        assert!(view.has_data());
        assert!(view.risks().is_empty());
        assert_eq!(view.counts().danger, 1);
        assert_eq!(view.overall_risk(), RiskTier::High);
    }
}
