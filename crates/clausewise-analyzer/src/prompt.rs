//! Prompt construction for document analysis and clause questions

use crate::config::AnalyzerConfig;
use clausewise_domain::traits::{GenerationRequest, MIME_JSON, MIME_TEXT};

/// Fixed instructions sent ahead of the document text
pub const ANALYSIS_INSTRUCTIONS: &str = r#"You are an AI assistant simplifying legal documents.

The user uploaded a rental or agreement document. Do the following:

1. Identify important clauses from the text.
2. For each clause, return:
   - "original": the exact clause text from the document
   - "explanation": a very simple explanation in plain English
3. Categorize each clause into one of:
   - ✅ safe → standard, fair, harmless, or routine clauses.
   - ⚠️ doubtful → vague, unclear, or slightly restrictive clauses that may need review.
   - ❗ needs_attention → very one-sided, unfair, or high-risk clauses that could cause legal/financial harm.
4. Highlight overall risks separately.

⚠️ Rules:
- Do NOT classify basic details (e.g., rent amount, dates, parties, responsibilities) as "needs_attention" unless they clearly create unusual legal risk.
- Be conservative: mark as "needs_attention" only if the clause is significantly risky.
- Always include all three categories (use empty arrays if none).
- Explanations must be short and simple (max 1–2 sentences).

⚠️ Important: Output ONLY valid JSON in this structure:

{
  "summary": "...",
  "clauses": {
    "safe": [
      { "original": "...", "explanation": "..." }
    ],
    "doubtful": [
      { "original": "...", "explanation": "..." }
    ],
    "needs_attention": [
      { "original": "...", "explanation": "..." }
    ]
  },
  "risks": [
    "..."
  ]
}"#;

/// Declared output schema for the analysis call
pub const RESPONSE_SCHEMA: &str = r#"{
  "type": "object",
  "properties": {
    "summary": { "type": "string" },
    "clauses": {
      "type": "object",
      "properties": {
        "safe": {
          "type": "array",
          "items": {
            "type": "object",
            "properties": {
              "original": { "type": "string" },
              "explanation": { "type": "string" }
            },
            "required": ["original", "explanation"]
          }
        },
        "doubtful": {
          "type": "array",
          "items": {
            "type": "object",
            "properties": {
              "original": { "type": "string" },
              "explanation": { "type": "string" }
            },
            "required": ["original", "explanation"]
          }
        },
        "needs_attention": {
          "type": "array",
          "items": {
            "type": "object",
            "properties": {
              "original": { "type": "string" },
              "explanation": { "type": "string" }
            },
            "required": ["original", "explanation"]
          }
        }
      },
      "required": ["safe", "doubtful", "needs_attention"]
    },
    "risks": { "type": "array", "items": { "type": "string" } }
  },
  "required": ["summary", "clauses", "risks"]
}"#;

const CHAT_INSTRUCTIONS: &str = "You are a helpful legal assistant. Answer the user's question about the given clause in clear, simple language. If relevant, mention potential risks or negotiation tips. Do not use Markdown formatting; output plain text only.";

/// Builds the document analysis request
pub struct AnalysisPrompt<'a> {
    text: &'a str,
}

impl<'a> AnalysisPrompt<'a> {
    /// Create a prompt for the given document text
    ///
    /// The text is sent as is; an empty document is not rejected here.
    pub fn new(text: &'a str) -> Self {
        Self { text }
    }

    /// Build the two-part request: instructions, then the document text
    pub fn request(&self, config: &AnalyzerConfig) -> GenerationRequest {
        GenerationRequest {
            parts: vec![ANALYSIS_INSTRUCTIONS.to_string(), self.text.to_string()],
            temperature: config.analysis_temperature,
            max_output_tokens: config.analysis_max_output_tokens,
            response_mime_type: MIME_JSON.to_string(),
            response_schema: Some(RESPONSE_SCHEMA.to_string()),
        }
    }
}

/// Builds a follow-up question about one clause
pub struct ClausePrompt<'a> {
    clause_text: &'a str,
    question: &'a str,
}

impl<'a> ClausePrompt<'a> {
    /// Create a prompt for a question about a clause
    pub fn new(clause_text: &'a str, question: &'a str) -> Self {
        Self {
            clause_text,
            question,
        }
    }

    /// Build the complete prompt text
    pub fn build(&self) -> String {
        let mut prompt = String::new();
        prompt.push_str(CHAT_INSTRUCTIONS);
        prompt.push_str("\n\nClause:\n\"\"\"");
        prompt.push_str(self.clause_text);
        prompt.push_str("\"\"\"\n\nQuestion: ");
        prompt.push_str(self.question);
        prompt
    }

    /// Build the single-part plain text request
    pub fn request(&self, config: &AnalyzerConfig) -> GenerationRequest {
        GenerationRequest {
            parts: vec![self.build()],
            temperature: config.chat_temperature,
            max_output_tokens: config.chat_max_output_tokens,
            response_mime_type: MIME_TEXT.to_string(),
            response_schema: None,
        }
    }
}
