//! Clausewise Analyzer
//!
//! Turns an uploaded contract into a clause classification, and answers
//! follow-up questions about individual clauses.
//!
//! # Architecture
//!
//! ```text
//! Upload → PDF text → Analyzer → LLM → raw JSON → parse_analysis → ResultsView
//!                                                                     │
//!                                  ClauseAssistant ← ChatSession ←────┘
//! ```
//!
//! Every fallible step is caught where it happens. Analysis failures become
//! `None` (the "no analysis" state); chat failures are recorded on the
//! session and the user retries by asking again. Nothing is retried
//! automatically.
//!
//! # Example Usage
//!
//! ```no_run
//! use clausewise_analyzer::{parse_analysis, Analyzer, AnalyzerConfig};
//! use clausewise_domain::ResultsView;
//! use clausewise_llm::GeminiProvider;
//!
//! # async fn example(text: &str) {
//! let llm = GeminiProvider::with_defaults(std::env::var("GOOGLE_API_KEY").ok());
//! let analyzer = Analyzer::new(llm, AnalyzerConfig::default());
//!
//! let raw = analyzer.analyze(text).await;
//! let analysis = raw.as_deref().and_then(parse_analysis);
//! let view = ResultsView::new(Some("lease.pdf".to_string()), analysis);
//! println!("Overall risk: {}", view.overall_risk());
//! # }
//! ```

#![warn(missing_docs)]

mod analyzer;
mod assistant;
mod config;
mod error;
mod parser;
mod pipeline;
mod prompt;
mod types;
mod upload;


pub use analyzer::Analyzer;
pub use assistant::{sanitize_answer, ClauseAssistant, CHAT_ERROR_MESSAGE};
pub use config::AnalyzerConfig;
pub use error::AnalyzerError;
pub use parser::{parse_analysis, strip_code_fences, try_parse_analysis};
pub use pipeline::DocumentPipeline;
pub use prompt::{AnalysisPrompt, ClausePrompt, ANALYSIS_INSTRUCTIONS, RESPONSE_SCHEMA};
pub use types::{AnalysisHandoff, ChatOutcome};
pub use upload::{is_accepted_upload, UploadKind, UploadedDocument};
