//! Clausewise Domain Layer
//!
//! This crate contains the data model and the pure decision logic behind a
//! clause review: the shape of a model-produced analysis, the flattened clause
//! view, filtering, and the per-clause chat session. It depends only on `serde`
//! and defines the trait interfaces the infrastructure crates implement.
//!
//! ## Key Concepts
//!
//! - **Clause**: a verbatim excerpt from the source document with a plain-language gloss
//! - **Category**: safe, warning (model: doubtful) or danger (model: needs_attention)
//! - **Overall risk**: document-level tier derived from category counts by precedence
//! - **Transcript**: ordered chat messages scoped to one selected clause
//!
//! ## Architecture
//!
//! - Pure business logic only, no I/O
//! - Every state object is owned by its caller; there are no globals
//! - Trait definitions for the model provider and the text extractor

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod category;
pub mod chat;
pub mod clause;
pub mod filter;
pub mod traits;
pub mod view;

// Re-exports for convenience
pub use category::{ClauseCategory, RiskTier};
pub use chat::{
    ChatMessage, ChatRole, ChatSession, PendingQuestion, SubmitRejection, GREETING,
    SUGGESTED_QUESTIONS,
};
pub use clause::{AnalysisResult, ClauseGroups, ClauseItem};
pub use filter::{CategoryFilter, ClauseFilter};
pub use view::{flatten, ClauseCounts, FlatClause, ResultsView};
