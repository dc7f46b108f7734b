//! Clause module - the analysis shape returned by the hosted model
//!
//! The response schema is only a hint to the model, so every field here
//! defaults when it is missing, `null` or of the wrong type instead of
//! failing the whole parse. List entries that do not fit are dropped.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// A verbatim excerpt from the document and its plain-language gloss
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClauseItem {
    /// The exact clause text from the document
    #[serde(default, deserialize_with = "lenient")]
    pub original: String,

    /// A short explanation in plain English
    #[serde(default, deserialize_with = "lenient")]
    pub explanation: String,
}

impl ClauseItem {
    /// Create a clause item
    pub fn new(original: impl Into<String>, explanation: impl Into<String>) -> Self {
        Self {
            original: original.into(),
            explanation: explanation.into(),
        }
    }
}

/// The three model-assigned clause lists
///
/// All three lists are always present after deserialization, possibly empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClauseGroups {
    /// Standard, fair or routine clauses
    #[serde(default, deserialize_with = "lenient_list")]
    pub safe: Vec<ClauseItem>,

    /// Vague or slightly restrictive clauses that may need review
    #[serde(default, deserialize_with = "lenient_list")]
    pub doubtful: Vec<ClauseItem>,

    /// One-sided or high-risk clauses
    #[serde(default, deserialize_with = "lenient_list")]
    pub needs_attention: Vec<ClauseItem>,
}

/// A complete document analysis
///
/// Created once per uploaded document and never mutated afterwards.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisResult {
    /// Document-level summary
    #[serde(default, deserialize_with = "lenient")]
    pub summary: String,

    /// Categorized clauses
    #[serde(default, deserialize_with = "lenient")]
    pub clauses: ClauseGroups,

    /// Free-text overall risks, unordered
    #[serde(default, deserialize_with = "lenient_list")]
    pub risks: Vec<String>,
}

impl AnalysisResult {
    /// Total number of clauses across all categories
    pub fn clause_count(&self) -> usize {
        self.clauses.safe.len() + self.clauses.doubtful.len() + self.clauses.needs_attention.len()
    }
}

fn lenient<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + DeserializeOwned,
{
    let value = Value::deserialize(deserializer)?;
    Ok(T::deserialize(value).unwrap_or_default())
}

fn lenient_list<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let items = match Value::deserialize(deserializer)? {
        Value::Array(items) => items,
        _ => return Ok(Vec::new()),
    };
    Ok(items
        .into_iter()
        .filter_map(|item| T::deserialize(item).ok())
        .collect())
}
