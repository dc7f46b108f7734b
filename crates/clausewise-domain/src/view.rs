//! Clause view model and results presenter state
//!
//! The view model flattens the three categorized lists into one sequence:
//! every `safe` item, then every `doubtful` item (as `Warning`), then every
//! `needs_attention` item (as `Danger`). Ids start at 1 and are contiguous.
//! Ids are positional, so they are only meaningful for the analysis they
//! were derived from.

use crate::category::{ClauseCategory, RiskTier};
use crate::clause::{AnalysisResult, ClauseItem};
use crate::filter::{CategoryFilter, ClauseFilter};
use serde::{Deserialize, Serialize};

/// A clause in the flattened, display-ready list
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlatClause {
    /// Sequential id, starting at 1
    pub id: u32,

    /// Display category
    pub category: ClauseCategory,

    /// Verbatim clause text
    pub original_text: String,

    /// Plain-language explanation
    pub explanation: String,
}

/// Flatten an analysis into the display list
///
/// A missing analysis flattens to an empty list.
pub fn flatten(result: Option<&AnalysisResult>) -> Vec<FlatClause> {
    let Some(result) = result else {
        return Vec::new();
    };

    let groups: [(ClauseCategory, &[ClauseItem]); 3] = [
        (ClauseCategory::Safe, result.clauses.safe.as_slice()),
        (ClauseCategory::Warning, result.clauses.doubtful.as_slice()),
        (ClauseCategory::Danger, result.clauses.needs_attention.as_slice()),
    ];

    let mut flat = Vec::with_capacity(result.clause_count());
    let mut id = 1;
    for (category, items) in groups {
        for item in items {
            flat.push(FlatClause {
                id,
                category,
                original_text: item.original.clone(),
                explanation: item.explanation.clone(),
            });
            id += 1;
        }
    }
    flat
}

/// Per-category clause counts
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClauseCounts {
    /// Number of safe clauses
    pub safe: usize,
    /// Number of warning clauses
    pub warning: usize,
    /// Number of danger clauses
    pub danger: usize,
}

impl ClauseCounts {
    /// Count clauses in an analysis; all zero when there is none
    pub fn of(result: Option<&AnalysisResult>) -> Self {
        match result {
            Some(r) => Self {
                safe: r.clauses.safe.len(),
                warning: r.clauses.doubtful.len(),
                danger: r.clauses.needs_attention.len(),
            },
            None => Self::default(),
        }
    }

    /// Total clause count
    pub fn total(&self) -> usize {
        self.safe + self.warning + self.danger
    }

    /// Overall document risk by precedence
    pub fn overall_risk(&self) -> RiskTier {
        RiskTier::from_counts(self.warning, self.danger)
    }
}

/// Presenter state for one analyzed document
///
/// Owns the (possibly absent) analysis, its flattened clauses, the active
/// filter and which single clause, if any, is expanded. Every accessor is
/// total over a missing analysis.
#[derive(Debug, Clone)]
pub struct ResultsView {
    file_name: Option<String>,
    analysis: Option<AnalysisResult>,
    clauses: Vec<FlatClause>,
    filter: ClauseFilter,
    expanded: Option<u32>,
}

impl ResultsView {
    /// Create a view over an analysis
    pub fn new(file_name: Option<String>, analysis: Option<AnalysisResult>) -> Self {
        let clauses = flatten(analysis.as_ref());
        Self {
            file_name,
            analysis,
            clauses,
            filter: ClauseFilter::default(),
            expanded: None,
        }
    }

    /// Name of the analyzed file, if known
    pub fn file_name(&self) -> Option<&str> {
        self.file_name.as_deref()
    }

    /// Whether an analysis is available at all
    pub fn has_data(&self) -> bool {
        self.analysis.is_some()
    }

    /// The underlying analysis
    pub fn analysis(&self) -> Option<&AnalysisResult> {
        self.analysis.as_ref()
    }

    /// Document summary; `None` when absent or empty
    pub fn summary(&self) -> Option<&str> {
        self.analysis
            .as_ref()
            .map(|a| a.summary.as_str())
            .filter(|s| !s.trim().is_empty())
    }

    /// Overall risks; empty when there is no analysis
    pub fn risks(&self) -> &[String] {
        self.analysis.as_ref().map(|a| a.risks.as_slice()).unwrap_or(&[])
    }

    /// Per-category counts
    pub fn counts(&self) -> ClauseCounts {
        ClauseCounts::of(self.analysis.as_ref())
    }

    /// Overall document risk
    pub fn overall_risk(&self) -> RiskTier {
        self.counts().overall_risk()
    }

    /// Every flattened clause
    pub fn clauses(&self) -> &[FlatClause] {
        &self.clauses
    }

    /// Look up a clause by id
    pub fn clause(&self, id: u32) -> Option<&FlatClause> {
        self.clauses.iter().find(|c| c.id == id)
    }

    /// Active filter
    pub fn filter(&self) -> &ClauseFilter {
        &self.filter
    }

    /// Change the category filter
    pub fn set_category(&mut self, category: CategoryFilter) {
        self.filter.category = category;
    }

    /// Change the search text
    pub fn set_query(&mut self, query: impl Into<String>) {
        self.filter.query = query.into();
    }

    /// Clauses passing the active filter, in flattened order
    pub fn visible_clauses(&self) -> Vec<&FlatClause> {
        self.filter.apply(&self.clauses)
    }

    /// Expand `id`, or collapse it if it is already expanded
    ///
    /// Returns the newly expanded id. Unknown ids collapse everything.
    pub fn toggle_expanded(&mut self, id: u32) -> Option<u32> {
        self.expanded = if self.expanded == Some(id) || self.clause(id).is_none() {
            None
        } else {
            Some(id)
        };
        self.expanded
    }

    /// The expanded clause, if any
    pub fn expanded(&self) -> Option<&FlatClause> {
        self.expanded.and_then(|id| self.clause(id))
    }
}
