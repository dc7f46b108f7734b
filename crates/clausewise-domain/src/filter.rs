//! Clause filtering: category selection and text search
//!
//! The two filters compose conjunctively and never reorder: the output keeps
//! the flattened order.

use crate::category::ClauseCategory;
use crate::view::FlatClause;
use serde::{Deserialize, Serialize};

/// Category filter control
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CategoryFilter {
    /// Every category (identity)
    #[default]
    All,
    /// Only safe clauses
    Safe,
    /// Only warning clauses
    Warning,
    /// Only danger clauses
    Danger,
}

impl CategoryFilter {
    /// All filter options in display order
    pub const OPTIONS: [CategoryFilter; 4] = [
        CategoryFilter::All,
        CategoryFilter::Safe,
        CategoryFilter::Warning,
        CategoryFilter::Danger,
    ];

    /// Whether a clause of `category` passes this filter
    pub fn admits(&self, category: ClauseCategory) -> bool {
        match self.category() {
            None => true,
            Some(wanted) => wanted == category,
        }
    }

    /// The selected category, `None` for `All`
    pub fn category(&self) -> Option<ClauseCategory> {
        match self {
            CategoryFilter::All => None,
            CategoryFilter::Safe => Some(ClauseCategory::Safe),
            CategoryFilter::Warning => Some(ClauseCategory::Warning),
            CategoryFilter::Danger => Some(ClauseCategory::Danger),
        }
    }

    /// Label of the filter control
    pub fn label(&self) -> &'static str {
        match self.category() {
            None => "All",
            Some(category) => category.filter_label(),
        }
    }

    /// Parse a filter from a string (`all` or any category name)
    pub fn parse(s: &str) -> Option<Self> {
        if s.trim().eq_ignore_ascii_case("all") {
            return Some(CategoryFilter::All);
        }
        ClauseCategory::parse(s).map(Self::from)
    }
}

impl From<ClauseCategory> for CategoryFilter {
    fn from(category: ClauseCategory) -> Self {
        match category {
            ClauseCategory::Safe => CategoryFilter::Safe,
            ClauseCategory::Warning => CategoryFilter::Warning,
            ClauseCategory::Danger => CategoryFilter::Danger,
        }
    }
}

impl std::str::FromStr for CategoryFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("Invalid filter: {}", s))
    }
}

/// Combined category and search filter
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClauseFilter {
    /// Category selection
    pub category: CategoryFilter,

    /// Case-insensitive search text; empty matches everything
    pub query: String,
}

impl ClauseFilter {
    /// Create a filter admitting everything
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the category selection
    pub fn with_category(mut self, category: CategoryFilter) -> Self {
        self.category = category;
        self
    }

    /// Set the search text
    pub fn with_query(mut self, query: impl Into<String>) -> Self {
        self.query = query.into();
        self
    }

    /// Whether a clause passes both filters
    pub fn matches(&self, clause: &FlatClause) -> bool {
        self.category.admits(clause.category) && self.matches_text(clause)
    }

    /// Apply the filter, keeping flattened order
    pub fn apply<'a>(&self, clauses: &'a [FlatClause]) -> Vec<&'a FlatClause> {
        clauses.iter().filter(|c| self.matches(c)).collect()
    }

    fn matches_text(&self, clause: &FlatClause) -> bool {
        if self.query.is_empty() {
            return true;
        }
        let needle = self.query.to_lowercase();
        clause.original_text.to_lowercase().contains(&needle)
            || clause.explanation.to_lowercase().contains(&needle)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn clause(id: u32, category: ClauseCategory, text: &str, explanation: &str) -> FlatClause {
        FlatClause {
            id,
            category,
            original_text: text.to_string(),
            explanation: explanation.to_string(),
        }
    }

    fn sample() -> Vec<FlatClause> {
        vec![
            clause(1, ClauseCategory::Safe, "Payment due", "Pay on the first."),
            clause(2, ClauseCategory::Danger, "Liability capped", "Landlord pays little."),
        ]
    }

    #[test]
    fn test_category_and_search_compose() {
        let clauses = sample();

        let filter = ClauseFilter::new()
            .with_category(CategoryFilter::Danger)
            .with_query("liability");
        let ids: Vec<u32> = filter.apply(&clauses).iter().map(|c| c.id).collect();
        assert_eq!(ids, vec![2]);

        let filter = ClauseFilter::new()
            .with_category(CategoryFilter::Safe)
            .with_query("liability");
        assert!(filter.apply(&clauses).is_empty());
    }

    #[test]
    fn test_empty_filter_is_identity() {
        let clauses = sample();
        let visible = ClauseFilter::new().apply(&clauses);
        assert_eq!(visible.len(), 2);
        assert_eq!(visible[0].id, 1);
    }

    #[test]
    fn test_search_matches_explanation() {
        let clauses = sample();
        let visible = ClauseFilter::new().with_query("PAYS LITTLE").apply(&clauses);
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].id, 2);
    }

    #[test]
    fn test_filter_parse_and_labels() {
        assert_eq!(CategoryFilter::parse("ALL"), Some(CategoryFilter::All));
        assert_eq!(CategoryFilter::parse("doubtful"), Some(CategoryFilter::Warning));
        assert_eq!(CategoryFilter::parse("nope"), None);
        assert_eq!(CategoryFilter::All.label(), "All");
        assert_eq!(CategoryFilter::Danger.label(), "High Risk");
        assert!(CategoryFilter::All.admits(ClauseCategory::Danger));
        assert!(!CategoryFilter::Safe.admits(ClauseCategory::Warning));
    }
}
