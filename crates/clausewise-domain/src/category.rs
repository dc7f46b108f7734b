//! Category module - clause categories and the document risk tier

use serde::{Deserialize, Serialize};
use std::fmt;

/// Display category of a flattened clause
///
/// The model's `doubtful` list maps to `Warning` and `needs_attention` maps to `Danger`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClauseCategory {
    /// Standard, harmless clause
    Safe,

    /// Clause that may need review
    Warning,

    /// High-risk clause
    Danger,
}

impl ClauseCategory {
    /// All categories in flattening order
    pub const ALL: [ClauseCategory; 3] = [
        ClauseCategory::Safe,
        ClauseCategory::Warning,
        ClauseCategory::Danger,
    ];

    /// Get the category name as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            ClauseCategory::Safe => "safe",
            ClauseCategory::Warning => "warning",
            ClauseCategory::Danger => "danger",
        }
    }

    /// Badge label shown next to a clause
    pub fn label(&self) -> &'static str {
        match self {
            ClauseCategory::Safe => "Safe",
            ClauseCategory::Warning => "Warning",
            ClauseCategory::Danger => "Danger",
        }
    }

    /// Label of the filter control selecting this category
    pub fn filter_label(&self) -> &'static str {
        match self {
            ClauseCategory::Safe => "Safe",
            ClauseCategory::Warning => "Warning",
            ClauseCategory::Danger => "High Risk",
        }
    }

    /// Parse a category from a string
    ///
    /// Accepts both the display names and the model's list names.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "safe" => Some(ClauseCategory::Safe),
            "warning" | "doubtful" => Some(ClauseCategory::Warning),
            "danger" | "needs_attention" | "high" | "high-risk" => Some(ClauseCategory::Danger),
            _ => None,
        }
    }
}

impl fmt::Display for ClauseCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ClauseCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("Invalid category: {}", s))
    }
}

/// Overall document risk
///
/// Derived by precedence, not by weighting: a single danger clause makes the
/// document `High` no matter how many safe clauses surround it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RiskTier {
    /// No warning or danger clauses
    Low,

    /// At least one warning clause, no danger clauses
    Medium,

    /// At least one danger clause
    High,
}

impl RiskTier {
    /// Derive the tier from warning and danger counts
    pub fn from_counts(warning: usize, danger: usize) -> Self {
        if danger > 0 {
            RiskTier::High
        } else if warning > 0 {
            RiskTier::Medium
        } else {
            RiskTier::Low
        }
    }

    /// Get the tier name as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            RiskTier::Low => "Low",
            RiskTier::Medium => "Medium",
            RiskTier::High => "High",
        }
    }
}

impl fmt::Display for RiskTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_parse() {
        assert_eq!(ClauseCategory::parse("Safe"), Some(ClauseCategory::Safe));
        assert_eq!(ClauseCategory::parse("doubtful"), Some(ClauseCategory::Warning));
        assert_eq!(ClauseCategory::parse("NEEDS_ATTENTION"), Some(ClauseCategory::Danger));
        assert_eq!(ClauseCategory::parse("danger"), Some(ClauseCategory::Danger));
        assert_eq!(ClauseCategory::parse("unknown"), None);
    }

    #[test]
    fn test_category_labels() {
        assert_eq!(ClauseCategory::Danger.label(), "Danger");
        assert_eq!(ClauseCategory::Danger.filter_label(), "High Risk");
        assert_eq!(ClauseCategory::Warning.to_string(), "warning");
    }

    #[test]
    fn test_risk_precedence() {
        assert_eq!(RiskTier::from_counts(0, 0), RiskTier::Low);
        assert_eq!(RiskTier::from_counts(3, 0), RiskTier::Medium);
        assert_eq!(RiskTier::from_counts(0, 1), RiskTier::High);
        assert_eq!(RiskTier::from_counts(10, 1), RiskTier::High);
        assert_eq!(RiskTier::High.to_string(), "High");
    }
}
