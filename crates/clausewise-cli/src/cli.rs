//! CLI command definitions and argument parsing.

use clap::{Parser, Subcommand};
use clausewise_domain::CategoryFilter;
use std::path::PathBuf;

/// Clausewise - Plain-language risk review for contracts and leases.
#[derive(Debug, Parser)]
#[command(name = "clausewise")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Output format
    #[arg(short, long, value_enum, global = true)]
    pub format: Option<CliFormat>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Configuration file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// API key for the hosted model
    #[arg(long, env = "GOOGLE_API_KEY", hide_env_values = true, global = true)]
    pub api_key: Option<String>,

    /// Model name
    #[arg(short, long, global = true)]
    pub model: Option<String>,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

/// Output format options.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum CliFormat {
    /// Table format (default)
    Table,
    /// JSON format
    Json,
}

/// CLI commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Analyze a document and print the results
    Analyze(AnalyzeArgs),

    /// Analyze a document, then explore it and ask about clauses interactively
    Review(ReviewArgs),

    /// Print the text extracted from a document
    Extract(ExtractArgs),
}

/// Arguments for the analyze command.
#[derive(Debug, Parser)]
pub struct AnalyzeArgs {
    /// Document to analyze (.pdf)
    pub file: PathBuf,

    /// Only show clauses of this category
    #[arg(long, value_enum, default_value = "all")]
    pub category: CategoryArg,

    /// Only show clauses containing this text (case-insensitive)
    #[arg(short, long)]
    pub search: Option<String>,

    /// Show the full detail of one clause
    #[arg(short, long)]
    pub expand: Option<u32>,
}

/// Arguments for the review command.
#[derive(Debug, Parser)]
pub struct ReviewArgs {
    /// Document to review (.pdf)
    pub file: PathBuf,
}

/// Arguments for the extract command.
#[derive(Debug, Parser)]
pub struct ExtractArgs {
    /// Document to read (.pdf)
    pub file: PathBuf,
}

/// Category filter argument.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum CategoryArg {
    /// Every clause
    All,
    /// Safe clauses
    Safe,
    /// Clauses that may need review
    Warning,
    /// High-risk clauses
    Danger,
}

impl From<CliFormat> for crate::config::OutputFormat {
    fn from(format: CliFormat) -> Self {
        match format {
            CliFormat::Table => crate::config::OutputFormat::Table,
            CliFormat::Json => crate::config::OutputFormat::Json,
        }
    }
}

impl From<CategoryArg> for CategoryFilter {
    fn from(category: CategoryArg) -> Self {
        match category {
            CategoryArg::All => CategoryFilter::All,
            CategoryArg::Safe => CategoryFilter::Safe,
            CategoryArg::Warning => CategoryFilter::Warning,
            CategoryArg::Danger => CategoryFilter::Danger,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_analyze_command() {
        let cli = Cli::parse_from([
            "clausewise",
            "analyze",
            "lease.pdf",
            "--category",
            "danger",
            "--search",
            "liability",
        ]);
        match cli.command {
            Command::Analyze(args) => {
                assert_eq!(args.file, PathBuf::from("lease.pdf"));
                assert!(matches!(args.category, CategoryArg::Danger));
                assert_eq!(args.search.as_deref(), Some("liability"));
                assert!(args.expand.is_none());
            }
            _ => panic!("Expected Analyze command"),
        }
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::parse_from(["clausewise", "review", "lease.pdf", "--no-color", "-vv", "-f", "json"]);
        assert!(cli.no_color);
        assert_eq!(cli.verbose, 2);
        assert!(matches!(cli.format, Some(CliFormat::Json)));
        assert!(matches!(cli.command, Command::Review(_)));
    }

    #[test]
    fn test_missing_subcommand_is_an_error() {
        assert!(Cli::try_parse_from(["clausewise"]).is_err());
    }

    #[test]
    fn test_category_conversion() {
        let filter: CategoryFilter = CategoryArg::Warning.into();
        assert_eq!(filter, CategoryFilter::Warning);
        let filter: CategoryFilter = CategoryArg::All.into();
        assert_eq!(filter, CategoryFilter::All);
    }
}
