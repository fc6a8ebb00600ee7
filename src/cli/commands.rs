//! CLI commands and argument parsing

use crate::github::StateFilter;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// GitHub release automation tools
#[derive(Parser, Debug)]
#[command(name = "gh-release-tools")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Configuration file (YAML)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Repository owner (overrides config and GITHUB_OWNER)
    #[arg(long, global = true)]
    pub owner: Option<String>,

    /// Repository name (overrides config and GITHUB_REPO)
    #[arg(long, global = true)]
    pub repo: Option<String>,

    /// Items per page, clamped to 1..=100
    #[arg(long, global = true, allow_negative_numbers = true)]
    pub per_page: Option<i64>,

    /// Output format
    #[arg(short, long, global = true, default_value = "json")]
    pub format: OutputFormat,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List milestones
    Milestones {
        /// Milestone state
        #[arg(long, value_enum, default_value = "open")]
        state: StateFilter,
    },

    /// Find a milestone by its exact title
    FindMilestone {
        /// Milestone title, e.g. v1.2.0
        title: String,
    },

    /// List issues
    Issues {
        /// Only issues (not pull requests) in this milestone number
        #[arg(long)]
        milestone: Option<u64>,

        /// Issue state
        #[arg(long, value_enum, default_value = "open")]
        state: StateFilter,
    },

    /// List pull requests
    Pulls {
        /// Pull request state
        #[arg(long, value_enum, default_value = "open")]
        state: StateFilter,
    },

    /// List branches
    Branches,

    /// Check whether a branch exists (exit code 1 when it does not)
    BranchExists {
        /// Branch name
        name: String,
    },

    /// List Actions variables
    Variables {
        /// Organization to list instead of the repository
        #[arg(long)]
        org: Option<String>,
    },
}

/// Output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON output
    Json,
    /// Human-readable output
    Pretty,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_milestones() {
        let cli = Cli::parse_from([
            "gh-release-tools",
            "--owner",
            "acme",
            "--repo",
            "widgets",
            "milestones",
            "--state",
            "all",
        ]);

        assert_eq!(cli.owner.as_deref(), Some("acme"));
        assert_eq!(cli.format, OutputFormat::Json);
        assert!(matches!(
            cli.command,
            Commands::Milestones {
                state: StateFilter::All
            }
        ));
    }

    #[test]
    fn test_parse_issues_with_milestone() {
        let cli = Cli::parse_from([
            "gh-release-tools",
            "issues",
            "--milestone",
            "7",
            "-f",
            "pretty",
        ]);

        assert_eq!(cli.format, OutputFormat::Pretty);
        assert!(matches!(
            cli.command,
            Commands::Issues {
                milestone: Some(7),
                state: StateFilter::Open
            }
        ));
    }

    #[test]
    fn test_parse_negative_per_page() {
        let cli = Cli::parse_from(["gh-release-tools", "--per-page", "-5", "branches"]);
        assert_eq!(cli.per_page, Some(-5));
    }

    #[test]
    fn test_parse_find_milestone() {
        let cli = Cli::parse_from(["gh-release-tools", "find-milestone", "v1.2.0"]);
        match cli.command {
            Commands::FindMilestone { title } => assert_eq!(title, "v1.2.0"),
            other => panic!("Expected FindMilestone, got {other:?}"),
        }
    }
}
