//! CLI runner - executes commands

use crate::cli::commands::{Cli, Commands, OutputFormat};
use crate::config::GitHubConfig;
use crate::error::{Error, Result};
use crate::github::{Branch, GitHubClient, Issue, ItemState, Milestone, PullRequest, Variable};
use serde::Serialize;
use tracing::debug;

/// CLI runner
pub struct Runner {
    cli: Cli,
}

impl Runner {
    /// Create a new runner
    pub fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Run the CLI command
    pub async fn run(&self) -> Result<()> {
        let config = self.load_config()?;
        let client = GitHubClient::new(&config)?;
        debug!("Using repository {}", client.full_name());

        let output = match &self.cli.command {
            Commands::Milestones { state } => {
                let milestones = client.list_milestones(*state).await?;
                render(self.cli.format, &milestones, milestone_line)?
            }
            Commands::FindMilestone { title } => {
                let milestone = client.find_milestone(title).await?.ok_or_else(|| {
                    Error::Other(format!(
                        "Milestone '{title}' not found in {}",
                        client.full_name()
                    ))
                })?;
                render(self.cli.format, std::slice::from_ref(&milestone), milestone_line)?
            }
            Commands::Issues { milestone, state } => {
                let issues = match milestone {
                    Some(number) => client.list_issues_in_milestone(*number, *state).await?,
                    None => client.list_issues(*state).await?,
                };
                render(self.cli.format, &issues, issue_line)?
            }
            Commands::Pulls { state } => {
                let pulls = client.list_pull_requests(*state).await?;
                render(self.cli.format, &pulls, pull_request_line)?
            }
            Commands::Branches => {
                let branches = client.list_branches().await?;
                render(self.cli.format, &branches, branch_line)?
            }
            Commands::BranchExists { name } => {
                if !client.branch_exists(name).await? {
                    return Err(Error::Other(format!(
                        "Branch '{name}' not found in {}",
                        client.full_name()
                    )));
                }
                match self.cli.format {
                    OutputFormat::Json => {
                        serde_json::json!({ "branch": name, "exists": true }).to_string()
                    }
                    OutputFormat::Pretty => format!("Branch '{name}' exists"),
                }
            }
            Commands::Variables { org } => {
                let variables = match org {
                    Some(org) => client.list_org_variables(org).await?,
                    None => client.list_repo_variables().await?,
                };
                render(self.cli.format, &variables, variable_line)?
            }
        };

        println!("{output}");
        Ok(())
    }

    /// Layer config file, environment and command-line flags
    fn load_config(&self) -> Result<GitHubConfig> {
        let mut config = GitHubConfig::load(self.cli.config.as_deref())?;

        if let Some(owner) = &self.cli.owner {
            config.owner.clone_from(owner);
        }
        if let Some(repo) = &self.cli.repo {
            config.repo.clone_from(repo);
        }
        if let Some(per_page) = self.cli.per_page {
            config.per_page = per_page;
        }

        Ok(config)
    }
}

/// Render a list as pretty JSON or one line per item
fn render<T: Serialize>(
    format: OutputFormat,
    items: &[T],
    line: fn(&T) -> String,
) -> Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(items)?),
        OutputFormat::Pretty => {
            if items.is_empty() {
                return Ok("(none)".to_string());
            }
            Ok(items.iter().map(line).collect::<Vec<_>>().join("\n"))
        }
    }
}

fn state_label(state: ItemState) -> &'static str {
    match state {
        ItemState::Open => "open",
        ItemState::Closed => "closed",
    }
}

fn milestone_line(milestone: &Milestone) -> String {
    let due = milestone
        .due_on
        .map(|d| format!(" due {}", d.format("%Y-%m-%d")))
        .unwrap_or_default();
    format!(
        "#{:<5} {:<20} {:<6} {} open / {} closed{due}",
        milestone.number,
        milestone.title,
        state_label(milestone.state),
        milestone.open_issues,
        milestone.closed_issues
    )
}

fn issue_line(issue: &Issue) -> String {
    let kind = if issue.is_pull_request() { "PR" } else { "issue" };
    format!(
        "#{:<5} {:<5} {:<6} {}",
        issue.number,
        kind,
        state_label(issue.state),
        issue.title
    )
}

fn pull_request_line(pull: &PullRequest) -> String {
    let state = if pull.is_merged() {
        "merged"
    } else {
        state_label(pull.state)
    };
    format!(
        "#{:<5} {:<6} {} -> {}  {}",
        pull.number, state, pull.head.ref_name, pull.base.ref_name, pull.title
    )
}

fn branch_line(branch: &Branch) -> String {
    let marker = if branch.protected { " (protected)" } else { "" };
    format!("{}{marker}", branch.name)
}

fn variable_line(variable: &Variable) -> String {
    format!("{}={}", variable.name, variable.value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::github::CommitRef;
    use clap::Parser;

    #[test]
    fn test_load_config_applies_flags() {
        let cli = Cli::parse_from([
            "gh-release-tools",
            "--owner",
            "acme",
            "--repo",
            "widgets",
            "--per-page",
            "500",
            "branches",
        ]);
        let config = Runner::new(cli).load_config().unwrap();

        assert_eq!(config.owner, "acme");
        assert_eq!(config.repo, "widgets");
        assert_eq!(config.effective_per_page(), 100);
    }

    #[test]
    fn test_render_pretty_lines() {
        let branches = vec![
            Branch {
                name: "main".to_string(),
                commit: CommitRef {
                    sha: "abc".to_string(),
                },
                protected: true,
            },
            Branch {
                name: "develop".to_string(),
                commit: CommitRef {
                    sha: "def".to_string(),
                },
                protected: false,
            },
        ];

        let output = render(OutputFormat::Pretty, &branches, branch_line).unwrap();
        assert_eq!(output, "main (protected)\ndevelop");
    }

    #[test]
    fn test_render_empty_pretty() {
        let output = render::<Branch>(OutputFormat::Pretty, &[], branch_line).unwrap();
        assert_eq!(output, "(none)");
    }

    #[test]
    fn test_render_json() {
        let variables = vec![Variable {
            name: "NEXT_VERSION".to_string(),
            value: "1.3.0".to_string(),
            created_at: None,
            updated_at: None,
        }];

        let output = render(OutputFormat::Json, &variables, variable_line).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(parsed[0]["name"], "NEXT_VERSION");
    }
}
