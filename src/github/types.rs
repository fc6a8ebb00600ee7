//! GitHub REST models
//!
//! Only the fields the release tooling reads are modelled; everything else in
//! the API payloads is ignored.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Open/closed state of an issue, pull request or milestone
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemState {
    Open,
    Closed,
}

/// `state` query filter for list endpoints
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum StateFilter {
    #[default]
    Open,
    Closed,
    All,
}

impl StateFilter {
    /// Query parameter value
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Open => "open",
            Self::Closed => "closed",
            Self::All => "all",
        }
    }
}

/// Repository milestone
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Milestone {
    pub number: u64,
    pub title: String,
    pub state: ItemState,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub open_issues: u64,
    #[serde(default)]
    pub closed_issues: u64,
    #[serde(default)]
    pub due_on: Option<DateTime<Utc>>,
    #[serde(default)]
    pub html_url: String,
}

/// Issue label
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Label {
    pub name: String,
}

/// Issue as returned by the issues endpoint (which also lists pull requests)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Issue {
    pub number: u64,
    pub title: String,
    pub state: ItemState,
    #[serde(default)]
    pub milestone: Option<Milestone>,
    #[serde(default)]
    pub labels: Vec<Label>,
    /// Present only when the issue is really a pull request
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pull_request: Option<serde_json::Value>,
    #[serde(default)]
    pub html_url: String,
}

impl Issue {
    /// Check if this entry is a pull request listed through the issues API
    pub fn is_pull_request(&self) -> bool {
        self.pull_request.is_some()
    }

    /// Milestone number, if assigned
    pub fn milestone_number(&self) -> Option<u64> {
        self.milestone.as_ref().map(|m| m.number)
    }
}

/// Head or base reference of a pull request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PullRequestRef {
    #[serde(rename = "ref")]
    pub ref_name: String,
    pub sha: String,
}

/// Pull request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PullRequest {
    pub number: u64,
    pub title: String,
    pub state: ItemState,
    pub head: PullRequestRef,
    pub base: PullRequestRef,
    #[serde(default)]
    pub merged_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub milestone: Option<Milestone>,
    #[serde(default)]
    pub html_url: String,
}

impl PullRequest {
    /// Check if the pull request was merged
    pub fn is_merged(&self) -> bool {
        self.merged_at.is_some()
    }
}

/// Commit pointer on a branch
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommitRef {
    pub sha: String,
}

/// Repository branch
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Branch {
    pub name: String,
    pub commit: CommitRef,
    #[serde(default)]
    pub protected: bool,
}

/// Actions variable (repository or organization level)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Variable {
    pub name: String,
    pub value: String,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Body of the variables endpoints, which wrap the page in an object
#[derive(Debug, Clone, Deserialize)]
pub struct VariablesPage {
    #[serde(default)]
    pub total_count: u64,
    #[serde(default)]
    pub variables: Vec<Variable>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_state_filter_as_str() {
        assert_eq!(StateFilter::Open.as_str(), "open");
        assert_eq!(StateFilter::Closed.as_str(), "closed");
        assert_eq!(StateFilter::All.as_str(), "all");
        assert_eq!(StateFilter::default(), StateFilter::Open);
    }

    #[test]
    fn test_issue_vs_pull_request() {
        let issue: Issue = serde_json::from_value(json!({
            "number": 1,
            "title": "Bug",
            "state": "open",
            "labels": [{"name": "bug"}],
            "milestone": {"number": 3, "title": "v1.2.0", "state": "open"}
        }))
        .unwrap();
        assert!(!issue.is_pull_request());
        assert_eq!(issue.milestone_number(), Some(3));
        assert_eq!(issue.labels[0].name, "bug");

        let pr: Issue = serde_json::from_value(json!({
            "number": 2,
            "title": "Fix",
            "state": "closed",
            "pull_request": {"url": "https://api.github.com/repos/acme/widgets/pulls/2"}
        }))
        .unwrap();
        assert!(pr.is_pull_request());
        assert_eq!(pr.milestone_number(), None);
    }

    #[test]
    fn test_pull_request_ref_rename() {
        let pr: PullRequest = serde_json::from_value(json!({
            "number": 7,
            "title": "Release v1.2.0",
            "state": "closed",
            "head": {"ref": "release/v1.2.0", "sha": "abc"},
            "base": {"ref": "main", "sha": "def"},
            "merged_at": "2024-03-01T12:00:00Z"
        }))
        .unwrap();

        assert_eq!(pr.head.ref_name, "release/v1.2.0");
        assert_eq!(pr.base.ref_name, "main");
        assert!(pr.is_merged());
    }

    #[test]
    fn test_milestone_due_on() {
        let milestone: Milestone = serde_json::from_value(json!({
            "number": 5,
            "title": "v2.0.0",
            "state": "closed",
            "due_on": "2024-06-30T07:00:00Z",
            "open_issues": 0,
            "closed_issues": 12
        }))
        .unwrap();

        assert_eq!(milestone.state, ItemState::Closed);
        assert_eq!(milestone.closed_issues, 12);
        assert!(milestone.due_on.is_some());
    }
}
