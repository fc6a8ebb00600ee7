//! GitHub REST clients
//!
//! Binds repository endpoints (milestones, issues, pull requests, branches,
//! Actions variables) to the pagination engine. JSON decoding and endpoint
//! paths live here; the engine only sees page fetchers.

mod client;
mod types;

pub use client::GitHubClient;
pub use types::{
    Branch, CommitRef, Issue, ItemState, Label, Milestone, PullRequest, PullRequestRef,
    StateFilter, Variable, VariablesPage,
};
