// Allow common clippy pedantic lints that aren't critical for this codebase
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_lossless)]
#![allow(clippy::too_many_lines)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::needless_pass_by_value)]
#![allow(clippy::unused_async)]

//! # gh-release-tools
//!
//! Tooling for GitHub release mechanics: milestones, issues, pull requests,
//! branches and Actions variables, resolved over GitHub's paginated REST API.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use gh_release_tools::config::GitHubConfig;
//! use gh_release_tools::github::{GitHubClient, StateFilter};
//!
//! #[tokio::main]
//! async fn main() -> gh_release_tools::Result<()> {
//!     let config = GitHubConfig::load(None)?;
//!     let client = GitHubClient::new(&config)?;
//!
//!     let milestones = client.list_milestones(StateFilter::Open).await?;
//!     let next = client.find_milestone("v1.3.0").await?;
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │                 CLI (clap) / GitHubClient                │
//! │  milestones  issues  pulls  branches  variables          │
//! └──────────────────────────────────────────────────────────┘
//!                            │ page fetcher (page, per_page)
//! ┌──────────────────────────┴───────────────────────────────┐
//! │                      PageResolver                        │
//! │  fetch_all      fetch_until      fetch_all_then_filter   │
//! ├───────────────────────────┬──────────────────────────────┤
//! │   Link header parser      │   Page group partitioner     │
//! └───────────────────────────┴──────────────────────────────┘
//! ```

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::doc_markdown)]

// ============================================================================
// Module declarations
// ============================================================================

/// Error types
pub mod error;

/// Paginated collection resolution
pub mod pagination;

/// HTTP client
pub mod http;

/// GitHub connection settings
pub mod config;

/// GitHub REST clients
pub mod github;

/// Command-line interface
pub mod cli;

// ============================================================================
// Re-exports
// ============================================================================

pub use error::{Error, Result};
pub use pagination::{LinkHeaderInfo, PageFetchResult, PageFetcher, PageResolver, SearchOutcome};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");
