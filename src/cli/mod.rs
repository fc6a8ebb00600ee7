//! CLI module
//!
//! Command-line interface for the release tooling.
//!
//! # Commands
//!
//! - `milestones` - List milestones
//! - `find-milestone` - Look up a milestone by title
//! - `issues` - List issues, optionally for one milestone
//! - `pulls` - List pull requests
//! - `branches` / `branch-exists` - Inspect branches
//! - `variables` - List Actions variables

mod commands;
mod runner;

pub use commands::{Cli, Commands, OutputFormat};
pub use runner::Runner;
