//! Configuration for GitHub access
//!
//! Values are layered: YAML file, then `GITHUB_*` environment variables, then
//! command-line flags (applied by the CLI runner).

use crate::error::{Error, Result};
use crate::http::HttpClientConfig;
use crate::pagination::clamp_per_page;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::Duration;

/// Environment variable overriding `api_url`
pub const ENV_API_URL: &str = "GITHUB_API_URL";
/// Environment variable overriding `owner`
pub const ENV_OWNER: &str = "GITHUB_OWNER";
/// Environment variable overriding `repo`
pub const ENV_REPO: &str = "GITHUB_REPO";
/// Environment variable overriding `token`
pub const ENV_TOKEN: &str = "GITHUB_TOKEN";

const GITHUB_API_VERSION: &str = "2022-11-28";

/// GitHub connection settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct GitHubConfig {
    /// REST API root
    #[serde(default = "default_api_url")]
    pub api_url: String,

    /// Repository owner (user or organization)
    #[serde(default)]
    pub owner: String,

    /// Repository name
    #[serde(default)]
    pub repo: String,

    /// API token, sent as a bearer token
    #[serde(default, skip_serializing)]
    pub token: Option<String>,

    /// Items per page, clamped to `[1, 100]` when used
    #[serde(default = "default_per_page")]
    pub per_page: i64,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Optional user agent override
    #[serde(default)]
    pub user_agent: Option<String>,
}

fn default_api_url() -> String {
    "https://api.github.com".to_string()
}

fn default_per_page() -> i64 {
    100
}

fn default_timeout_secs() -> u64 {
    30
}

impl Default for GitHubConfig {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            owner: String::new(),
            repo: String::new(),
            token: None,
            per_page: default_per_page(),
            timeout_secs: default_timeout_secs(),
            user_agent: None,
        }
    }
}

impl GitHubConfig {
    /// Parse a config from YAML text
    pub fn from_yaml_str(content: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(content)?)
    }

    /// Load a config file, or defaults when no path is given, then apply
    /// environment overrides
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        config.apply_env();
        Ok(config)
    }

    /// Read a YAML config file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                Error::FileNotFound {
                    path: path.display().to_string(),
                }
            } else {
                Error::Io(e)
            }
        })?;
        Self::from_yaml_str(&content)
    }

    /// Apply `GITHUB_*` overrides from the process environment
    pub fn apply_env(&mut self) {
        self.apply_env_from(|key| std::env::var(key).ok());
    }

    /// Apply overrides from an arbitrary variable source; empty values are ignored
    pub fn apply_env_from<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(api_url) = get(ENV_API_URL) {
            self.api_url = api_url;
        }
        if let Some(owner) = get(ENV_OWNER) {
            self.owner = owner;
        }
        if let Some(repo) = get(ENV_REPO) {
            self.repo = repo;
        }
        if let Some(token) = get(ENV_TOKEN) {
            self.token = Some(token);
        }
    }

    /// Check that a repository is selected
    pub fn validate(&self) -> Result<()> {
        if self.owner.trim().is_empty() {
            return Err(Error::missing_field("owner"));
        }
        if self.repo.trim().is_empty() {
            return Err(Error::missing_field("repo"));
        }
        if self.api_url.trim().is_empty() {
            return Err(Error::missing_field("api_url"));
        }
        Ok(())
    }

    /// Page size actually sent to the API
    pub fn effective_per_page(&self) -> u32 {
        clamp_per_page(self.per_page)
    }

    /// HTTP client settings for talking to the GitHub REST API
    pub fn http_config(&self) -> HttpClientConfig {
        let mut builder = HttpClientConfig::builder()
            .base_url(self.api_url.clone())
            .timeout(Duration::from_secs(self.timeout_secs))
            .header("Accept", "application/vnd.github+json")
            .header("X-GitHub-Api-Version", GITHUB_API_VERSION);

        if let Some(token) = &self.token {
            builder = builder.header("Authorization", format!("Bearer {token}"));
        }
        if let Some(agent) = &self.user_agent {
            builder = builder.user_agent(agent.clone());
        }

        builder.build()
    }
}
