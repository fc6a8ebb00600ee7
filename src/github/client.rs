//! GitHub REST client
//!
//! Each list operation binds a page fetcher to one endpoint and lets
//! [`PageResolver`] decide which pages to request.

use super::types::{
    Branch, Issue, Milestone, PullRequest, StateFilter, Variable, VariablesPage,
};
use crate::config::GitHubConfig;
use crate::error::{Error, Result};
use crate::http::{HttpClient, RequestConfig};
use crate::pagination::{PageFetchResult, PageRequest, PageResolver};
use serde::de::DeserializeOwned;
use tracing::{debug, info};

/// Client for one repository
#[derive(Debug, Clone)]
pub struct GitHubClient {
    http: HttpClient,
    owner: String,
    repo: String,
    per_page: u32,
}

impl GitHubClient {
    /// Create a client from validated configuration
    pub fn new(config: &GitHubConfig) -> Result<Self> {
        config.validate()?;
        let http = HttpClient::with_config(config.http_config())?;

        Ok(Self {
            http,
            owner: config.owner.clone(),
            repo: config.repo.clone(),
            per_page: config.effective_per_page(),
        })
    }

    /// `owner/repo`
    pub fn full_name(&self) -> String {
        format!("{}/{}", self.owner, self.repo)
    }

    fn resolver(&self) -> PageResolver {
        PageResolver::with_request(PageRequest {
            page: 1,
            per_page: self.per_page,
        })
    }

    fn repo_path(&self, suffix: &str) -> String {
        format!("repos/{}/{}/{}", self.owner, self.repo, suffix)
    }

    // ========================================================================
    // Page fetchers
    // ========================================================================

    /// Fetch one page of an endpoint returning a JSON array
    pub async fn fetch_page<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
        page: u32,
        per_page: u32,
    ) -> Result<PageFetchResult<T>> {
        self.fetch_page_with(path, query, page, per_page, |items: Vec<T>| items)
            .await
    }

    /// Fetch one page, decoding the body as `B` and pulling the items out of it
    async fn fetch_page_with<B, T, X>(
        &self,
        path: &str,
        query: &[(&str, String)],
        page: u32,
        per_page: u32,
        extract: X,
    ) -> Result<PageFetchResult<T>>
    where
        B: DeserializeOwned,
        X: FnOnce(B) -> Vec<T>,
    {
        let mut request = RequestConfig::new()
            .query("page", page.to_string())
            .query("per_page", per_page.to_string());
        for (key, value) in query {
            request = request.query(*key, value.clone());
        }

        let response = self.http.get_with_config(path, request).await?;
        let headers = response.headers().clone();
        let body_text = response.text().await?;
        let body: B = serde_json::from_str(&body_text)
            .map_err(|e| Error::decode(format!("GET {path} page {page}: {e}")))?;
        let items = extract(body);

        debug!("GET {path} page {page}: {} items", items.len());
        Ok(PageFetchResult::with_headers(items, &headers))
    }

    // ========================================================================
    // Milestones
    // ========================================================================

    /// List milestones in the given state
    pub async fn list_milestones(&self, state: StateFilter) -> Result<Vec<Milestone>> {
        let path = self.repo_path("milestones");
        let query = [("state", state.as_str().to_string())];

        let milestones: Vec<Milestone> = self
            .resolver()
            .fetch_all(|page: u32, per_page: u32| {
                self.fetch_page(&path, &query, page, per_page)
            })
            .await?;

        info!("Found {} milestones in {}", milestones.len(), self.full_name());
        Ok(milestones)
    }

    /// Find a milestone by exact title, in any state
    pub async fn find_milestone(&self, title: &str) -> Result<Option<Milestone>> {
        let path = self.repo_path("milestones");
        let query = [("state", StateFilter::All.as_str().to_string())];

        let outcome = self
            .resolver()
            .fetch_until(
                |page: u32, per_page: u32| {
                    self.fetch_page::<Milestone>(&path, &query, page, per_page)
                },
                |page: &[Milestone]| page.iter().any(|m| m.title == title),
            )
            .await?;

        Ok(outcome.into_items().into_iter().find(|m| m.title == title))
    }

    // ========================================================================
    // Issues
    // ========================================================================

    /// List issues in the given state (pull requests included, as the API does)
    pub async fn list_issues(&self, state: StateFilter) -> Result<Vec<Issue>> {
        let path = self.repo_path("issues");
        let query = [("state", state.as_str().to_string())];

        self.resolver()
            .fetch_all(|page: u32, per_page: u32| {
                self.fetch_page(&path, &query, page, per_page)
            })
            .await
    }

    /// List real issues (not pull requests) assigned to a milestone
    pub async fn list_issues_in_milestone(
        &self,
        milestone: u64,
        state: StateFilter,
    ) -> Result<Vec<Issue>> {
        let path = self.repo_path("issues");
        let query = [
            ("state", state.as_str().to_string()),
            ("milestone", milestone.to_string()),
        ];

        self.resolver()
            .fetch_all_then_filter(
                |page: u32, per_page: u32| {
                    self.fetch_page(&path, &query, page, per_page)
                },
                |issue: &Issue| {
                    !issue.is_pull_request() && issue.milestone_number() == Some(milestone)
                },
            )
            .await
    }

    // ========================================================================
    // Pull requests
    // ========================================================================

    /// List pull requests in the given state
    pub async fn list_pull_requests(&self, state: StateFilter) -> Result<Vec<PullRequest>> {
        let path = self.repo_path("pulls");
        let query = [("state", state.as_str().to_string())];

        self.resolver()
            .fetch_all(|page: u32, per_page: u32| {
                self.fetch_page(&path, &query, page, per_page)
            })
            .await
    }

    // ========================================================================
    // Branches
    // ========================================================================

    /// List all branches
    pub async fn list_branches(&self) -> Result<Vec<Branch>> {
        let path = self.repo_path("branches");

        self.resolver()
            .fetch_all(|page: u32, per_page: u32| {
                self.fetch_page(&path, &[], page, per_page)
            })
            .await
    }

    /// Check whether a branch exists, stopping at the first page that has it
    pub async fn branch_exists(&self, name: &str) -> Result<bool> {
        let path = self.repo_path("branches");

        let outcome = self
            .resolver()
            .fetch_until(
                |page: u32, per_page: u32| {
                    self.fetch_page::<Branch>(&path, &[], page, per_page)
                },
                |page: &[Branch]| page.iter().any(|b| b.name == name),
            )
            .await?;

        Ok(outcome.is_found())
    }

    // ========================================================================
    // Actions variables
    // ========================================================================

    /// List repository-level Actions variables
    pub async fn list_repo_variables(&self) -> Result<Vec<Variable>> {
        let path = self.repo_path("actions/variables");
        self.list_variables(&path).await
    }

    /// List organization-level Actions variables
    pub async fn list_org_variables(&self, org: &str) -> Result<Vec<Variable>> {
        let path = format!("orgs/{org}/actions/variables");
        self.list_variables(&path).await
    }

    async fn list_variables(&self, path: &str) -> Result<Vec<Variable>> {
        self.resolver()
            .fetch_all(|page: u32, per_page: u32| {
                self.fetch_page_with(path, &[], page, per_page, |body: VariablesPage| {
                    body.variables
                })
            })
            .await
    }
}
