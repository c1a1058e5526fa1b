//! GitHub HTTP client.
//!
//! Wraps the handful of GitHub REST API v3 read endpoints the evaluation needs
//! and implements [`RepositorySource`] on top of them.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use tracing::{debug, instrument};

use crate::domain::errors::SourceResult;
use crate::domain::models::{
    Blob, GitHubConfig, PullRequest, RateLimitStatus, RepoRef, RepositoryInfo, TreeSnapshot,
};
use crate::domain::ports::RepositorySource;

use super::errors::GitHubApiError;
use super::models::{GitHubBlob, GitHubPullRequest, GitHubRateLimit, GitHubRepository, GitHubTree};

const API_VERSION: &str = "2022-11-28";
const RATE_REMAINING_HEADER: &str = "x-ratelimit-remaining";

/// HTTP client for the GitHub REST API v3.
#[derive(Debug, Clone)]
pub struct GitHubClient {
    http: Client,
    base_url: String,
    token: Option<String>,
}

impl GitHubClient {
    /// Create a client from configuration.
    pub fn new(config: &GitHubConfig) -> Result<Self, GitHubApiError> {
        let http = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(config.user_agent.as_str())
            .build()?;
        Ok(Self {
            http,
            base_url: config.api_url.trim_end_matches('/').to_string(),
            token: config.token.clone().filter(|t| !t.is_empty()),
        })
    }

    /// Whether requests carry an `Authorization` header.
    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let req = self
            .http
            .request(method, format!("{}{}", self.base_url, path))
            .header("Accept", "application/vnd.github+json")
            .header("X-GitHub-Api-Version", API_VERSION);
        match &self.token {
            Some(token) => req.bearer_auth(token),
            None => req,
        }
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T, GitHubApiError> {
        let mut req = self.request(Method::GET, path);
        if !query.is_empty() {
            req = req.query(query);
        }
        let resp = req.send().await?;
        let resp = Self::check_status(resp).await?;
        let bytes = resp.bytes().await?;
        Ok(serde_json::from_slice(&bytes)?)
    }

    async fn check_status(resp: Response) -> Result<Response, GitHubApiError> {
        let status = resp.status();
        if status.is_success() {
            return Ok(resp);
        }
        let remaining = resp
            .headers()
            .get(RATE_REMAINING_HEADER)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.trim().parse::<u64>().ok());
        let body = resp.text().await.unwrap_or_default();
        debug!(%status, ?remaining, "GitHub request failed");
        Err(GitHubApiError::from_status(status, remaining, body))
    }
}

#[async_trait]
impl RepositorySource for GitHubClient {
    #[instrument(skip(self, repo), fields(repo = %repo))]
    async fn repository(&self, repo: &RepoRef) -> SourceResult<RepositoryInfo> {
        let path = format!("/repos/{}/{}", repo.owner, repo.name);
        let info: GitHubRepository = self.get_json(&path, &[]).await?;
        Ok(info.into())
    }

    #[instrument(skip(self, repo), fields(repo = %repo))]
    async fn tree(
        &self,
        repo: &RepoRef,
        tree_ref: &str,
        recursive: bool,
    ) -> SourceResult<TreeSnapshot> {
        let path = format!("/repos/{}/{}/git/trees/{}", repo.owner, repo.name, tree_ref);
        let query: Vec<(&str, String)> = if recursive {
            vec![("recursive", "1".to_string())]
        } else {
            Vec::new()
        };
        let tree: GitHubTree = self.get_json(&path, &query).await?;
        debug!(entries = tree.tree.len(), truncated = tree.truncated, "tree fetched");
        Ok(tree.into())
    }

    #[instrument(skip(self, repo), fields(repo = %repo))]
    async fn blob(&self, repo: &RepoRef, sha: &str) -> SourceResult<Blob> {
        let path = format!("/repos/{}/{}/git/blobs/{}", repo.owner, repo.name, sha);
        let blob: GitHubBlob = self.get_json(&path, &[]).await?;
        Ok(blob.into())
    }

    #[instrument(skip(self, repo), fields(repo = %repo))]
    async fn pull_requests(&self, repo: &RepoRef, per_page: u8) -> SourceResult<Vec<PullRequest>> {
        let path = format!("/repos/{}/{}/pulls", repo.owner, repo.name);
        let query = [
            ("state", "all".to_string()),
            ("per_page", per_page.to_string()),
        ];
        let prs: Vec<GitHubPullRequest> = self.get_json(&path, &query).await?;
        Ok(prs.into_iter().map(Into::into).collect())
    }

    async fn rate_limit(&self) -> SourceResult<RateLimitStatus> {
        let rate: GitHubRateLimit = self.get_json("/rate_limit", &[]).await?;
        Ok(rate.into())
    }
}
