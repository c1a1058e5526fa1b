//! In-memory repository source for heuristic unit tests.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use chrono::Utc;

use crate::domain::errors::{SourceError, SourceResult};
use crate::domain::models::{
    Blob, PullRequest, RateLimitStatus, RepoRef, RepositoryInfo, TreeEntry, TreeSnapshot,
};
use crate::domain::ports::RepositorySource;
use crate::services::content_resolver::ContentResolver;

use super::HeuristicContext;

#[derive(Default)]
pub struct InMemorySource {
    pub trees: HashMap<String, TreeSnapshot>,
    pub blobs: HashMap<String, Blob>,
    pub pull_requests: Option<Vec<PullRequest>>,
}

impl InMemorySource {
    pub fn with_file(mut self, sha: &str, content: &str) -> Self {
        self.blobs.insert(
            sha.to_string(),
            Blob {
                sha: sha.to_string(),
                encoding: "base64".to_string(),
                content: STANDARD.encode(content),
            },
        );
        self
    }

    pub fn with_raw_blob(mut self, sha: &str, encoding: &str, content: &str) -> Self {
        self.blobs.insert(
            sha.to_string(),
            Blob {
                sha: sha.to_string(),
                encoding: encoding.to_string(),
                content: content.to_string(),
            },
        );
        self
    }

    pub fn with_tree(mut self, sha: &str, entries: Vec<TreeEntry>) -> Self {
        self.trees
            .insert(sha.to_string(), TreeSnapshot::new(entries, false));
        self
    }

    pub fn with_pull_requests(mut self, prs: Vec<PullRequest>) -> Self {
        self.pull_requests = Some(prs);
        self
    }
}

#[async_trait]
impl RepositorySource for InMemorySource {
    async fn repository(&self, repo: &RepoRef) -> SourceResult<RepositoryInfo> {
        Ok(RepositoryInfo {
            full_name: repo.to_string(),
            default_branch: "main".to_string(),
        })
    }

    async fn tree(&self, _repo: &RepoRef, tree_ref: &str, _recursive: bool) -> SourceResult<TreeSnapshot> {
        self.trees.get(tree_ref).cloned().ok_or(SourceError::NotFound)
    }

    async fn blob(&self, _repo: &RepoRef, sha: &str) -> SourceResult<Blob> {
        self.blobs.get(sha).cloned().ok_or(SourceError::NotFound)
    }

    async fn pull_requests(&self, _repo: &RepoRef, _per_page: u8) -> SourceResult<Vec<PullRequest>> {
        self.pull_requests
            .clone()
            .ok_or_else(|| SourceError::Network("connection reset".to_string()))
    }

    async fn rate_limit(&self) -> SourceResult<RateLimitStatus> {
        Ok(RateLimitStatus {
            limit: 60,
            remaining: 60,
            used: 0,
            reset: Utc::now(),
        })
    }
}

pub fn context(source: InMemorySource, snapshot: TreeSnapshot) -> HeuristicContext {
    context_for(RepoRef::new("octo", "widgets"), source, snapshot)
}

pub fn context_for(repo: RepoRef, source: InMemorySource, snapshot: TreeSnapshot) -> HeuristicContext {
    let resolver = ContentResolver::new(Arc::new(source), repo);
    HeuristicContext::new(Arc::new(snapshot), resolver)
}
