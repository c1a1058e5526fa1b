//! Common test utilities for integration tests
//!
//! Provides an in-memory [`RepositorySource`] with call counting and optional
//! latency, plus logging setup.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use chrono::Utc;

use need_cla::domain::errors::{SourceError, SourceResult};
use need_cla::domain::models::{
    Blob, PullRequest, RateLimitStatus, RepoRef, RepositoryInfo, TreeEntry, TreeSnapshot,
};
use need_cla::domain::ports::RepositorySource;

pub const WORKFLOWS_SHA: &str = "tree-workflows";

/// Setup test logging
///
/// Initializes tracing subscriber for test output.
pub fn setup_test_logging() {
    use tracing_subscriber::fmt;

    let _ = fmt()
        .with_test_writer()
        .with_max_level(tracing::Level::DEBUG)
        .try_init();
}

/// Per-endpoint call counters.
#[derive(Debug, Default)]
pub struct Calls {
    pub repository: AtomicUsize,
    pub tree: AtomicUsize,
    pub subtree: AtomicUsize,
    pub blob: AtomicUsize,
    pub pull_requests: AtomicUsize,
}

impl Calls {
    /// Calls made on behalf of heuristics, i.e. after the snapshot was taken.
    pub fn heuristic_calls(&self) -> usize {
        self.subtree.load(Ordering::SeqCst)
            + self.blob.load(Ordering::SeqCst)
            + self.pull_requests.load(Ordering::SeqCst)
    }
}

/// Scriptable repository with a single default branch named `main`.
pub struct FakeSource {
    repository: SourceResult<RepositoryInfo>,
    tree_error: Option<SourceError>,
    root: Vec<TreeEntry>,
    truncated: bool,
    subtrees: HashMap<String, Vec<TreeEntry>>,
    blobs: HashMap<String, Blob>,
    pull_requests: SourceResult<Vec<PullRequest>>,
    latency: Option<Duration>,
    pub calls: Calls,
}

impl FakeSource {
    pub fn new(repo: &RepoRef) -> Self {
        Self {
            repository: Ok(RepositoryInfo {
                full_name: repo.to_string(),
                default_branch: "main".into(),
            }),
            tree_error: None,
            root: Vec::new(),
            truncated: false,
            subtrees: HashMap::new(),
            blobs: HashMap::new(),
            pull_requests: Ok(Vec::new()),
            latency: None,
            calls: Calls::default(),
        }
    }

    pub fn with_repository_error(mut self, err: SourceError) -> Self {
        self.repository = Err(err);
        self
    }

    pub fn with_tree_error(mut self, err: SourceError) -> Self {
        self.tree_error = Some(err);
        self
    }

    pub fn truncated(mut self) -> Self {
        self.truncated = true;
        self
    }

    /// Add a root-level file.
    pub fn with_file(mut self, path: &str, content: &str) -> Self {
        let sha = format!("blob-{path}");
        self.root.push(TreeEntry::blob(path, &sha));
        self.insert_blob(&sha, content);
        self
    }

    /// Add a root-level directory entry with no listing behind it.
    pub fn with_dir(mut self, path: &str) -> Self {
        self.root.push(TreeEntry::tree(path, format!("tree-{path}")));
        self
    }

    /// Add a file under `.github/workflows`.
    pub fn with_workflow(mut self, name: &str, content: &str) -> Self {
        if !self.subtrees.contains_key(WORKFLOWS_SHA) {
            self.root.push(TreeEntry::tree(".github", "tree-github"));
            self.root.push(TreeEntry::tree(".github/workflows", WORKFLOWS_SHA));
            self.subtrees.insert(WORKFLOWS_SHA.into(), Vec::new());
        }
        let sha = format!("blob-workflow-{name}");
        self.root
            .push(TreeEntry::blob(format!(".github/workflows/{name}"), &sha));
        if let Some(listing) = self.subtrees.get_mut(WORKFLOWS_SHA) {
            listing.push(TreeEntry::blob(name, &sha));
        }
        self.insert_blob(&sha, content);
        self
    }

    pub fn with_pull_requests(mut self, prs: Vec<PullRequest>) -> Self {
        self.pull_requests = Ok(prs);
        self
    }

    pub fn with_pull_request_error(mut self, err: SourceError) -> Self {
        self.pull_requests = Err(err);
        self
    }

    /// Delay every heuristic-side call.
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = Some(latency);
        self
    }

    fn insert_blob(&mut self, sha: &str, content: &str) {
        self.blobs.insert(
            sha.to_string(),
            Blob {
                sha: sha.to_string(),
                encoding: "base64".into(),
                content: STANDARD.encode(content),
            },
        );
    }

    async fn wait(&self) {
        if let Some(latency) = self.latency {
            tokio::time::sleep(latency).await;
        }
    }
}

#[async_trait]
impl RepositorySource for FakeSource {
    async fn repository(&self, _repo: &RepoRef) -> SourceResult<RepositoryInfo> {
        self.calls.repository.fetch_add(1, Ordering::SeqCst);
        self.repository.clone()
    }

    async fn tree(
        &self,
        _repo: &RepoRef,
        tree_ref: &str,
        recursive: bool,
    ) -> SourceResult<TreeSnapshot> {
        if recursive {
            self.calls.tree.fetch_add(1, Ordering::SeqCst);
            if let Some(err) = &self.tree_error {
                return Err(err.clone());
            }
            assert_eq!(tree_ref, "main", "snapshot must come from the default branch");
            return Ok(TreeSnapshot::new(self.root.clone(), self.truncated));
        }

        self.calls.subtree.fetch_add(1, Ordering::SeqCst);
        self.wait().await;
        self.subtrees
            .get(tree_ref)
            .map(|entries| TreeSnapshot::new(entries.clone(), false))
            .ok_or(SourceError::NotFound)
    }

    async fn blob(&self, _repo: &RepoRef, sha: &str) -> SourceResult<Blob> {
        self.calls.blob.fetch_add(1, Ordering::SeqCst);
        self.wait().await;
        self.blobs.get(sha).cloned().ok_or(SourceError::NotFound)
    }

    async fn pull_requests(&self, _repo: &RepoRef, _per_page: u8) -> SourceResult<Vec<PullRequest>> {
        self.calls.pull_requests.fetch_add(1, Ordering::SeqCst);
        self.wait().await;
        self.pull_requests.clone()
    }

    async fn rate_limit(&self) -> SourceResult<RateLimitStatus> {
        Ok(RateLimitStatus {
            limit: 5000,
            remaining: 5000,
            used: 0,
            reset: Utc::now(),
        })
    }
}
