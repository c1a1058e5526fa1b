//! GitHub REST API response models.
//!
//! These structs map to the JSON payloads of the endpoints the adapter calls.
//! They are converted into domain types at the adapter boundary.

use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::domain::models::{
    Blob, EntryKind, Label, PullRequest, RateLimitStatus, RepositoryInfo, TreeEntry, TreeSnapshot,
};

/// `GET /repos/{owner}/{repo}`
#[derive(Debug, Clone, Deserialize)]
pub struct GitHubRepository {
    pub full_name: String,
    pub default_branch: String,
}

impl From<GitHubRepository> for RepositoryInfo {
    fn from(repo: GitHubRepository) -> Self {
        Self {
            full_name: repo.full_name,
            default_branch: repo.default_branch,
        }
    }
}

/// `GET /repos/{owner}/{repo}/git/trees/{tree_sha}`
#[derive(Debug, Clone, Deserialize)]
pub struct GitHubTree {
    pub sha: String,
    #[serde(default)]
    pub tree: Vec<GitHubTreeEntry>,
    #[serde(default)]
    pub truncated: bool,
}

/// One entry of a git tree listing.
#[derive(Debug, Clone, Deserialize)]
pub struct GitHubTreeEntry {
    pub path: String,
    #[serde(rename = "type")]
    pub kind: EntryKind,
    pub sha: String,
}

impl From<GitHubTree> for TreeSnapshot {
    fn from(tree: GitHubTree) -> Self {
        let entries = tree
            .tree
            .into_iter()
            .map(|e| TreeEntry {
                path: e.path,
                kind: e.kind,
                sha: e.sha,
            })
            .collect();
        Self::new(entries, tree.truncated)
    }
}

/// `GET /repos/{owner}/{repo}/git/blobs/{file_sha}`
#[derive(Debug, Clone, Deserialize)]
pub struct GitHubBlob {
    pub sha: String,
    #[serde(default)]
    pub content: String,
    pub encoding: String,
}

impl From<GitHubBlob> for Blob {
    fn from(blob: GitHubBlob) -> Self {
        Self {
            sha: blob.sha,
            encoding: blob.encoding,
            content: blob.content,
        }
    }
}

/// Item of `GET /repos/{owner}/{repo}/pulls`
#[derive(Debug, Clone, Deserialize)]
pub struct GitHubPullRequest {
    pub number: u64,
    #[serde(default)]
    pub labels: Vec<GitHubLabel>,
}

/// A label applied to a pull request.
#[derive(Debug, Clone, Deserialize)]
pub struct GitHubLabel {
    #[serde(default)]
    pub name: Option<String>,
}

impl From<GitHubPullRequest> for PullRequest {
    fn from(pr: GitHubPullRequest) -> Self {
        Self {
            number: pr.number,
            labels: pr
                .labels
                .into_iter()
                .map(|l| Label { name: l.name })
                .collect(),
        }
    }
}

/// `GET /rate_limit`
#[derive(Debug, Clone, Deserialize)]
pub struct GitHubRateLimit {
    pub resources: GitHubRateResources,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GitHubRateResources {
    pub core: GitHubRate,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GitHubRate {
    pub limit: u64,
    pub remaining: u64,
    #[serde(default)]
    pub used: u64,
    /// Unix epoch seconds
    pub reset: i64,
}

impl From<GitHubRateLimit> for RateLimitStatus {
    fn from(rate: GitHubRateLimit) -> Self {
        let core = rate.resources.core;
        Self {
            limit: core.limit,
            remaining: core.remaining,
            used: core.used,
            reset: DateTime::<Utc>::from_timestamp(core.reset, 0).unwrap_or_default(),
        }
    }
}
