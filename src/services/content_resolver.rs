//! Resolves paths and content addresses against a tree snapshot.

use std::sync::Arc;

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use tracing::debug;

use crate::domain::errors::ResolveError;
use crate::domain::models::{RepoRef, TreeEntry, TreeSnapshot};
use crate::domain::ports::RepositorySource;

/// The only transfer encoding blobs are accepted in.
const SUPPORTED_ENCODING: &str = "base64";

/// Reads file content for one repository.
///
/// Cheap to clone: the source is shared behind an `Arc`.
#[derive(Clone)]
pub struct ContentResolver {
    source: Arc<dyn RepositorySource>,
    repo: RepoRef,
}

impl std::fmt::Debug for ContentResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ContentResolver")
            .field("repo", &self.repo)
            .finish_non_exhaustive()
    }
}

impl ContentResolver {
    pub fn new(source: Arc<dyn RepositorySource>, repo: RepoRef) -> Self {
        Self { source, repo }
    }

    pub fn repo(&self) -> &RepoRef {
        &self.repo
    }

    pub fn source(&self) -> &Arc<dyn RepositorySource> {
        &self.source
    }

    /// Find the entry at exactly `path`.
    ///
    /// Returns `Ok(None)` only when the snapshot is complete. A miss in a
    /// truncated snapshot is [`ResolveError::PossiblyMissed`].
    pub fn find_path<'a>(
        snapshot: &'a TreeSnapshot,
        path: &str,
    ) -> Result<Option<&'a TreeEntry>, ResolveError> {
        if let Some(entry) = snapshot.entries().iter().find(|e| e.path == path) {
            return Ok(Some(entry));
        }
        if snapshot.is_truncated() {
            return Err(ResolveError::PossiblyMissed {
                path: path.to_string(),
            });
        }
        Ok(None)
    }

    /// Fetch and decode the blob at content address `sha`.
    pub async fn read_content(&self, sha: &str) -> Result<Vec<u8>, ResolveError> {
        let blob = self
            .source
            .blob(&self.repo, sha)
            .await
            .map_err(|source| ResolveError::Source {
                target: format!("{sha} blob"),
                source,
            })?;

        if blob.encoding != SUPPORTED_ENCODING {
            return Err(ResolveError::UnsupportedEncoding {
                encoding: blob.encoding,
            });
        }

        // The API wraps base64 payloads at 60 columns.
        let compact: String = blob
            .content
            .chars()
            .filter(|c| !c.is_ascii_whitespace())
            .collect();
        STANDARD
            .decode(compact)
            .map_err(|e| ResolveError::Decode {
                sha: sha.to_string(),
                reason: e.to_string(),
            })
    }

    /// Read the file at `path`, or `Ok(None)` if it verifiably does not exist.
    pub async fn content_at_path(
        &self,
        snapshot: &TreeSnapshot,
        path: &str,
    ) -> Result<Option<Vec<u8>>, ResolveError> {
        let Some(entry) = Self::find_path(snapshot, path)? else {
            return Ok(None);
        };
        if !entry.is_blob() {
            return Err(ResolveError::NotABlob {
                path: path.to_string(),
            });
        }
        debug!(repo = %self.repo, path, sha = %entry.sha, "reading blob");
        self.read_content(&entry.sha).await.map(Some)
    }

    /// List the direct children of a directory entry.
    pub async fn list_directory(&self, entry: &TreeEntry) -> Result<TreeSnapshot, ResolveError> {
        if entry.is_blob() {
            return Err(ResolveError::NotATree {
                path: entry.path.clone(),
            });
        }
        self.source
            .tree(&self.repo, &entry.sha, false)
            .await
            .map_err(|source| ResolveError::Source {
                target: format!("{} tree", entry.path),
                source,
            })
    }
}
