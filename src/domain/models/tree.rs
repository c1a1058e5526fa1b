//! Point-in-time repository file listing.

use serde::{Deserialize, Serialize};

/// Kind of object a tree entry points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    Blob,
    Tree,
    /// Submodule reference
    Commit,
}

/// A single path in a [`TreeSnapshot`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TreeEntry {
    pub path: String,
    pub kind: EntryKind,
    /// Content address used to fetch the object
    pub sha: String,
}

impl TreeEntry {
    pub fn blob(path: impl Into<String>, sha: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            kind: EntryKind::Blob,
            sha: sha.into(),
        }
    }

    pub fn tree(path: impl Into<String>, sha: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            kind: EntryKind::Tree,
            sha: sha.into(),
        }
    }

    pub fn is_blob(&self) -> bool {
        self.kind == EntryKind::Blob
    }
}

/// Immutable listing of every path in a repository at one ref.
///
/// When `truncated` is set the listing is incomplete, and the absence of a
/// path proves nothing.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TreeSnapshot {
    entries: Vec<TreeEntry>,
    truncated: bool,
}

impl TreeSnapshot {
    pub fn new(entries: Vec<TreeEntry>, truncated: bool) -> Self {
        Self { entries, truncated }
    }

    pub fn entries(&self) -> &[TreeEntry] {
        &self.entries
    }

    pub fn is_truncated(&self) -> bool {
        self.truncated
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
