//! Domain errors for the CLA evaluation pipeline.
//!
//! Errors are layered the same way evaluation is:
//! - [`SourceError`]: the repository-hosting API failed
//! - [`ResolveError`]: a path or content address could not be resolved
//! - [`HeuristicError`]: one heuristic failed, scoped to its own report slot
//! - [`EvaluationError`]: terminal conditions that abort the whole evaluation

use std::collections::BTreeMap;

use thiserror::Error;

/// Errors reported by a [`RepositorySource`](crate::domain::ports::RepositorySource).
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SourceError {
    #[error("not found")]
    NotFound,

    #[error("invalid personal access token")]
    Unauthorized,

    #[error("API rate limit exhausted")]
    RateLimited,

    #[error("request failed: {0}")]
    Network(String),

    #[error("API returned {status}: {body}")]
    Api { status: u16, body: String },

    #[error("failed to parse API response: {0}")]
    Parse(String),
}

pub type SourceResult<T> = Result<T, SourceError>;

/// Failures of the content resolver.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ResolveError {
    /// The tree listing was truncated, so the absence of `path` is unverifiable.
    #[error("tree was truncated and {path} was possibly missed")]
    PossiblyMissed { path: String },

    #[error("{path} wasn't a blob")]
    NotABlob { path: String },

    #[error("{path} wasn't a tree")]
    NotATree { path: String },

    #[error("blob is encoded {encoding}, only base64 is supported")]
    UnsupportedEncoding { encoding: String },

    #[error("failed to decode blob {sha}: {reason}")]
    Decode { sha: String, reason: String },

    #[error("error getting {target}: {source}")]
    Source {
        target: String,
        #[source]
        source: SourceError,
    },
}

/// A failure scoped to exactly one heuristic.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum HeuristicError {
    #[error(transparent)]
    Resolve(#[from] ResolveError),

    #[error("failed to check {path}: {source}")]
    Document {
        path: String,
        #[source]
        source: ResolveError,
    },

    #[error("failed to check {path}: file not present")]
    MissingDocument { path: String },

    #[error("error getting {repo} PRs: {source}")]
    PullRequests {
        repo: String,
        #[source]
        source: SourceError,
    },

    #[error("{} error(s) checking recent PR labels:\n\t{}", .failures.len(), bullet_list(.failures))]
    Labels { failures: Vec<String> },

    #[error(
        "{} error(s) checking for cla-assistant action:\n\t{}",
        .failures.len(),
        path_list(.failures)
    )]
    Workflows { failures: BTreeMap<String, String> },

    #[error("heuristic task failed: {0}")]
    Aborted(String),
}

fn bullet_list(items: &[String]) -> String {
    items
        .iter()
        .map(|item| format!("* {item}"))
        .collect::<Vec<_>>()
        .join("\n\t")
}

fn path_list(items: &BTreeMap<String, String>) -> String {
    items
        .iter()
        .map(|(path, err)| format!("* {path}: {err}"))
        .collect::<Vec<_>>()
        .join("\n\t")
}

/// Terminal conditions: the evaluation produced no signal report.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum EvaluationError {
    #[error("{repo}: not found")]
    NotFound { repo: String },

    #[error("invalid personal access token")]
    Unauthorized,

    #[error("API rate limit exhausted")]
    RateLimited,

    #[error("failed to get {repo} metadata: {source}")]
    Repository {
        repo: String,
        #[source]
        source: SourceError,
    },

    #[error("failed to get {repo} tree: {source}")]
    Tree {
        repo: String,
        #[source]
        source: SourceError,
    },

    #[error("evaluation cancelled")]
    Cancelled,
}

impl EvaluationError {
    /// Classify a failed repository lookup.
    pub fn from_repository_lookup(repo: String, err: SourceError) -> Self {
        match err {
            SourceError::NotFound => Self::NotFound { repo },
            SourceError::Unauthorized => Self::Unauthorized,
            SourceError::RateLimited => Self::RateLimited,
            source => Self::Repository { repo, source },
        }
    }

    /// Classify a failed tree fetch. Credential and quota problems keep their
    /// own variants so callers can react to them uniformly.
    pub fn from_tree_fetch(repo: String, err: SourceError) -> Self {
        match err {
            SourceError::Unauthorized => Self::Unauthorized,
            SourceError::RateLimited => Self::RateLimited,
            source => Self::Tree { repo, source },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_classification() {
        let err = EvaluationError::from_repository_lookup("a/b".into(), SourceError::NotFound);
        assert_eq!(err, EvaluationError::NotFound { repo: "a/b".into() });
        assert_eq!(err.to_string(), "a/b: not found");

        let err = EvaluationError::from_repository_lookup("a/b".into(), SourceError::Unauthorized);
        assert_eq!(err, EvaluationError::Unauthorized);

        let err = EvaluationError::from_repository_lookup(
            "a/b".into(),
            SourceError::Network("reset".into()),
        );
        assert!(matches!(err, EvaluationError::Repository { .. }));
    }

    #[test]
    fn test_tree_fetch_classification() {
        let err = EvaluationError::from_tree_fetch("a/b".into(), SourceError::NotFound);
        assert!(matches!(err, EvaluationError::Tree { .. }));
        assert_eq!(err.to_string(), "failed to get a/b tree: not found");
    }

    #[test]
    fn test_label_failures_listing() {
        let err = HeuristicError::Labels {
            failures: vec!["label without a name on PR #3".into(), "x".into()],
        };
        assert_eq!(
            err.to_string(),
            "2 error(s) checking recent PR labels:\n\t* label without a name on PR #3\n\t* x"
        );
    }

    #[test]
    fn test_workflow_failures_listing() {
        let mut failures = BTreeMap::new();
        failures.insert(
            "ci.yml".to_string(),
            "blob is encoded utf-8, only base64 is supported".to_string(),
        );
        let err = HeuristicError::Workflows { failures };
        assert_eq!(
            err.to_string(),
            "1 error(s) checking for cla-assistant action:\n\t* ci.yml: blob is encoded utf-8, only base64 is supported"
        );
    }

    #[test]
    fn test_possibly_missed_message() {
        let err = ResolveError::PossiblyMissed { path: ".clabot".into() };
        assert_eq!(err.to_string(), "tree was truncated and .clabot was possibly missed");
    }
}
