use reqwest::StatusCode;
use thiserror::Error;

use crate::domain::errors::SourceError;

/// Errors that can occur when talking to the GitHub REST API
#[derive(Error, Debug)]
pub enum GitHubApiError {
    /// Resource not found, or not visible to the current token (HTTP 404)
    #[error("Resource not found")]
    NotFound,

    /// Missing or bad credentials (HTTP 401, or 403 with quota left)
    #[error("Invalid personal access token")]
    Unauthorized,

    /// Primary or secondary rate limit hit (HTTP 429, or 403 with no quota left)
    #[error("Rate limit exceeded")]
    RateLimited,

    /// Any other non-success status
    #[error("Unexpected status ({0}): {1}")]
    Status(StatusCode, String),

    /// Network or connection error
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Response body did not match the expected shape
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl GitHubApiError {
    /// Map a non-success response to an error.
    ///
    /// GitHub answers 403 both for bad credentials and for an exhausted quota;
    /// the `x-ratelimit-remaining` header tells them apart.
    pub fn from_status(status: StatusCode, rate_remaining: Option<u64>, body: String) -> Self {
        match status.as_u16() {
            404 => Self::NotFound,
            401 => Self::Unauthorized,
            429 => Self::RateLimited,
            403 if rate_remaining == Some(0) => Self::RateLimited,
            403 => Self::Unauthorized,
            _ => Self::Status(status, body),
        }
    }
}

impl From<GitHubApiError> for SourceError {
    fn from(err: GitHubApiError) -> Self {
        match err {
            GitHubApiError::NotFound => Self::NotFound,
            GitHubApiError::Unauthorized => Self::Unauthorized,
            GitHubApiError::RateLimited => Self::RateLimited,
            GitHubApiError::Status(status, body) => Self::Api {
                status: status.as_u16(),
                body,
            },
            GitHubApiError::Network(e) => Self::Network(e.to_string()),
            GitHubApiError::Json(e) => Self::Parse(e.to_string()),
        }
    }
}
