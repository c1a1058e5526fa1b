//! GitHub REST API adapter for the [`RepositorySource`](crate::domain::ports::RepositorySource) port.

pub mod client;
pub mod errors;
pub mod models;

pub use client::GitHubClient;
pub use errors::GitHubApiError;
