//! Implementation of the `need-cla rate-limit` command.

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use clap::Args;
use console::style;
use serde::Serialize;

use crate::cli::output::{output, CommandOutput};
use crate::domain::models::{Config, RateLimitStatus};
use crate::domain::ports::RepositorySource;
use crate::infrastructure::github::GitHubClient;

#[derive(Args, Debug)]
pub struct RateLimitArgs {}

#[derive(Debug, Serialize)]
pub struct RateLimitOutput {
    pub authenticated: bool,
    pub limit: u64,
    pub remaining: u64,
    pub used: u64,
    pub reset: DateTime<Utc>,
}

impl RateLimitOutput {
    pub fn new(status: RateLimitStatus, authenticated: bool) -> Self {
        Self {
            authenticated,
            limit: status.limit,
            remaining: status.remaining,
            used: status.used,
            reset: status.reset,
        }
    }
}

impl CommandOutput for RateLimitOutput {
    fn to_human(&self) -> String {
        let remaining = if self.remaining == 0 {
            style(self.remaining.to_string()).red().bold()
        } else {
            style(self.remaining.to_string()).green()
        };
        let mode = if self.authenticated {
            "authenticated"
        } else {
            "unauthenticated"
        };
        format!(
            "{remaining}/{} requests remaining ({mode}, {} used)\nResets at {}",
            self.limit,
            self.used,
            self.reset.format("%Y-%m-%d %H:%M:%S UTC")
        )
    }
}

pub async fn execute(_args: RateLimitArgs, config: &Config, json_mode: bool) -> Result<()> {
    let client = GitHubClient::new(&config.github).context("Failed to build GitHub client")?;
    let status = client
        .rate_limit()
        .await
        .context("Failed to query GitHub rate limit")?;
    output(&RateLimitOutput::new(status, client.is_authenticated()), json_mode);
    Ok(())
}
