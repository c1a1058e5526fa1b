//! CLI type definitions
//!
//! This module contains clap command structures that define the CLI interface.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::cli::commands::check::CheckArgs;
use crate::cli::commands::rate_limit::RateLimitArgs;

#[derive(Parser, Debug)]
#[command(name = "need-cla")]
#[command(about = "Estimate whether a GitHub repository requires a signed CLA", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output in JSON format
    #[arg(short, long, global = true)]
    pub json: bool,

    /// GitHub personal access token (overrides CLA_TOKEN and GITHUB_TOKEN)
    #[arg(long, global = true)]
    pub token: Option<String>,

    /// Load configuration from this file instead of .need-cla/
    #[arg(short, long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Check whether a repository needs a CLA signed before contributing
    Check(CheckArgs),

    /// Show the remaining GitHub API quota
    RateLimit(RateLimitArgs),
}
