//! Implementation of the `need-cla check` command.

use std::collections::BTreeMap;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Args;
use console::style;
use serde::Serialize;
use tokio_util::sync::CancellationToken;
use tracing::warn;

use crate::cli::output::{create_spinner, list_table, output, CommandOutput};
use crate::domain::models::{Config, HeuristicKind, RepoRef, RequiredPolicy, SignalReport};
use crate::infrastructure::github::GitHubClient;
use crate::services::{Evaluation, Evaluator};

use super::cancel_on_ctrl_c;

#[derive(Args, Debug)]
pub struct CheckArgs {
    /// Repository owner, or `owner/repo`
    pub target: String,

    /// Repository name when the owner is given separately
    pub repo: Option<String>,
}

impl CheckArgs {
    pub fn repo_ref(&self) -> Result<RepoRef> {
        match &self.repo {
            Some(name) if !self.target.is_empty() && !name.is_empty() => {
                Ok(RepoRef::new(&self.target, name))
            }
            Some(_) => anyhow::bail!("owner and repository name cannot be empty"),
            None => self.target.parse().map_err(anyhow::Error::msg),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct CheckOutput {
    pub repository: String,
    pub default_branch: String,
    pub required: bool,
    pub truncated: bool,
    pub signals: SignalReport,
    /// Heuristic name to failure message
    pub errors: BTreeMap<String, String>,
    #[serde(skip)]
    owner: String,
    #[serde(skip)]
    error_summary: Option<String>,
}

impl CheckOutput {
    pub fn new(evaluation: &Evaluation, policy: RequiredPolicy) -> Self {
        let errors = evaluation
            .errors
            .as_ref()
            .map(|report| {
                report
                    .failures()
                    .map(|(kind, err)| (kind.to_string(), err.to_string()))
                    .collect()
            })
            .unwrap_or_default();
        Self {
            repository: evaluation.repo.to_string(),
            default_branch: evaluation.default_branch.clone(),
            required: evaluation.required(policy),
            truncated: evaluation.truncated,
            signals: evaluation.signals,
            errors,
            owner: evaluation.repo.owner.clone(),
            error_summary: evaluation.errors.as_ref().map(ToString::to_string),
        }
    }

    fn finding(&self, kind: HeuristicKind) -> String {
        let found = self.signals.get(kind);
        let does = if found { "DOES" } else { "DOES NOT" };
        match kind {
            HeuristicKind::KnownOwner => format!(
                "{} {} a known CLA requirer",
                self.owner,
                if found { "IS" } else { "IS NOT" }
            ),
            HeuristicKind::PrLabel => format!("{does} use CLA labels on recent pull requests"),
            HeuristicKind::BotConfig => format!("{does} have a .clabot file"),
            HeuristicKind::ContributingReference => {
                format!("CONTRIBUTING.md {does} reference a CLA")
            }
            HeuristicKind::ReadmeReference => format!("README.md {does} reference a CLA"),
            HeuristicKind::CiAction => format!("{does} use the cla-assistant GitHub Action"),
        }
    }

    /// The closing one-line verdict.
    pub fn verdict(&self) -> String {
        let (mark, does) = if self.required {
            ("✓", "DOES")
        } else {
            ("✗", "DOES NOT")
        };
        format!(
            "[{mark}] I think {} {does} need a CLA signed before contributing.",
            self.repository
        )
    }
}

impl CommandOutput for CheckOutput {
    fn to_human(&self) -> String {
        let mut out = format!("I found that {}:\n\n", style(&self.repository).bold());

        let mut table = list_table(&["signal", "finding"]);
        for kind in HeuristicKind::ALL {
            let finding = self.finding(kind);
            let finding = if self.signals.get(kind) {
                style(finding).green()
            } else {
                style(finding).dim()
            };
            table.add_row(vec![kind.to_string(), finding.to_string()]);
        }
        out.push_str(&format!("{table}\n"));

        if self.truncated {
            let warning = format!(
                "The file tree of {} was truncated; some files may have been missed.",
                self.default_branch
            );
            out.push_str(&format!("\n{}\n", style(warning).yellow()));
        }
        if let Some(summary) = &self.error_summary {
            out.push_str(&format!("\n{}\n", style(summary).yellow()));
        }

        let verdict = self.verdict();
        let verdict = if self.required {
            style(verdict).green().bold()
        } else {
            style(verdict).bold()
        };
        out.push_str(&format!("\n{verdict}"));
        out
    }
}

pub async fn execute(args: CheckArgs, config: &Config, json_mode: bool) -> Result<()> {
    let repo = args.repo_ref()?;
    let client = GitHubClient::new(&config.github).context("Failed to build GitHub client")?;
    let evaluator = Evaluator::from_config(Arc::new(client), config)
        .context("Failed to compile CLA patterns")?;

    let cancel = CancellationToken::new();
    let watcher = cancel_on_ctrl_c(cancel.clone());
    let spinner = (!json_mode).then(|| create_spinner(format!("checking {repo}")));

    let result = evaluator.evaluate(&repo, &cancel).await;

    if let Some(spinner) = spinner {
        spinner.finish_and_clear();
    }
    watcher.abort();

    let evaluation = result?;
    if let Some(errors) = &evaluation.errors {
        warn!(
            repo = %repo,
            failed = errors.failures().count(),
            "some heuristics were inconclusive"
        );
    }

    output(&CheckOutput::new(&evaluation, evaluator.policy()), json_mode);
    Ok(())
}
