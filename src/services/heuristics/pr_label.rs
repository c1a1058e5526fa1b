use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;

use crate::domain::errors::HeuristicError;
use crate::domain::models::HeuristicKind;
use crate::services::matchers::Matchers;

use super::{Heuristic, HeuristicContext};

/// Looks for `cla: yes` / `cla: no` style labels on recent pull requests.
#[derive(Debug, Clone)]
pub struct PrLabelHeuristic {
    matchers: Arc<Matchers>,
    page_size: u8,
}

impl PrLabelHeuristic {
    pub fn new(matchers: Arc<Matchers>, page_size: u8) -> Self {
        Self {
            matchers,
            page_size,
        }
    }
}

#[async_trait]
impl Heuristic for PrLabelHeuristic {
    fn kind(&self) -> HeuristicKind {
        HeuristicKind::PrLabel
    }

    async fn evaluate(&self, ctx: &HeuristicContext) -> Result<bool, HeuristicError> {
        let repo = ctx.repo();
        let prs = ctx
            .resolver
            .source()
            .pull_requests(repo, self.page_size)
            .await
            .map_err(|source| HeuristicError::PullRequests {
                repo: repo.to_string(),
                source,
            })?;
        debug!(repo = %repo, count = prs.len(), "sampled pull requests");

        let mut failures = Vec::new();
        for pr in &prs {
            for label in &pr.labels {
                let Some(name) = label.name.as_deref() else {
                    failures.push(format!("label without a name on PR #{}", pr.number));
                    continue;
                };
                if self.matchers.is_cla_label(name) {
                    return Ok(true);
                }
            }
        }

        if failures.is_empty() {
            Ok(false)
        } else {
            Err(HeuristicError::Labels { failures })
        }
    }
}
