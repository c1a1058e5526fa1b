use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;

use crate::domain::errors::{HeuristicError, ResolveError};
use crate::domain::models::HeuristicKind;
use crate::services::content_resolver::ContentResolver;
use crate::services::matchers::Matchers;

use super::{Heuristic, HeuristicContext};

/// Directory holding GitHub Actions workflow definitions.
pub const WORKFLOWS_DIR: &str = ".github/workflows";

/// Searches workflow files for a step using the cla-assistant action.
#[derive(Debug, Clone)]
pub struct CiActionHeuristic {
    matchers: Arc<Matchers>,
}

impl CiActionHeuristic {
    pub fn new(matchers: Arc<Matchers>) -> Self {
        Self { matchers }
    }
}

#[async_trait]
impl Heuristic for CiActionHeuristic {
    fn kind(&self) -> HeuristicKind {
        HeuristicKind::CiAction
    }

    async fn evaluate(&self, ctx: &HeuristicContext) -> Result<bool, HeuristicError> {
        // A complete tree without the directory has no workflows to search.
        let Some(dir) = ContentResolver::find_path(&ctx.snapshot, WORKFLOWS_DIR)? else {
            return Ok(false);
        };
        let listing = ctx.resolver.list_directory(dir).await?;
        debug!(repo = %ctx.repo(), files = listing.len(), "scanning workflows");

        let mut failures = BTreeMap::new();
        for entry in listing.entries() {
            let path = format!("{WORKFLOWS_DIR}/{}", entry.path);
            if !entry.is_blob() {
                let err = ResolveError::NotABlob { path: path.clone() };
                failures.insert(path, err.to_string());
                continue;
            }
            match ctx.resolver.read_content(&entry.sha).await {
                Ok(content) if self.matchers.uses_cla_action(&content) => return Ok(true),
                Ok(_) => {}
                Err(err) => {
                    failures.insert(path, err.to_string());
                }
            }
        }

        if failures.is_empty() {
            Ok(false)
        } else {
            Err(HeuristicError::Workflows { failures })
        }
    }
}
