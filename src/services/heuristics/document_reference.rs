use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::errors::HeuristicError;
use crate::domain::models::HeuristicKind;
use crate::services::matchers::Matchers;

use super::{Heuristic, HeuristicContext};

/// Checks whether a root-level document mentions a CLA.
///
/// A document that does not exist is inconclusive and reported as an error.
#[derive(Debug, Clone)]
pub struct DocumentReferenceHeuristic {
    kind: HeuristicKind,
    path: &'static str,
    matchers: Arc<Matchers>,
}

impl DocumentReferenceHeuristic {
    pub fn contributing(matchers: Arc<Matchers>) -> Self {
        Self {
            kind: HeuristicKind::ContributingReference,
            path: "CONTRIBUTING.md",
            matchers,
        }
    }

    pub fn readme(matchers: Arc<Matchers>) -> Self {
        Self {
            kind: HeuristicKind::ReadmeReference,
            path: "README.md",
            matchers,
        }
    }

    pub fn path(&self) -> &str {
        self.path
    }
}

#[async_trait]
impl Heuristic for DocumentReferenceHeuristic {
    fn kind(&self) -> HeuristicKind {
        self.kind
    }

    async fn evaluate(&self, ctx: &HeuristicContext) -> Result<bool, HeuristicError> {
        let content = ctx
            .resolver
            .content_at_path(&ctx.snapshot, self.path)
            .await
            .map_err(|source| HeuristicError::Document {
                path: self.path.to_string(),
                source,
            })?
            .ok_or_else(|| HeuristicError::MissingDocument {
                path: self.path.to_string(),
            })?;

        Ok(self.matchers.references_cla(&content))
    }
}
