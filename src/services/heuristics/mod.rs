//! The six independent CLA heuristics.
//!
//! Each heuristic is a side-effect-free check producing one boolean. They share
//! a read-only [`HeuristicContext`] and never depend on each other's outcome.

mod bot_config;
mod ci_action;
mod document_reference;
mod known_owner;
mod pr_label;

#[cfg(test)]
pub(crate) mod testing;

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::errors::HeuristicError;
use crate::domain::models::{HeuristicKind, HeuristicResult, RepoRef, TreeSnapshot};
use crate::services::content_resolver::ContentResolver;

pub use bot_config::BotConfigHeuristic;
pub use ci_action::CiActionHeuristic;
pub use document_reference::DocumentReferenceHeuristic;
pub use known_owner::KnownOwnerHeuristic;
pub use pr_label::PrLabelHeuristic;

/// Everything a heuristic may read during one evaluation.
#[derive(Debug, Clone)]
pub struct HeuristicContext {
    /// Recursive listing of the default branch
    pub snapshot: Arc<TreeSnapshot>,
    /// Content access for the repository under evaluation
    pub resolver: ContentResolver,
}

impl HeuristicContext {
    pub fn new(snapshot: Arc<TreeSnapshot>, resolver: ContentResolver) -> Self {
        Self { snapshot, resolver }
    }

    pub fn repo(&self) -> &RepoRef {
        self.resolver.repo()
    }
}

/// One independent check contributing a single signal.
#[async_trait]
pub trait Heuristic: Send + Sync {
    /// The report slot this heuristic writes.
    fn kind(&self) -> HeuristicKind;

    /// `Ok(true)` only on positive evidence. Inconclusive checks fail instead
    /// of returning `Ok(false)`.
    async fn evaluate(&self, ctx: &HeuristicContext) -> Result<bool, HeuristicError>;

    /// Run the check and place its outcome in a partial report.
    async fn run(&self, ctx: &HeuristicContext) -> HeuristicResult {
        HeuristicResult::from_outcome(self.kind(), self.evaluate(ctx).await)
    }
}
