use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::errors::HeuristicError;
use crate::domain::models::HeuristicKind;
use crate::services::known_owners::KnownOwners;

use super::{Heuristic, HeuristicContext};

/// Owner membership in the known CLA-requiring list. Performs no I/O.
#[derive(Debug, Clone)]
pub struct KnownOwnerHeuristic {
    owners: Arc<KnownOwners>,
}

impl KnownOwnerHeuristic {
    pub fn new(owners: Arc<KnownOwners>) -> Self {
        Self { owners }
    }
}

#[async_trait]
impl Heuristic for KnownOwnerHeuristic {
    fn kind(&self) -> HeuristicKind {
        HeuristicKind::KnownOwner
    }

    async fn evaluate(&self, ctx: &HeuristicContext) -> Result<bool, HeuristicError> {
        Ok(self.owners.contains(&ctx.repo().owner))
    }
}
