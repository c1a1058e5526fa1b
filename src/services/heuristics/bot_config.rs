use async_trait::async_trait;

use crate::domain::errors::HeuristicError;
use crate::domain::models::HeuristicKind;
use crate::services::content_resolver::ContentResolver;

use super::{Heuristic, HeuristicContext};

/// Config file read by CLA bots, expected at the tree root.
pub const BOT_CONFIG_PATH: &str = ".clabot";

/// Presence of a `.clabot` file. Content is never read.
#[derive(Debug, Clone, Copy, Default)]
pub struct BotConfigHeuristic;

#[async_trait]
impl Heuristic for BotConfigHeuristic {
    fn kind(&self) -> HeuristicKind {
        HeuristicKind::BotConfig
    }

    async fn evaluate(&self, ctx: &HeuristicContext) -> Result<bool, HeuristicError> {
        let entry = ContentResolver::find_path(&ctx.snapshot, BOT_CONFIG_PATH)?;
        Ok(entry.is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::errors::ResolveError;
    use crate::domain::models::{TreeEntry, TreeSnapshot};
    use crate::services::heuristics::testing::{context, InMemorySource};

    #[tokio::test]
    async fn test_present() {
        let snap = TreeSnapshot::new(vec![TreeEntry::blob(".clabot", "c1")], false);
        let ctx = context(InMemorySource::default(), snap);
        assert_eq!(BotConfigHeuristic.evaluate(&ctx).await, Ok(true));
    }

    #[tokio::test]
    async fn test_nested_file_does_not_count() {
        let snap = TreeSnapshot::new(vec![TreeEntry::blob("docs/.clabot", "c1")], false);
        let ctx = context(InMemorySource::default(), snap);
        assert_eq!(BotConfigHeuristic.evaluate(&ctx).await, Ok(false));
    }

    #[tokio::test]
    async fn test_truncated_tree_is_inconclusive() {
        let snap = TreeSnapshot::new(vec![TreeEntry::blob("README.md", "r1")], true);
        let ctx = context(InMemorySource::default(), snap);
        assert_eq!(
            BotConfigHeuristic.evaluate(&ctx).await,
            Err(HeuristicError::Resolve(ResolveError::PossiblyMissed {
                path: ".clabot".into()
            }))
        );
    }
}
