//! Evaluation engine: snapshot once, fan out every heuristic, gather, merge.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use serde::Serialize;
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, instrument, warn};

use crate::domain::errors::{EvaluationError, HeuristicError};
use crate::domain::models::{
    Config, ErrorReport, HeuristicKind, HeuristicResult, RepoRef, RequiredPolicy, SignalReport,
};
use crate::domain::ports::RepositorySource;
use crate::services::aggregator::Aggregator;
use crate::services::content_resolver::ContentResolver;
use crate::services::heuristics::{
    BotConfigHeuristic, CiActionHeuristic, DocumentReferenceHeuristic, Heuristic,
    HeuristicContext, KnownOwnerHeuristic, PrLabelHeuristic,
};
use crate::services::known_owners::KnownOwners;
use crate::services::matchers::{Matchers, PatternError};

/// Lifecycle of a single evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EvaluationState {
    /// Fetching repository metadata and the tree snapshot
    Initializing,
    /// Heuristics dispatched, not all finished
    Running,
    /// Every heuristic reported and the results were merged
    Complete,
}

impl fmt::Display for EvaluationState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Initializing => f.write_str("initializing"),
            Self::Running => f.write_str("running"),
            Self::Complete => f.write_str("complete"),
        }
    }
}

/// Outcome of a completed evaluation.
#[derive(Debug, Clone, Serialize)]
pub struct Evaluation {
    pub repo: RepoRef,
    /// Ref the snapshot was taken from
    pub default_branch: String,
    /// Whether the tree listing was truncated by the API
    pub truncated: bool,
    pub signals: SignalReport,
    /// Per-heuristic failures; `None` when every heuristic succeeded
    #[serde(skip)]
    pub errors: Option<ErrorReport>,
}

impl Evaluation {
    pub fn required(&self, policy: RequiredPolicy) -> bool {
        self.signals.required_under(policy)
    }

    pub fn into_parts(self) -> (SignalReport, Option<ErrorReport>) {
        (self.signals, self.errors)
    }
}

/// Runs a fixed set of heuristics against one repository at a time.
pub struct Evaluator {
    source: Arc<dyn RepositorySource>,
    heuristics: Vec<Arc<dyn Heuristic>>,
    policy: RequiredPolicy,
}

impl fmt::Debug for Evaluator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kinds: Vec<HeuristicKind> = self.heuristics.iter().map(|h| h.kind()).collect();
        f.debug_struct("Evaluator")
            .field("heuristics", &kinds)
            .field("policy", &self.policy)
            .finish_non_exhaustive()
    }
}

impl Evaluator {
    pub fn new(
        source: Arc<dyn RepositorySource>,
        heuristics: Vec<Arc<dyn Heuristic>>,
        policy: RequiredPolicy,
    ) -> Self {
        Self {
            source,
            heuristics,
            policy,
        }
    }

    /// The standard six heuristics.
    pub fn standard(
        source: Arc<dyn RepositorySource>,
        owners: KnownOwners,
        matchers: Matchers,
        pr_page_size: u8,
        policy: RequiredPolicy,
    ) -> Self {
        let owners = Arc::new(owners);
        let matchers = Arc::new(matchers);
        let heuristics: Vec<Arc<dyn Heuristic>> = vec![
            Arc::new(KnownOwnerHeuristic::new(owners)),
            Arc::new(PrLabelHeuristic::new(Arc::clone(&matchers), pr_page_size)),
            Arc::new(BotConfigHeuristic),
            Arc::new(DocumentReferenceHeuristic::contributing(Arc::clone(&matchers))),
            Arc::new(DocumentReferenceHeuristic::readme(Arc::clone(&matchers))),
            Arc::new(CiActionHeuristic::new(matchers)),
        ];
        Self::new(source, heuristics, policy)
    }

    /// Build the standard evaluator from configuration. Patterns are compiled here.
    pub fn from_config(
        source: Arc<dyn RepositorySource>,
        config: &Config,
    ) -> Result<Self, PatternError> {
        Ok(Self::standard(
            source,
            KnownOwners::from_config(&config.known_owners),
            Matchers::from_config(&config.patterns)?,
            config.github.pr_page_size,
            config.policy,
        ))
    }

    pub fn policy(&self) -> RequiredPolicy {
        self.policy
    }

    pub fn heuristics(&self) -> &[Arc<dyn Heuristic>] {
        &self.heuristics
    }

    /// Evaluate `repo`.
    ///
    /// Fails with a terminal [`EvaluationError`] when the repository or its tree
    /// cannot be fetched, or when `cancel` fires. Individual heuristic failures
    /// never fail the evaluation; they are collected in [`Evaluation::errors`].
    #[instrument(skip_all, fields(repo = %repo))]
    pub async fn evaluate(
        &self,
        repo: &RepoRef,
        cancel: &CancellationToken,
    ) -> Result<Evaluation, EvaluationError> {
        debug!(state = %EvaluationState::Initializing, "fetching repository");
        let info = tokio::select! {
            biased;
            () = cancel.cancelled() => return Err(EvaluationError::Cancelled),
            info = self.source.repository(repo) => info
                .map_err(|e| EvaluationError::from_repository_lookup(repo.to_string(), e))?,
        };

        let snapshot = tokio::select! {
            biased;
            () = cancel.cancelled() => return Err(EvaluationError::Cancelled),
            tree = self.source.tree(repo, &info.default_branch, true) => tree
                .map_err(|e| EvaluationError::from_tree_fetch(repo.to_string(), e))?,
        };
        let truncated = snapshot.is_truncated();
        if truncated {
            warn!(
                branch = %info.default_branch,
                entries = snapshot.len(),
                "tree listing truncated, absent paths cannot be verified"
            );
        }

        let ctx = HeuristicContext::new(
            Arc::new(snapshot),
            ContentResolver::new(Arc::clone(&self.source), repo.clone()),
        );

        debug!(
            state = %EvaluationState::Running,
            heuristics = self.heuristics.len(),
            "dispatching heuristics"
        );
        // Dropping the set aborts every task still running.
        let mut tasks = JoinSet::new();
        let mut kinds = HashMap::with_capacity(self.heuristics.len());
        for heuristic in &self.heuristics {
            let heuristic = Arc::clone(heuristic);
            let ctx = ctx.clone();
            let kind = heuristic.kind();
            let handle = tasks.spawn(async move { heuristic.run(&ctx).await });
            kinds.insert(handle.id(), kind);
        }

        let mut aggregator = Aggregator::new();
        loop {
            let joined = tokio::select! {
                biased;
                () = cancel.cancelled() => {
                    tasks.abort_all();
                    warn!("evaluation cancelled while heuristics were running");
                    return Err(EvaluationError::Cancelled);
                }
                joined = tasks.join_next_with_id() => joined,
            };
            let Some(joined) = joined else {
                break;
            };

            let result = match joined {
                Ok((_, result)) => result,
                Err(e) => {
                    let Some(kind) = kinds.get(&e.id()).copied() else {
                        warn!(error = %e, "untracked heuristic task failed");
                        continue;
                    };
                    warn!(heuristic = %kind, error = %e, "heuristic task failed");
                    HeuristicResult::from_outcome(kind, Err(HeuristicError::Aborted(e.to_string())))
                }
            };
            for (kind, err) in result.errors.failures() {
                debug!(heuristic = %kind, error = %err, "heuristic inconclusive");
            }
            aggregator.absorb(result);
        }
        let (signals, errors) = aggregator.finish();

        info!(
            state = %EvaluationState::Complete,
            required = signals.required_under(self.policy),
            failed = errors.as_ref().map_or(0, |e| e.failures().count()),
            "evaluation finished"
        );

        Ok(Evaluation {
            repo: repo.clone(),
            default_branch: info.default_branch,
            truncated,
            signals,
            errors,
        })
    }

    /// Evaluate `repo` and reduce the report to the verdict under this
    /// evaluator's policy, keeping any partial failures.
    pub async fn check(
        &self,
        repo: &RepoRef,
        cancel: &CancellationToken,
    ) -> Result<(bool, Option<ErrorReport>), EvaluationError> {
        let evaluation = self.evaluate(repo, cancel).await?;
        let required = evaluation.required(self.policy);
        Ok((required, evaluation.errors))
    }
}
