//! Evaluation services: content resolution, heuristics, fan-out and merge.

pub mod aggregator;
pub mod content_resolver;
pub mod evaluator;
pub mod heuristics;
pub mod known_owners;
pub mod matchers;

pub use aggregator::Aggregator;
pub use content_resolver::ContentResolver;
pub use evaluator::{Evaluation, EvaluationState, Evaluator};
pub use heuristics::{Heuristic, HeuristicContext};
pub use known_owners::KnownOwners;
pub use matchers::{Matchers, PatternError};
