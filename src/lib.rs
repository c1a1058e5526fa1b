//! need-cla: estimate whether a GitHub repository requires contributors to
//! sign a Contributor License Agreement.
//!
//! The crate follows a hexagonal layout:
//! - `domain`: reports, repository types, errors and the [`RepositorySource`] port
//! - `services`: content resolution, the heuristics, the evaluator and the aggregator
//! - `infrastructure`: GitHub REST adapter, configuration, logging
//! - `cli`: command-line interface
//!
//! [`RepositorySource`]: domain::ports::RepositorySource

pub mod cli;
pub mod domain;
pub mod infrastructure;
pub mod services;

pub use domain::errors::{EvaluationError, HeuristicError, ResolveError, SourceError};
pub use domain::models::{Config, ErrorReport, HeuristicKind, RepoRef, RequiredPolicy, SignalReport};
pub use domain::ports::RepositorySource;
pub use services::{Evaluation, Evaluator};
