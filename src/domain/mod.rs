//! Domain layer for need-cla
//!
//! Models, errors and the port the evaluation depends on. Nothing in here
//! performs I/O.

pub mod errors;
pub mod models;
pub mod ports;

pub use errors::{EvaluationError, HeuristicError, ResolveError, SourceError, SourceResult};
