//! Port trait definitions (Hexagonal Architecture)
//!
//! - RepositorySource: read-only access to a hosted repository
//!
//! The evaluation engine and heuristics depend only on this trait; the GitHub
//! adapter in `infrastructure::github` implements it.

pub mod repository_source;

pub use repository_source::RepositorySource;
