pub mod config;
pub mod report;
pub mod repository;
pub mod tree;

pub use config::{Config, GitHubConfig, KnownOwnersConfig, LoggingConfig, PatternConfig};
pub use report::{ErrorReport, HeuristicKind, HeuristicResult, RequiredPolicy, SignalReport};
pub use repository::{Blob, Label, PullRequest, RateLimitStatus, RepoRef, RepositoryInfo};
pub use tree::{EntryKind, TreeEntry, TreeSnapshot};
